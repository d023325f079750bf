//! Session error taxonomy and submission outcomes.
//!
//! Every failure keeps its original cause attached; nothing is collapsed
//! into a single undifferentiated error. No operation retries; each
//! failure is terminal and must be re-triggered by the user.

use alloy::primitives::TxHash;
use thiserror::Error;

use crate::ledger::LedgerError;
use crate::provider::ProviderError;
use crate::units::UnitsError;

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No wallet provider was injected.
    #[error("no wallet provider available")]
    ProviderMissing,

    /// The user declined the signature or authorization request.
    #[error("wallet request rejected by user")]
    UserRejected(#[source] ProviderError),

    /// The ledger append was broadcast but never confirmed.
    #[error("transfer confirmation failed")]
    ConfirmationFailed(#[source] LedgerError),

    /// The ledger contract rejected the record.
    #[error("ledger contract reverted")]
    ContractReverted(#[source] LedgerError),

    /// The form amount could not be converted to base units.
    #[error("invalid transfer amount")]
    InvalidAmount(#[from] UnitsError),

    /// The form destination is not a parseable address.
    #[error("invalid recipient address {input:?}")]
    InvalidRecipient {
        input: String,
        #[source]
        source: alloy::primitives::hex::FromHexError,
    },

    /// A submission was attempted with no connected account.
    #[error("no account connected")]
    NotConnected,

    /// Any other wallet provider failure.
    #[error("wallet provider request failed")]
    Provider(#[source] ProviderError),

    /// Any other ledger failure.
    #[error("ledger request failed")]
    Ledger(#[source] LedgerError),
}

impl SessionError {
    pub(crate) fn from_provider(err: ProviderError) -> Self {
        match err {
            ProviderError::UserRejected => SessionError::UserRejected(err),
            _ => SessionError::Provider(err),
        }
    }

    pub(crate) fn from_ledger(err: LedgerError) -> Self {
        match err {
            LedgerError::Reverted(_) => SessionError::ContractReverted(err),
            LedgerError::ConfirmationTimeout(_) => SessionError::ConfirmationFailed(err),
            _ => SessionError::Ledger(err),
        }
    }
}

/// The result of a transfer submission.
///
/// The wallet transfer and the ledger append are two independent calls with
/// no atomicity between them. Once the wallet transfer has gone out, a
/// later failure no longer surfaces as an `Err`: the asset moved, so the
/// caller gets the distinct [`SubmitOutcome::SentButUnrecorded`] state with
/// the wallet transaction hash and the typed cause.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Transfer sent and ledger record confirmed.
    Recorded {
        wallet_tx: TxHash,
        ledger_tx: TxHash,
    },
    /// The wallet transfer succeeded but the ledger record did not make it;
    /// the two ledgers have diverged and need manual reconciliation.
    SentButUnrecorded {
        wallet_tx: TxHash,
        cause: SessionError,
    },
    /// No wallet provider; the install prompt was raised, nothing was sent.
    WalletMissing,
}
