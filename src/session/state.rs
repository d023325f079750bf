//! Reactive session state.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::ledger::RawRecord;
use crate::session::form::TransferForm;
use crate::units;

/// A transfer record shaped for display. Produced by transforming raw
/// ledger entries; read-only, regenerated wholesale on every fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Account the transfer came from.
    pub address_from: Address,
    /// Account the transfer went to.
    pub address_to: Address,
    /// Chain time of the record, unix seconds.
    pub timestamp: u64,
    /// Message attached to the transfer.
    pub message: String,
    /// Keyword tag attached to the transfer.
    pub keyword: String,
    /// Amount in base units.
    pub amount: U256,
}

impl TransactionRecord {
    /// The amount as a decimal string at the fixed 10^18 scale.
    pub fn amount_decimal(&self) -> String {
        units::to_decimal(self.amount)
    }
}

impl From<RawRecord> for TransactionRecord {
    fn from(raw: RawRecord) -> Self {
        Self {
            address_from: raw.sender,
            address_to: raw.receiver,
            timestamp: raw.timestamp,
            message: raw.message,
            keyword: raw.keyword,
            amount: raw.amount,
        }
    }
}

/// The full reactive state exposed to UI layers. Cloned into a `watch`
/// channel on every change; cheap to snapshot, never partially updated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// The connected account, once a connect or restore succeeded.
    pub current_account: Option<Address>,
    /// The transfer draft.
    pub form: TransferForm,
    /// True only inside the confirmation-wait window of a submission.
    pub is_loading: bool,
    /// The full transaction list, replaced wholesale on every fetch.
    pub transactions: Vec<TransactionRecord>,
    /// Last known ledger record count (hydrated from the durable cache at
    /// startup, refreshed in-memory after each submission).
    pub transaction_count: Option<u64>,
    /// Raised when an operation ran without a wallet provider; the UI
    /// should show an install prompt.
    pub wallet_prompt: bool,
}
