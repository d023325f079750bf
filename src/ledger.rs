//! Ledger contract abstraction.
//!
//! The ledger is a deployed, immutable program that stores transfer records.
//! This layer only reads the full record list, reads the authoritative
//! count, and appends one record per submission; validation and persistence
//! live entirely inside the contract.

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the ledger contract.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// RPC connection or request failed.
    #[error("ledger RPC error: {0}")]
    Rpc(String),

    /// The contract reverted the call.
    #[error("ledger contract reverted: {0}")]
    Reverted(String),

    /// The appended record was broadcast but never confirmed.
    #[error("confirmation failed: {0}")]
    ConfirmationTimeout(String),

    /// A raw entry could not be mapped into a record.
    #[error("ledger decode error: {0}")]
    Decode(String),
}

/// A transfer record as stored by the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    /// Account that initiated the transfer.
    pub sender: Address,
    /// Account that received the transfer.
    pub receiver: Address,
    /// Amount in base units.
    pub amount: U256,
    /// Free-form message attached to the transfer.
    pub message: String,
    /// Keyword tag attached to the transfer.
    pub keyword: String,
    /// Chain time of the record, unix seconds.
    pub timestamp: u64,
}

/// A record to append to the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendRequest {
    pub receiver: Address,
    /// Amount in base units.
    pub amount: U256,
    pub message: String,
    pub keyword: String,
}

/// Handle for an appended record awaiting chain confirmation.
///
/// Carries the transaction hash immediately; [`PendingAppend::wait`]
/// resolves once the record is durably accepted by consensus.
pub struct PendingAppend {
    tx_hash: TxHash,
    confirm: BoxFuture<'static, Result<(), LedgerError>>,
}

impl PendingAppend {
    pub fn new(tx_hash: TxHash, confirm: BoxFuture<'static, Result<(), LedgerError>>) -> Self {
        Self { tx_hash, confirm }
    }

    /// A handle whose confirmation resolves immediately. Used by in-memory
    /// ledgers and tests.
    pub fn ready(tx_hash: TxHash) -> Self {
        Self::new(tx_hash, Box::pin(std::future::ready(Ok(()))))
    }

    /// A handle whose confirmation fails immediately.
    pub fn failing(tx_hash: TxHash, err: LedgerError) -> Self {
        Self::new(tx_hash, Box::pin(std::future::ready(Err(err))))
    }

    /// Transaction hash of the pending append.
    pub fn tx_hash(&self) -> TxHash {
        self.tx_hash
    }

    /// Suspend until the record is confirmed on chain.
    pub async fn wait(self) -> Result<TxHash, LedgerError> {
        self.confirm.await?;
        Ok(self.tx_hash)
    }
}

impl std::fmt::Debug for PendingAppend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingAppend")
            .field("tx_hash", &self.tx_hash)
            .finish_non_exhaustive()
    }
}

/// External ledger collaborator.
#[async_trait]
pub trait LedgerContract: Send + Sync {
    /// Every historical record, in ledger order. There is no pagination;
    /// cost grows linearly with total record count.
    async fn list_all(&self) -> Result<Vec<RawRecord>, LedgerError>;

    /// Authoritative number of records stored by the contract.
    async fn count(&self) -> Result<u64, LedgerError>;

    /// Append a transfer record. The returned handle resolves on
    /// confirmation.
    async fn append(&self, request: AppendRequest) -> Result<PendingAppend, LedgerError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::B256;

    #[tokio::test]
    async fn test_ready_append_resolves_with_hash() {
        let hash = TxHash::from(B256::repeat_byte(0xab));
        let pending = PendingAppend::ready(hash);
        assert_eq!(pending.tx_hash(), hash);
        assert_eq!(pending.wait().await.unwrap(), hash);
    }

    #[tokio::test]
    async fn test_failing_append_surfaces_error() {
        let hash = TxHash::from(B256::repeat_byte(0x01));
        let pending = PendingAppend::failing(hash, LedgerError::Reverted("out of gas".into()));
        let err = pending.wait().await.unwrap_err();
        assert!(matches!(err, LedgerError::Reverted(_)));
    }

    #[test]
    fn test_raw_record_serde() {
        let record = RawRecord {
            sender: Address::ZERO,
            receiver: Address::repeat_byte(0x11),
            amount: U256::from(1000),
            message: "gm".to_string(),
            keyword: "test".to_string(),
            timestamp: 1_700_000_000,
        };
        let json = serde_json::to_string(&record).unwrap();
        let decoded: RawRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, record);
    }
}
