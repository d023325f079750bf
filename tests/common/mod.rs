//! Shared mock collaborators for integration testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use alloy::primitives::{Address, TxHash, B256, U256};
use async_trait::async_trait;

use ethsession::cache::MemoryCache;
use ethsession::config::SessionConfig;
use ethsession::ledger::{AppendRequest, LedgerContract, LedgerError, PendingAppend, RawRecord};
use ethsession::provider::{ProviderError, TransferRequest, WalletProvider};
use ethsession::session::SessionManager;

pub const WALLET_TX: TxHash = B256::repeat_byte(0x42);
pub const LEDGER_TX: TxHash = B256::repeat_byte(0x43);

pub fn account(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

pub fn record(n: u8) -> RawRecord {
    RawRecord {
        sender: account(0xaa),
        receiver: account(n),
        amount: U256::from(n as u64) * U256::from(10u64).pow(U256::from(15u64)),
        message: format!("message {n}"),
        keyword: format!("keyword {n}"),
        timestamp: 1_700_000_000 + n as u64,
    }
}

/// Scripted wallet provider.
#[derive(Default)]
pub struct MockProvider {
    /// Returned from `request_accounts`.
    pub authorized: Vec<Address>,
    /// Returned from `request_authorization`.
    pub grants: Vec<Address>,
    /// When true, `request_authorization` fails with `UserRejected`.
    pub reject_authorization: bool,
    /// When true, `submit_transfer` fails with `UserRejected`.
    pub reject_transfer: bool,
    /// Every transfer request the session submitted.
    pub transfers: Mutex<Vec<TransferRequest>>,
}

impl MockProvider {
    pub fn connected(address: Address) -> Self {
        Self {
            authorized: vec![address],
            grants: vec![address],
            ..Self::default()
        }
    }

    pub fn disconnected(address: Address) -> Self {
        Self {
            authorized: Vec::new(),
            grants: vec![address],
            ..Self::default()
        }
    }

    pub fn submitted(&self) -> Vec<TransferRequest> {
        self.transfers.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletProvider for MockProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        Ok(self.authorized.clone())
    }

    async fn request_authorization(&self) -> Result<Vec<Address>, ProviderError> {
        if self.reject_authorization {
            return Err(ProviderError::UserRejected);
        }
        Ok(self.grants.clone())
    }

    async fn submit_transfer(&self, request: TransferRequest) -> Result<TxHash, ProviderError> {
        if self.reject_transfer {
            return Err(ProviderError::UserRejected);
        }
        self.transfers.lock().unwrap().push(request);
        Ok(WALLET_TX)
    }
}

/// How the mock ledger treats appends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppendMode {
    /// Record stored and confirmed.
    #[default]
    Confirm,
    /// Broadcast itself fails.
    FailBroadcast,
    /// Broadcast succeeds, confirmation never arrives.
    FailConfirmation,
    /// Broadcast succeeds, contract reverts.
    Revert,
}

/// In-memory ledger with scripted counts and failure modes.
#[derive(Default)]
pub struct MockLedger {
    pub records: Mutex<Vec<RawRecord>>,
    /// Counts returned by successive `count()` calls; once drained,
    /// `records.len()` is authoritative.
    pub scripted_counts: Mutex<VecDeque<u64>>,
    pub append_mode: AppendMode,
    pub list_calls: AtomicUsize,
    pub count_calls: AtomicUsize,
}

impl MockLedger {
    pub fn with_records(records: Vec<RawRecord>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    pub fn with_append_mode(mode: AppendMode) -> Self {
        Self {
            append_mode: mode,
            ..Self::default()
        }
    }

    pub fn script_counts(&self, counts: impl IntoIterator<Item = u64>) {
        self.scripted_counts.lock().unwrap().extend(counts);
    }

    pub fn stored(&self) -> Vec<RawRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl LedgerContract for MockLedger {
    async fn list_all(&self) -> Result<Vec<RawRecord>, LedgerError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.lock().unwrap().clone())
    }

    async fn count(&self) -> Result<u64, LedgerError> {
        self.count_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(count) = self.scripted_counts.lock().unwrap().pop_front() {
            return Ok(count);
        }
        Ok(self.records.lock().unwrap().len() as u64)
    }

    async fn append(&self, request: AppendRequest) -> Result<PendingAppend, LedgerError> {
        match self.append_mode {
            AppendMode::FailBroadcast => {
                return Err(LedgerError::Rpc("broadcast refused".to_string()))
            }
            AppendMode::FailConfirmation => {
                return Ok(PendingAppend::failing(
                    LEDGER_TX,
                    LedgerError::ConfirmationTimeout("no receipt".to_string()),
                ))
            }
            AppendMode::Revert => {
                return Ok(PendingAppend::failing(
                    LEDGER_TX,
                    LedgerError::Reverted("transaction reverted".to_string()),
                ))
            }
            AppendMode::Confirm => {}
        }

        let mut records = self.records.lock().unwrap();
        let timestamp = 1_700_000_000 + records.len() as u64;
        records.push(RawRecord {
            sender: account(0xaa),
            receiver: request.receiver,
            amount: request.amount,
            message: request.message,
            keyword: request.keyword,
            timestamp,
        });
        Ok(PendingAppend::ready(LEDGER_TX))
    }
}

/// A manager over the given collaborators plus the memory cache backing it.
pub fn manager_with(
    provider: Option<Arc<MockProvider>>,
    ledger: Arc<MockLedger>,
    config: &SessionConfig,
) -> (Arc<SessionManager>, Arc<MemoryCache>) {
    let cache = Arc::new(MemoryCache::new());
    let wallet = provider.map(|p| p as Arc<dyn WalletProvider>);
    let manager = SessionManager::new(wallet, ledger, cache.clone(), config);
    (Arc::new(manager), cache)
}
