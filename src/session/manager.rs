//! Session manager operations.
//!
//! # Data Flow
//! ```text
//! start() ──┬─▶ restore_session()      (authorized accounts → fetch list)
//!           └─▶ refresh_cached_count() (ledger count → durable cache)
//!
//! connect() ─────────▶ provider consent flow → current_account
//! update_form_field() ─▶ draft merge
//! submit_transfer() ──▶ wallet transfer → ledger append → confirmation
//!                       → in-memory count refresh → optional rehydration
//! ```
//!
//! The two startup checks run as independent spawned tasks with no
//! coordination; nothing serializes a submission against an in-flight
//! restore. All collaborator calls suspend the calling operation; there is
//! no retry anywhere.

use alloy::primitives::{Address, TxHash, U256};
use std::sync::Arc;
use tokio::sync::watch;

use crate::cache::KeyValueCache;
use crate::config::{BehaviorConfig, SessionConfig};
use crate::ledger::{AppendRequest, LedgerContract};
use crate::provider::{TransferRequest, WalletProvider};
use crate::session::error::{SessionError, SubmitOutcome};
use crate::session::form::{FormField, TransferForm};
use crate::session::state::{SessionSnapshot, TransactionRecord};
use crate::units;

/// Bridges wallet and ledger state into reactive session state.
pub struct SessionManager {
    wallet: Option<Arc<dyn WalletProvider>>,
    ledger: Arc<dyn LedgerContract>,
    cache: Arc<dyn KeyValueCache>,
    behavior: BehaviorConfig,
    gas_limit: u64,
    count_key: String,
    state: watch::Sender<SessionSnapshot>,
}

impl SessionManager {
    /// Create a session manager over its three collaborators.
    ///
    /// `wallet` is optional: absence models a missing wallet extension and
    /// degrades every operation to an install prompt instead of an error.
    /// The transaction count is hydrated from the durable cache here, so a
    /// reloaded UI shows the last known count before any network round trip.
    pub fn new(
        wallet: Option<Arc<dyn WalletProvider>>,
        ledger: Arc<dyn LedgerContract>,
        cache: Arc<dyn KeyValueCache>,
        config: &SessionConfig,
    ) -> Self {
        let cached_count = cache
            .get(&config.cache.count_key)
            .and_then(|raw| raw.parse().ok());

        let snapshot = SessionSnapshot {
            transaction_count: cached_count,
            ..SessionSnapshot::default()
        };
        let (state, _) = watch::channel(snapshot);

        if wallet.is_none() {
            tracing::warn!("No wallet provider injected; operations will raise the install prompt");
        }

        Self {
            wallet,
            ledger,
            cache,
            behavior: config.behavior.clone(),
            gas_limit: config.chain.gas_limit,
            count_key: config.cache.count_key.clone(),
            state,
        }
    }

    /// Subscribe to session state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.subscribe()
    }

    /// The current session state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Run the two startup checks as uncoordinated background tasks:
    /// session restore and cached-count refresh. Their relative completion
    /// order is unspecified; errors are logged, never surfaced.
    pub fn start(self: &Arc<Self>) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(err) = this.restore_session().await {
                tracing::error!(error = %err, "Session restore failed");
            }
        });

        let this = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(err) = this.refresh_cached_count().await {
                tracing::error!(error = %err, "Cached count refresh failed");
            }
        });
    }

    /// Restore an already-authorized session without any consent UI.
    ///
    /// If an authorized account exists it becomes the current account and
    /// the full transaction list is fetched. Zero authorized accounts
    /// leaves the session unauthenticated and skips the fetch.
    pub async fn restore_session(&self) -> Result<(), SessionError> {
        let Some(wallet) = &self.wallet else {
            self.raise_wallet_prompt();
            return Ok(());
        };

        let accounts = wallet.request_accounts().await.map_err(|err| {
            tracing::error!(error = %err, "Account discovery failed");
            SessionError::from_provider(err)
        })?;

        match accounts.first() {
            Some(account) => {
                tracing::info!(account = %account, "Session restored");
                self.state
                    .send_modify(|s| s.current_account = Some(*account));
                self.fetch_all_transactions().await?;
            }
            None => {
                tracing::debug!("No authorized accounts found");
            }
        }
        Ok(())
    }

    /// Read the ledger's authoritative record count and overwrite the
    /// durable cache entry unconditionally (last write wins).
    pub async fn refresh_cached_count(&self) -> Result<(), SessionError> {
        if self.wallet.is_none() {
            self.raise_wallet_prompt();
            return Ok(());
        }

        let count = self.ledger.count().await.map_err(|err| {
            tracing::error!(error = %err, "Ledger count read failed");
            SessionError::from_ledger(err)
        })?;

        self.cache.set(&self.count_key, &count.to_string());
        tracing::debug!(count, "Cached transaction count refreshed");
        Ok(())
    }

    /// Request explicit wallet authorization; the first returned address
    /// becomes the current account.
    pub async fn connect(&self) -> Result<(), SessionError> {
        let Some(wallet) = &self.wallet else {
            self.raise_wallet_prompt();
            return Ok(());
        };

        let accounts = wallet.request_authorization().await.map_err(|err| {
            tracing::error!(error = %err, "Wallet authorization failed");
            SessionError::from_provider(err)
        })?;

        match accounts.first() {
            Some(account) => {
                tracing::info!(account = %account, "Wallet connected");
                self.state
                    .send_modify(|s| s.current_account = Some(*account));
            }
            None => {
                tracing::warn!("Authorization returned no accounts");
            }
        }
        Ok(())
    }

    /// Merge a single field into the transfer draft. Pure state update,
    /// no validation.
    pub fn update_form_field(&self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        self.state.send_modify(|s| s.form.set(field, value));
    }

    /// Fetch every ledger record and replace the in-memory list wholesale,
    /// preserving ledger order.
    pub async fn fetch_all_transactions(&self) -> Result<(), SessionError> {
        if self.wallet.is_none() {
            self.raise_wallet_prompt();
            return Ok(());
        }

        let raw = self.ledger.list_all().await.map_err(|err| {
            tracing::error!(error = %err, "Transaction list fetch failed");
            SessionError::from_ledger(err)
        })?;

        let records: Vec<TransactionRecord> =
            raw.into_iter().map(TransactionRecord::from).collect();
        tracing::debug!(count = records.len(), "Transaction list replaced");
        self.state.send_modify(|s| s.transactions = records);
        Ok(())
    }

    /// Submit the drafted transfer.
    ///
    /// In order: convert the amount to base units, broadcast the wallet
    /// value transfer with the fixed gas limit, append the matching ledger
    /// record, await its confirmation (with `is_loading` raised around the
    /// wait), refresh the in-memory count, then apply the configured
    /// post-submit behavior. The durable cache is not written here; only a
    /// rehydration pass refreshes it.
    pub async fn submit_transfer(&self) -> Result<SubmitOutcome, SessionError> {
        let Some(wallet) = &self.wallet else {
            self.raise_wallet_prompt();
            return Ok(SubmitOutcome::WalletMissing);
        };

        let (form, current_account) = {
            let snap = self.state.borrow();
            (snap.form.clone(), snap.current_account)
        };
        let from = current_account.ok_or(SessionError::NotConnected)?;

        let value = units::to_base_units(&form.amount)?;
        let to: Address = form
            .address_to
            .parse()
            .map_err(|source| SessionError::InvalidRecipient {
                input: form.address_to.clone(),
                source,
            })?;

        let wallet_tx = wallet
            .submit_transfer(TransferRequest {
                from,
                to,
                gas_limit: self.gas_limit,
                value,
            })
            .await
            .map_err(|err| {
                tracing::error!(error = %err, "Wallet transfer failed");
                SessionError::from_provider(err)
            })?;

        // The asset has moved. From here on a failure means the wallet
        // ledger and the contract ledger have diverged, which surfaces as
        // a distinct outcome instead of an error.
        let ledger_tx = match self.record_transfer(to, value, &form).await {
            Ok(tx) => tx,
            Err(cause) => {
                tracing::error!(
                    wallet_tx = %wallet_tx,
                    error = %cause,
                    "Transfer sent but ledger record failed"
                );
                return Ok(SubmitOutcome::SentButUnrecorded { wallet_tx, cause });
            }
        };

        match self.ledger.count().await {
            Ok(count) => self.state.send_modify(|s| s.transaction_count = Some(count)),
            Err(err) => tracing::warn!(error = %err, "Post-submit count refresh failed"),
        }

        if self.behavior.clear_form_on_submit {
            self.state.send_modify(|s| s.form = TransferForm::default());
        }

        if self.behavior.rehydrate_on_submit {
            self.rehydrate().await;
        }

        Ok(SubmitOutcome::Recorded {
            wallet_tx,
            ledger_tx,
        })
    }

    /// Append the ledger record and await confirmation, toggling
    /// `is_loading` around the wait window.
    async fn record_transfer(
        &self,
        receiver: Address,
        amount: U256,
        form: &TransferForm,
    ) -> Result<TxHash, SessionError> {
        let pending = self
            .ledger
            .append(AppendRequest {
                receiver,
                amount,
                message: form.message.clone(),
                keyword: form.keyword.clone(),
            })
            .await
            .map_err(SessionError::from_ledger)?;

        tracing::info!(tx_hash = %pending.tx_hash(), "Awaiting ledger confirmation");
        self.set_loading(true);
        let confirmed = pending.wait().await;
        self.set_loading(false);

        let tx_hash = confirmed.map_err(SessionError::from_ledger)?;
        tracing::info!(tx_hash = %tx_hash, "Ledger record confirmed");
        Ok(tx_hash)
    }

    /// Full state re-hydration after a successful submission: the library
    /// equivalent of reloading the page. Failures are logged, never
    /// surfaced, since the submission itself already succeeded.
    async fn rehydrate(&self) {
        tracing::debug!("Rehydrating session state");
        if let Err(err) = self.restore_session().await {
            tracing::warn!(error = %err, "Session restore during rehydration failed");
        }
        if let Err(err) = self.refresh_cached_count().await {
            tracing::warn!(error = %err, "Count refresh during rehydration failed");
        }
    }

    fn set_loading(&self, loading: bool) {
        self.state.send_modify(|s| s.is_loading = loading);
    }

    fn raise_wallet_prompt(&self) {
        tracing::warn!("No wallet provider available; raising install prompt");
        self.state.send_modify(|s| s.wallet_prompt = true);
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("has_wallet", &self.wallet.is_some())
            .field("gas_limit", &self.gas_limit)
            .field("count_key", &self.count_key)
            .finish()
    }
}
