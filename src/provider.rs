//! Wallet provider abstraction.
//!
//! The provider is the component that owns keys: it discovers authorized
//! accounts, runs the user consent flow, and signs and broadcasts value
//! transfers. It is injected into the session manager as an explicit
//! dependency so tests and embedders can substitute their own (a browser
//! bridge, a hardware signer, a mock). Absence of a provider is modeled at
//! construction time, not by a global handle.

use alloy::primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use thiserror::Error;

/// A value transfer to be signed and broadcast by the wallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    /// Sending account (must be authorized by the provider).
    pub from: Address,
    /// Destination account.
    pub to: Address,
    /// Fixed gas limit for the transfer; the session passes 21_000 through
    /// unchanged, no estimation happens at this layer.
    pub gas_limit: u64,
    /// Amount in base units (wei).
    pub value: U256,
}

/// Errors surfaced by a wallet provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The user declined the signature or authorization request.
    #[error("request rejected by user")]
    UserRejected,

    /// RPC connection or request failed.
    #[error("provider RPC error: {0}")]
    Rpc(String),

    /// The request did not complete in time.
    #[error("provider request timed out after {0} seconds")]
    Timeout(u64),

    /// Key material problem (bad private key, signing failure).
    #[error("wallet error: {0}")]
    Wallet(String),

    /// Connected endpoint serves a different chain than configured.
    #[error("chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// External wallet collaborator.
///
/// Implementations must not panic; every failure maps to a [`ProviderError`].
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Accounts already authorized for this session, without any consent UI.
    /// An empty list means the session stays unauthenticated.
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError>;

    /// Explicitly request authorization, triggering the provider's consent
    /// flow where one exists.
    async fn request_authorization(&self) -> Result<Vec<Address>, ProviderError>;

    /// Sign and broadcast a value transfer. Resolves once the transaction
    /// has been accepted into the mempool; confirmation is not awaited here.
    async fn submit_transfer(&self, request: TransferRequest) -> Result<TxHash, ProviderError>;
}
