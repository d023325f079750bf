//! Production wallet provider over a local signer and RPC connection.
//!
//! Account discovery is trivial for a local signer (the one derived
//! address is always authorized, there is no consent UI to run), so both
//! discovery operations return it directly. Transfer submission builds a
//! plain value transaction with the configured fixed gas limit and
//! broadcasts it through a signing provider.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, TxHash};
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;

use crate::chain::client::ChainClient;
use crate::chain::signer::SessionSigner;
use crate::provider::{ProviderError, TransferRequest, WalletProvider};

/// [`WalletProvider`] backed by a local key and a JSON-RPC endpoint.
pub struct RpcWalletProvider {
    provider: DynProvider,
    address: Address,
    timeout_duration: Duration,
}

impl RpcWalletProvider {
    /// Build a wallet provider from a chain client and signer.
    pub fn new(client: &ChainClient, signer: &SessionSigner) -> Result<Self, ProviderError> {
        let provider = client.with_signer(signer)?;
        Ok(Self {
            provider,
            address: signer.address(),
            timeout_duration: client.timeout(),
        })
    }

    /// The account this provider signs for.
    pub fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl WalletProvider for RpcWalletProvider {
    async fn request_accounts(&self) -> Result<Vec<Address>, ProviderError> {
        Ok(vec![self.address])
    }

    async fn request_authorization(&self) -> Result<Vec<Address>, ProviderError> {
        // A local signer has no consent flow; authorization is implicit.
        tracing::debug!(address = %self.address, "Authorization granted for local signer");
        Ok(vec![self.address])
    }

    async fn submit_transfer(&self, request: TransferRequest) -> Result<TxHash, ProviderError> {
        let tx = TransactionRequest::default()
            .with_from(request.from)
            .with_to(request.to)
            .with_value(request.value)
            .with_gas_limit(request.gas_limit);

        let pending = timeout(self.timeout_duration, self.provider.send_transaction(tx))
            .await
            .map_err(|_| ProviderError::Timeout(self.timeout_duration.as_secs()))?
            .map_err(|e| ProviderError::Rpc(format!("transfer broadcast failed: {}", e)))?;

        let tx_hash = *pending.tx_hash();
        tracing::info!(
            tx_hash = %tx_hash,
            from = %request.from,
            to = %request.to,
            value = %request.value,
            "Value transfer broadcast"
        );
        Ok(tx_hash)
    }
}

impl std::fmt::Debug for RpcWalletProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RpcWalletProvider")
            .field("address", &self.address)
            .finish()
    }
}
