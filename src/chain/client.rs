//! Chain RPC client with failover and timeouts.
//!
//! # Responsibilities
//! - Connect to the configured JSON-RPC endpoint plus failovers
//! - Verify the connected chain matches the configuration
//! - Hand out providers for the wallet and ledger layers
//! - Apply a uniform timeout to every RPC call it issues

use alloy::network::EthereumWallet;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use std::time::Duration;
use tokio::time::timeout;

use crate::chain::signer::SessionSigner;
use crate::config::ChainConfig;
use crate::provider::ProviderError;

/// RPC client wrapper shared by the wallet and ledger implementations.
#[derive(Clone)]
pub struct ChainClient {
    /// Read providers (primary + failovers), tried in order.
    providers: Vec<DynProvider>,
    config: ChainConfig,
    timeout_duration: Duration,
}

impl ChainClient {
    /// Create a new chain client.
    ///
    /// Chain-id verification runs once at startup; a mismatch or unreachable
    /// endpoint is logged but does not fail construction, so a session can
    /// start offline and degrade gracefully.
    pub async fn new(config: ChainConfig) -> Result<Self, ProviderError> {
        let timeout_duration = Duration::from_secs(config.rpc_timeout_secs);
        let mut providers = Vec::new();

        let primary_url: url::Url = config.rpc_url.parse().map_err(|e| {
            ProviderError::Rpc(format!("invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        providers.push(ProviderBuilder::new().connect_http(primary_url).erased());

        for url_str in &config.failover_urls {
            if let Ok(url) = url_str.parse() {
                providers.push(ProviderBuilder::new().connect_http(url).erased());
            } else {
                tracing::warn!(url = %url_str, "Ignoring invalid failover RPC URL");
            }
        }

        let client = Self {
            providers,
            config: config.clone(),
            timeout_duration,
        };

        match client.verify_chain_id().await {
            Ok(()) => {
                tracing::info!(
                    rpc_url = %config.rpc_url,
                    chain_id = config.chain_id,
                    "Chain client initialized"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Chain client initialized but chain verification failed"
                );
            }
        }

        Ok(client)
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> Result<(), ProviderError> {
        let chain_id = self.get_chain_id().await?;
        if chain_id != self.config.chain_id {
            return Err(ProviderError::ChainMismatch {
                expected: self.config.chain_id,
                actual: chain_id,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC, falling through the provider list.
    pub async fn get_chain_id(&self) -> Result<u64, ProviderError> {
        for (i, provider) in self.providers.iter().enumerate() {
            let fut = provider.get_chain_id();
            match timeout(self.timeout_duration, fut).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, error = %e, "RPC error, trying next provider");
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, "RPC timeout, trying next provider");
                }
            }
        }
        Err(ProviderError::Rpc("all RPC providers failed".to_string()))
    }

    /// Build a signing provider on the primary endpoint for transaction
    /// submission. The nonce, gas price, and chain id are filled by the
    /// provider stack.
    pub fn with_signer(&self, signer: &SessionSigner) -> Result<DynProvider, ProviderError> {
        let url: url::Url = self.config.rpc_url.parse().map_err(|e| {
            ProviderError::Rpc(format!("invalid RPC URL '{}': {}", self.config.rpc_url, e))
        })?;
        let wallet = EthereumWallet::from(signer.key().clone());
        Ok(ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(url)
            .erased())
    }

    /// Read providers in failover order.
    pub fn providers(&self) -> &[DynProvider] {
        &self.providers
    }

    /// Per-call timeout for RPC requests issued through this client.
    pub fn timeout(&self) -> Duration {
        self.timeout_duration
    }

    /// The chain configuration this client was built from.
    pub fn config(&self) -> &ChainConfig {
        &self.config
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("rpc_url", &self.config.rpc_url)
            .field("chain_id", &self.config.chain_id)
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> ChainConfig {
        ChainConfig {
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            chain_id: 31337,
            rpc_timeout_secs: 1,
            contract_address: String::new(),
            gas_limit: 21_000,
        }
    }

    #[tokio::test]
    async fn test_client_creation_without_endpoint() {
        // Construction succeeds even when nothing listens at the endpoint.
        let client = ChainClient::new(test_config()).await.unwrap();
        assert_eq!(client.config().chain_id, 31337);
        assert_eq!(client.providers().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_primary_url_rejected() {
        let mut config = test_config();
        config.rpc_url = "::not a url::".to_string();
        let err = ChainClient::new(config).await.unwrap_err();
        assert!(err.to_string().contains("invalid RPC URL"));
    }

    #[tokio::test]
    async fn test_invalid_failover_url_skipped() {
        let mut config = test_config();
        config.failover_urls = vec!["::bad::".to_string(), "http://localhost:8546".to_string()];
        let client = ChainClient::new(config).await.unwrap();
        // Primary plus the one parseable failover.
        assert_eq!(client.providers().len(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_endpoints_error_out() {
        let mut config = test_config();
        config.rpc_url = "http://127.0.0.1:1".to_string();
        let client = ChainClient::new(config).await.unwrap();
        let err = client.get_chain_id().await.unwrap_err();
        assert!(err.to_string().contains("all RPC providers failed"));
    }
}
