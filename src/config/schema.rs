//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the session manager.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// Chain connectivity and contract settings.
    pub chain: ChainConfig,

    /// Durable count-cache settings.
    pub cache: CacheConfig,

    /// Post-submission behavior toggles.
    pub behavior: BehaviorConfig,
}

/// Chain connectivity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Failover JSON-RPC endpoint URLs, tried in order.
    pub failover_urls: Vec<String>,

    /// Chain ID (e.g., 1 for Ethereum mainnet, 31337 for local Anvil).
    pub chain_id: u64,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Address of the deployed transfer-ledger contract.
    pub contract_address: String,

    /// Fixed gas limit passed through on every value transfer.
    /// 21_000 is the cost of a plain transfer; no estimation is done.
    pub gas_limit: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            failover_urls: Vec::new(),
            chain_id: 31337,
            rpc_timeout_secs: 10,
            contract_address: String::new(),
            gas_limit: 21_000,
        }
    }
}

/// Durable cache configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Path of the JSON cache file. `None` keeps the cache in memory only.
    pub path: Option<String>,

    /// Key under which the transaction count is stored.
    pub count_key: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: None,
            count_key: "transaction_count".to_string(),
        }
    }
}

/// Post-submission behavior.
///
/// Both toggles exist because the upstream behavior was ambiguous: the
/// defaults reproduce it exactly, the inverses are the plausible fixes.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Re-run full session hydration (account restore, cached-count
    /// refresh, transaction refetch) after a successful submission.
    /// When `false` only the in-memory count is updated.
    pub rehydrate_on_submit: bool,

    /// Clear the transfer form after a successful submission.
    pub clear_form_on_submit: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            rehydrate_on_submit: true,
            clear_form_on_submit: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.chain.gas_limit, 21_000);
        assert_eq!(config.chain.rpc_timeout_secs, 10);
        assert_eq!(config.cache.count_key, "transaction_count");
        assert!(config.behavior.rehydrate_on_submit);
        assert!(!config.behavior.clear_form_on_submit);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: SessionConfig = toml::from_str(
            r#"
            [chain]
            rpc_url = "https://rpc.example.org"
            chain_id = 1
            contract_address = "0x5FbDB2315678afecb367f032d93F642f64180aa3"

            [behavior]
            rehydrate_on_submit = false
            "#,
        )
        .unwrap();

        assert_eq!(config.chain.rpc_url, "https://rpc.example.org");
        assert_eq!(config.chain.chain_id, 1);
        assert_eq!(config.chain.gas_limit, 21_000);
        assert!(!config.behavior.rehydrate_on_submit);
        assert!(!config.behavior.clear_form_on_submit);
        assert!(config.cache.path.is_none());
    }
}
