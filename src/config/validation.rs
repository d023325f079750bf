//! Configuration validation.
//!
//! Semantic checks on top of serde's syntactic ones. Returns all errors,
//! not just the first, so a bad config file can be fixed in one pass.

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::SessionConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("chain.rpc_url must not be empty")]
    EmptyRpcUrl,

    #[error("chain.rpc_url is not a valid URL: {0}")]
    InvalidRpcUrl(String),

    #[error("chain.failover_urls[{index}] is not a valid URL: {url}")]
    InvalidFailoverUrl { index: usize, url: String },

    #[error("chain.chain_id must be non-zero")]
    ZeroChainId,

    #[error("chain.gas_limit must be non-zero")]
    ZeroGasLimit,

    #[error("chain.contract_address is not a valid address: {0}")]
    InvalidContractAddress(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &SessionConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.chain.rpc_url.is_empty() {
        errors.push(ValidationError::EmptyRpcUrl);
    } else if config.chain.rpc_url.parse::<url::Url>().is_err() {
        errors.push(ValidationError::InvalidRpcUrl(config.chain.rpc_url.clone()));
    }

    for (index, url) in config.chain.failover_urls.iter().enumerate() {
        if url.parse::<url::Url>().is_err() {
            errors.push(ValidationError::InvalidFailoverUrl {
                index,
                url: url.clone(),
            });
        }
    }

    if config.chain.chain_id == 0 {
        errors.push(ValidationError::ZeroChainId);
    }

    if config.chain.gas_limit == 0 {
        errors.push(ValidationError::ZeroGasLimit);
    }

    // An empty contract address is allowed: embedders driving the session
    // purely through injected collaborators never touch the chain module.
    if !config.chain.contract_address.is_empty()
        && config.chain.contract_address.parse::<Address>().is_err()
    {
        errors.push(ValidationError::InvalidContractAddress(
            config.chain.contract_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
