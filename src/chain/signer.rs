//! Session signer: local private-key management.
//!
//! # Security
//! - Private keys are loaded from explicit input or an environment variable
//! - Keys are never logged or serialized

use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::provider::ProviderError;

/// Environment variable name for the session private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "ETHSESSION_PRIVATE_KEY";

/// Local signing key for the session account.
#[derive(Clone)]
pub struct SessionSigner {
    signer: PrivateKeySigner,
}

impl SessionSigner {
    /// Create a signer from a hex-encoded private key string, with or
    /// without the `0x` prefix.
    pub fn from_private_key(private_key_hex: &str) -> Result<Self, ProviderError> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| ProviderError::Wallet(format!("invalid private key format: {}", e)))?;

        tracing::info!(address = %signer.address(), "Session signer initialized");

        Ok(Self { signer })
    }

    /// Load the signer from the `ETHSESSION_PRIVATE_KEY` environment
    /// variable.
    pub fn from_env() -> Result<Self, ProviderError> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            ProviderError::Wallet(format!(
                "environment variable {} not set",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;

        Self::from_private_key(&private_key)
    }

    /// The account address this signer controls.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// The underlying key, for attaching to a signing provider.
    pub(crate) fn key(&self) -> &PrivateKeySigner {
        &self.signer
    }
}

impl std::fmt::Debug for SessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Key material stays out of Debug output.
        f.debug_struct("SessionSigner")
            .field("address", &self.signer.address())
            .finish()
    }
}
