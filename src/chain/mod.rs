//! Chain integration: production implementations of the collaborator traits.
//!
//! ```text
//! Environment / config (private key, RPC URLs, contract address)
//!     → signer.rs (key loading, address derivation)
//!     → client.rs (RPC connection, failover, timeouts)
//!     → provider.rs (WalletProvider over signer + client)
//!     → ledger.rs (LedgerContract over sol! bindings)
//! ```
//!
//! # Security Constraints
//! - Private keys only from explicit input or environment variables
//! - Key material is never logged
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod ledger;
pub mod provider;
pub mod signer;

pub use client::ChainClient;
pub use ledger::RpcLedger;
pub use provider::RpcWalletProvider;
pub use signer::SessionSigner;
