//! Configuration management.
//!
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SessionConfig (validated, immutable)
//! ```
//!
//! Config is immutable once loaded; all fields have defaults so a minimal
//! (or absent) config file works out of the box against a local devnet.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{BehaviorConfig, CacheConfig, ChainConfig, SessionConfig};
