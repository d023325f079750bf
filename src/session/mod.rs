//! The wallet/transaction session manager.
//!
//! Bridges the wallet provider, ledger contract, and durable cache into
//! reactive session state. UI layers subscribe to a `watch` channel of
//! [`SessionSnapshot`]s and drive the manager through its operations.

pub mod error;
pub mod form;
pub mod manager;
pub mod state;

pub use error::{SessionError, SubmitOutcome};
pub use form::{FormField, TransferForm};
pub use manager::SessionManager;
pub use state::{SessionSnapshot, TransactionRecord};
