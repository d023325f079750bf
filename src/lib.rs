//! Wallet/Transaction Session Manager
//!
//! State-management core for an Ethereum transfer application. Bridges three
//! collaborators it does not own into reactive session state consumable by
//! any UI layer: a wallet provider (account discovery, authorization, signed
//! value transfers), a deployed ledger contract (transfer record storage),
//! and a durable key-value cache (last known record count).
//!
//! ```text
//!                 ┌─────────────────────────────────────────────┐
//!                 │               SESSION MANAGER                │
//!                 │                                              │
//!   UI events ────┼─▶ connect / update_form_field /              │
//!                 │   submit_transfer                            │
//!                 │        │                                     │
//!                 │        ▼                                     │
//!                 │  ┌──────────┐   ┌──────────┐   ┌──────────┐  │
//!                 │  │ provider │   │  ledger  │   │  cache   │  │
//!                 │  │  (trait) │   │  (trait) │   │  (trait) │  │
//!                 │  └────┬─────┘   └────┬─────┘   └────┬─────┘  │
//!                 │       │              │              │        │
//!   UI state ◀────┼── watch::Receiver<SessionSnapshot>  │        │
//!                 └───────┼──────────────┼──────────────┼────────┘
//!                         ▼              ▼              ▼
//!                    wallet RPC     transfers       JSON file
//!                    (alloy)        contract        (origin-scoped)
//! ```
//!
//! The collaborators are trait seams so embedders and tests can substitute
//! their own; `chain` provides the production alloy-backed implementations.

pub mod cache;
pub mod chain;
pub mod config;
pub mod ledger;
pub mod logging;
pub mod provider;
pub mod session;
pub mod units;

pub use config::SessionConfig;
pub use session::{
    FormField, SessionError, SessionManager, SessionSnapshot, SubmitOutcome, TransactionRecord,
    TransferForm,
};
