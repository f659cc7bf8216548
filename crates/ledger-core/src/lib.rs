//! Ledger Core - Block commit, hash chaining and validation engine.

pub mod audit;
pub mod config;
pub mod context;
pub mod error;
pub mod ledger;
pub mod validation;

pub use audit::validate_chain;
pub use config::LedgerConfig;
pub use context::LedgerContext;
pub use error::{Action, LedgerError, Reason};
pub use ledger::{genesis_hash, Ledger};
pub use validation::{validate_transaction, ValidationContext};
