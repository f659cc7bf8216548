//! Ledger Types - Core type definitions for the hash-chained ledger.
//!
//! This crate provides the fundamental value types:
//! - Hashes (32-byte, blake3 digests)
//! - Accounts and Transactions
//! - Blocks with their balance snapshots
//! - Fixed ledger parameters

pub mod account;
pub mod block;
pub mod constants;
pub mod error;
pub mod hash;
pub mod transaction;

mod serialization;

pub use account::Account;
pub use block::{BalanceMap, Block};
pub use error::TypesError;
pub use hash::Hash;
pub use transaction::Transaction;
