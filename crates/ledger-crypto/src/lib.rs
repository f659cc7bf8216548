//! Ledger Crypto - Hashing primitives for the hash-chained ledger.
//!
//! This crate provides:
//! - Blake3 hashing helpers
//! - Merkle root construction over transaction hashes

pub mod hash;
pub mod merkle;

pub use hash::{hash_multi, hash_pair, hash_with_domain};
pub use merkle::{merkle_root, MerkleTree};
