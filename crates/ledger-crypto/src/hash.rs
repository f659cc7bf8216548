//! Blake3 hashing utilities.

use ledger_types::Hash;

/// Compute blake3 hash of multiple data slices
pub fn hash_multi(data: &[&[u8]]) -> Hash {
    Hash::compute_multi(data)
}

/// Hash two values together (Merkle parent node)
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    hash_multi(&[left.as_bytes(), right.as_bytes()])
}

/// Hash with a domain separator
pub fn hash_with_domain(data: &[u8], domain: &str) -> Hash {
    hash_multi(&[domain.as_bytes(), data])
}
