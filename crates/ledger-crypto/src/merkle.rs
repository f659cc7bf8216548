use crate::hash::hash_pair;
use ledger_types::Hash;

/// Binary Merkle tree using blake3.
///
/// Adjacent nodes are paired and hashed into the parent level. A trailing
/// node without a partner is promoted to the next level unchanged, so a
/// single leaf is its own root and an empty tree has root [`Hash::ZERO`].
pub struct MerkleTree {
    /// `levels[0]` holds the leaves, the last level holds the root.
    levels: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Build a Merkle tree from leaf hashes.
    pub fn from_leaves(leaves: &[Hash]) -> Self {
        if leaves.is_empty() {
            return Self { levels: vec![] };
        }

        let mut levels = vec![leaves.to_vec()];
        let mut current_level = leaves.to_vec();

        while current_level.len() > 1 {
            let next_level: Vec<Hash> = current_level
                .chunks(2)
                .map(|chunk| match chunk {
                    [left, right] => hash_pair(left, right),
                    [single] => *single,
                    _ => unreachable!("chunks(2) yields one or two nodes"),
                })
                .collect();

            levels.push(next_level.clone());
            current_level = next_level;
        }

        Self { levels }
    }

    /// Get the root hash.
    pub fn root(&self) -> Hash {
        self.levels
            .last()
            .and_then(|level| level.first())
            .copied()
            .unwrap_or(Hash::ZERO)
    }

    /// Number of leaves
    pub fn len(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Number of levels including leaves and root
    pub fn depth(&self) -> usize {
        self.levels.len()
    }
}

/// Merkle root of an ordered sequence of leaf hashes.
pub fn merkle_root(leaves: &[Hash]) -> Hash {
    MerkleTree::from_leaves(leaves).root()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn leaves(n: usize) -> Vec<Hash> {
        (0..n)
            .map(|i| Hash::compute(format!("leaf{}", i).as_bytes()))
            .collect()
    }

    #[test]
    fn test_merkle_tree_empty() {
        let tree = MerkleTree::from_leaves(&[]);
        assert_eq!(tree.root(), Hash::ZERO);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn test_merkle_tree_single_leaf() {
        let leaf = Hash::compute(b"single");
        let tree = MerkleTree::from_leaves(&[leaf]);

        assert_eq!(tree.root(), leaf);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.depth(), 1);
    }

    #[test]
    fn test_merkle_tree_two_leaves() {
        let l = leaves(2);
        let tree = MerkleTree::from_leaves(&l);

        assert_eq!(tree.root(), hash_pair(&l[0], &l[1]));
    }

    #[test]
    fn test_merkle_tree_promotes_unpaired_node() {
        let l = leaves(3);
        let tree = MerkleTree::from_leaves(&l);

        let expected = hash_pair(&hash_pair(&l[0], &l[1]), &l[2]);
        assert_eq!(tree.root(), expected);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_merkle_tree_ten_leaves() {
        let l = leaves(10);

        // 10 -> 5 -> 3 -> 2 -> 1
        let p: Vec<Hash> = l.chunks(2).map(|c| hash_pair(&c[0], &c[1])).collect();
        let q = [hash_pair(&p[0], &p[1]), hash_pair(&p[2], &p[3]), p[4]];
        let r = [hash_pair(&q[0], &q[1]), q[2]];
        let expected = hash_pair(&r[0], &r[1]);

        let tree = MerkleTree::from_leaves(&l);
        assert_eq!(tree.root(), expected);
        assert_eq!(tree.depth(), 5);
    }

    #[test]
    fn test_merkle_order_matters() {
        let mut l = leaves(4);
        let root = merkle_root(&l);
        l.swap(0, 1);
        assert_ne!(merkle_root(&l), root);
    }

    proptest! {
        #[test]
        fn prop_root_changes_when_any_leaf_changes(n in 1usize..24, idx in 0usize..24) {
            let mut l = leaves(n);
            let idx = idx % n;
            let root = merkle_root(&l);

            l[idx] = Hash::compute(b"tampered");
            prop_assert_ne!(merkle_root(&l), root);
        }

        #[test]
        fn prop_root_is_deterministic(n in 0usize..32) {
            let l = leaves(n);
            prop_assert_eq!(merkle_root(&l), MerkleTree::from_leaves(&l).root());
        }
    }
}
