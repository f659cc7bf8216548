use crate::account::Account;
use crate::constants::{BLOCK_CAPACITY, BLOCK_HASH_DOMAIN};
use crate::hash::Hash;
use crate::transaction::Transaction;
use std::collections::BTreeMap;
use std::fmt;

/// Address -> balance snapshot taken when a block commits.
pub type BalanceMap = BTreeMap<String, i64>;

/// Batch of up to [`BLOCK_CAPACITY`] transactions plus integrity metadata.
///
/// An open block has `hash == Hash::ZERO`. Its balance map holds the
/// balances it inherited; at commit both are replaced by the final values.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Block {
    /// Sequence number, starting at 1
    pub number: u64,
    /// Hash of the preceding block (genesis hash for block 1)
    pub previous_hash: Hash,
    /// `H(previous_hash ‖ merkle_root)`
    pub hash: Hash,
    /// Accepted transactions, in arrival order
    pub transactions: Vec<Transaction>,
    /// Balances of every account at the commit instant
    pub account_balance_map: BalanceMap,
}

impl Block {
    /// Open a new, empty block
    pub fn new(number: u64, previous_hash: Hash) -> Self {
        Self {
            number,
            previous_hash,
            hash: Hash::ZERO,
            transactions: Vec::with_capacity(BLOCK_CAPACITY),
            account_balance_map: BalanceMap::new(),
        }
    }

    /// Block hash over a given Merkle root of the transaction list.
    pub fn compute_hash(previous_hash: &Hash, merkle_root: &Hash) -> Hash {
        Hash::compute_multi(&[
            BLOCK_HASH_DOMAIN.as_bytes(),
            previous_hash.as_bytes(),
            merkle_root.as_bytes(),
        ])
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn previous_hash(&self) -> &Hash {
        &self.previous_hash
    }

    pub fn set_previous_hash(&mut self, previous_hash: Hash) {
        self.previous_hash = previous_hash;
    }

    pub fn hash(&self) -> &Hash {
        &self.hash
    }

    pub fn set_hash(&mut self, hash: Hash) {
        self.hash = hash;
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn transactions_mut(&mut self) -> &mut Vec<Transaction> {
        &mut self.transactions
    }

    pub fn account_balance_map(&self) -> &BalanceMap {
        &self.account_balance_map
    }

    pub fn account_balance_map_mut(&mut self) -> &mut BalanceMap {
        &mut self.account_balance_map
    }

    /// Resolve an account from this block's balance map.
    pub fn get_account(&self, address: &str) -> Option<Account> {
        self.account_balance_map
            .get(address)
            .map(|balance| Account {
                address: address.to_string(),
                balance: *balance,
            })
    }

    /// Get transaction count
    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the block has reached [`BLOCK_CAPACITY`]
    pub fn is_full(&self) -> bool {
        self.transactions.len() >= BLOCK_CAPACITY
    }

    /// Find a transaction by id within this block.
    pub fn find_transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == id)
    }

    /// Merkle leaves, one per transaction, in order.
    pub fn leaf_hashes(&self) -> Vec<Hash> {
        self.transactions.iter().map(Transaction::hash).collect()
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Block {{ number: {}, hash: {}, previous_hash: {}, txs: {} }}",
            self.number,
            self.hash,
            self.previous_hash,
            self.tx_count()
        )
    }
}
