//! The ledger: accounts, the open block and the committed chain.

use crate::audit::{genesis_balances, validate_chain};
use crate::config::LedgerConfig;
use crate::error::{Action, LedgerError, Reason};
use crate::validation::{validate_transaction, ValidationContext};
use ledger_crypto::{hash_with_domain, merkle_root};
use ledger_types::constants::{GENESIS_DOMAIN, MASTER_ADDRESS, MASTER_INITIAL_BALANCE};
use ledger_types::{Account, BalanceMap, Block, Hash, Transaction};
use std::collections::{BTreeMap, HashSet};

/// In-memory ledger batching transactions into hash-chained blocks.
///
/// Accounts live in an address-indexed arena owned by the ledger. Blocks
/// never reference accounts; a committed block carries an owned copy of
/// every balance taken at the commit instant. The open block starts from the
/// balances it inherits and registers accounts created while it is open.
#[derive(Debug)]
pub struct Ledger {
    name: String,
    description: String,
    seed: String,
    genesis_hash: Hash,
    /// Committed blocks, `blocks[i].number == i + 1`
    blocks: Vec<Block>,
    /// Block currently accepting transactions
    uncommitted: Block,
    accounts: BTreeMap<String, Account>,
    /// Ids of every accepted transaction, committed or not
    transaction_ids: HashSet<String>,
}

impl Ledger {
    /// Create a ledger at genesis: master funded, block #1 open.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        seed: impl Into<String>,
    ) -> Self {
        let seed = seed.into();
        let genesis_hash = genesis_hash(&seed);

        let mut ledger = Self {
            name: name.into(),
            description: description.into(),
            seed,
            genesis_hash,
            blocks: Vec::new(),
            uncommitted: open_block(1, genesis_hash, genesis_balances()),
            accounts: BTreeMap::new(),
            transaction_ids: HashSet::new(),
        };
        ledger.seed_master();

        tracing::info!(
            "Created ledger {} (genesis {})",
            ledger.name,
            ledger.genesis_hash
        );
        ledger
    }

    pub fn from_config(config: &LedgerConfig) -> Self {
        Self::new(&config.name, &config.description, &config.seed)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    /// `previous_hash` of block #1.
    pub fn genesis_hash(&self) -> &Hash {
        &self.genesis_hash
    }

    /// Drop every block, account and transaction and return to genesis.
    /// Name, description and seed are kept.
    pub fn reset(&mut self) {
        self.blocks.clear();
        self.accounts.clear();
        self.transaction_ids.clear();
        self.uncommitted = open_block(1, self.genesis_hash, genesis_balances());
        self.seed_master();

        tracing::info!("Reset ledger {}", self.name);
    }

    fn seed_master(&mut self) {
        self.accounts.insert(
            MASTER_ADDRESS.to_string(),
            Account::with_balance(MASTER_ADDRESS, MASTER_INITIAL_BALANCE),
        );
    }

    /// Register a new zero-balance account.
    pub fn create_account(&mut self, address: &str) -> Result<&Account, LedgerError> {
        if self.accounts.contains_key(address) {
            return Err(LedgerError::new(
                Action::CreateAccount,
                Reason::AccountAlreadyExists {
                    address: address.to_string(),
                },
            ));
        }

        self.uncommitted
            .account_balance_map_mut()
            .insert(address.to_string(), 0);

        tracing::debug!("Created account {}", address);
        Ok(self
            .accounts
            .entry(address.to_string())
            .or_insert_with(|| Account::new(address)))
    }

    /// Validate and apply a transaction, committing the open block once it
    /// is full. Returns the transaction id.
    ///
    /// Nothing is mutated when validation fails.
    pub fn process_transaction(&mut self, tx: Transaction) -> Result<String, LedgerError> {
        let context = ValidationContext::new(&self.accounts, &self.transaction_ids);
        if let Err(reason) = validate_transaction(&tx, &context) {
            tracing::debug!("Rejected transaction {}: {}", tx.id, reason);
            return Err(LedgerError::new(Action::ProcessTransaction, reason));
        }

        // Both accounts exist: checked by validation.
        if let Some(payer) = self.accounts.get_mut(&tx.payer) {
            payer.debit(tx.total_cost());
        }
        if let Some(receiver) = self.accounts.get_mut(&tx.receiver) {
            receiver.credit(tx.amount);
        }

        let id = tx.id.clone();
        self.transaction_ids.insert(id.clone());
        self.uncommitted.transactions_mut().push(tx);

        tracing::debug!(
            "Accepted transaction {} into block #{} ({} pending)",
            id,
            self.uncommitted.number(),
            self.uncommitted.tx_count()
        );

        if self.uncommitted.is_full() {
            self.commit_block();
        }

        Ok(id)
    }

    /// Seal the open block and open its successor.
    fn commit_block(&mut self) {
        let root = merkle_root(&self.uncommitted.leaf_hashes());
        let hash = Block::compute_hash(self.uncommitted.previous_hash(), &root);
        let snapshot: BalanceMap = self
            .accounts
            .iter()
            .map(|(address, account)| (address.clone(), account.balance))
            .collect();

        let next = open_block(self.uncommitted.number() + 1, hash, snapshot.clone());
        let mut block = std::mem::replace(&mut self.uncommitted, next);
        block.set_hash(hash);
        *block.account_balance_map_mut() = snapshot;

        tracing::info!(
            "Committed block #{} {} (merkle root {})",
            block.number(),
            hash,
            root
        );
        self.blocks.push(block);
    }

    /// Balance of `address` as of the most recently committed block.
    ///
    /// Activity in the open block is not visible here.
    pub fn get_account_balance(&self, address: &str) -> Result<i64, LedgerError> {
        self.blocks
            .last()
            .and_then(|block| block.get_account(address))
            .map(|account| account.balance())
            .ok_or_else(|| {
                LedgerError::new(
                    Action::GetAccountBalance,
                    Reason::AccountDoesNotExist {
                        address: address.to_string(),
                    },
                )
            })
    }

    /// Snapshot of the most recently committed block, if any.
    pub fn get_account_balances(&self) -> Option<&BalanceMap> {
        self.blocks.last().map(Block::account_balance_map)
    }

    /// Live account, including uncommitted activity.
    pub fn get_account(&self, address: &str) -> Option<&Account> {
        self.accounts.get(address)
    }

    /// Live accounts ordered by address.
    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn get_uncommitted_block(&self) -> &Block {
        &self.uncommitted
    }

    /// Committed block by 1-based number.
    pub fn get_block(&self, number: i64) -> Result<&Block, LedgerError> {
        let index = self.block_index(number)?;
        Ok(&self.blocks[index])
    }

    /// Mutable access to a committed block.
    ///
    /// Changes made here are not re-hashed; [`Ledger::validate`] reports them.
    pub fn get_block_mut(&mut self, number: i64) -> Result<&mut Block, LedgerError> {
        let index = self.block_index(number)?;
        Ok(&mut self.blocks[index])
    }

    fn block_index(&self, number: i64) -> Result<usize, LedgerError> {
        usize::try_from(number)
            .ok()
            .filter(|n| (1..=self.blocks.len()).contains(n))
            .map(|n| n - 1)
            .ok_or_else(|| {
                LedgerError::new(Action::GetBlock, Reason::BlockDoesNotExist { number })
            })
    }

    /// Number of committed blocks.
    pub fn get_number_of_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Find a transaction in the open block or any committed block.
    pub fn get_transaction(&self, id: &str) -> Option<&Transaction> {
        self.get_transaction_block(id)
            .and_then(|block| block.find_transaction(id))
    }

    /// Block holding the transaction `id`, open or committed.
    pub fn get_transaction_block(&self, id: &str) -> Option<&Block> {
        if id.is_empty() || !self.transaction_ids.contains(id) {
            return None;
        }
        std::iter::once(&self.uncommitted)
            .chain(self.blocks.iter().rev())
            .find(|block| block.find_transaction(id).is_some())
    }

    /// Re-derive every chain invariant from the stored transaction lists.
    ///
    /// Purely diagnostic: never mutates the ledger.
    pub fn validate(&self) -> Result<(), LedgerError> {
        validate_chain(&self.blocks, &self.genesis_hash).map_err(|reason| {
            tracing::warn!("Ledger {} failed validation: {}", self.name, reason);
            LedgerError::new(Action::Validate, reason)
        })
    }
}

fn open_block(number: u64, previous_hash: Hash, balances: BalanceMap) -> Block {
    let mut block = Block::new(number, previous_hash);
    *block.account_balance_map_mut() = balances;
    block
}

/// `previous_hash` of block #1 for a given seed.
pub fn genesis_hash(seed: &str) -> Hash {
    hash_with_domain(seed.as_bytes(), GENESIS_DOMAIN)
}
