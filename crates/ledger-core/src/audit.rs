//! Whole-chain validation.
//!
//! Every check is re-derived from the stored transaction lists; nothing
//! cached on the ledger is trusted.

use crate::error::Reason;
use ledger_crypto::merkle_root;
use ledger_types::constants::{BLOCK_CAPACITY, MASTER_ADDRESS, MASTER_INITIAL_BALANCE};
use ledger_types::{BalanceMap, Block, Hash};

/// Validate a committed chain starting from `genesis_hash`.
///
/// Per block, in order:
/// 1. `previous_hash` links to the prior block's stored hash
/// 2. the block holds exactly [`BLOCK_CAPACITY`] transactions
/// 3. the stored hash matches `H(previous_hash ‖ merkle_root)`
/// 4. the balance snapshot matches a replay of every transaction so far
pub fn validate_chain(blocks: &[Block], genesis_hash: &Hash) -> Result<(), Reason> {
    if blocks.is_empty() {
        return Err(Reason::NoBlockCommitted);
    }

    let mut expected_previous = *genesis_hash;
    let mut replayed = genesis_balances();

    for block in blocks {
        if block.previous_hash != expected_previous {
            return Err(Reason::HashInconsistent {
                block: block.number,
            });
        }

        if block.tx_count() != BLOCK_CAPACITY {
            return Err(Reason::TransactionCountMismatch {
                block: block.number,
                count: block.tx_count(),
                expected: BLOCK_CAPACITY,
            });
        }

        let root = merkle_root(&block.leaf_hashes());
        if Block::compute_hash(&block.previous_hash, &root) != block.hash {
            return Err(Reason::HashInconsistent {
                block: block.number,
            });
        }

        replay_block(block, &mut replayed)?;
        compare_snapshot(block, &replayed)?;

        expected_previous = block.hash;
    }

    Ok(())
}

/// Balances before any block commits.
pub fn genesis_balances() -> BalanceMap {
    let mut balances = BalanceMap::new();
    balances.insert(MASTER_ADDRESS.to_string(), MASTER_INITIAL_BALANCE);
    balances
}

fn replay_block(block: &Block, balances: &mut BalanceMap) -> Result<(), Reason> {
    for tx in block.transactions() {
        let overflow = || Reason::BalanceMismatch {
            detail: format!(
                "replaying transaction {} in block {} overflows",
                tx.id, block.number
            ),
        };

        let cost = tx.amount.checked_add(tx.fee).ok_or_else(overflow)?;

        let payer = balances.entry(tx.payer.clone()).or_insert(0);
        *payer = payer.checked_sub(cost).ok_or_else(overflow)?;

        let receiver = balances.entry(tx.receiver.clone()).or_insert(0);
        *receiver = receiver.checked_add(tx.amount).ok_or_else(overflow)?;
    }
    Ok(())
}

/// Every replayed address must appear in the snapshot with the same balance;
/// snapshot entries never touched by a transaction must still be zero.
fn compare_snapshot(block: &Block, replayed: &BalanceMap) -> Result<(), Reason> {
    let snapshot = block.account_balance_map();

    for (address, balance) in replayed {
        match snapshot.get(address) {
            Some(stored) if stored == balance => {}
            Some(stored) => {
                return Err(Reason::BalanceMismatch {
                    detail: format!(
                        "block {}: {} has {} stored, {} replayed",
                        block.number, address, stored, balance
                    ),
                });
            }
            None => {
                return Err(Reason::BalanceMismatch {
                    detail: format!("block {}: {} missing from snapshot", block.number, address),
                });
            }
        }
    }

    for (address, stored) in snapshot {
        if !replayed.contains_key(address) && *stored != 0 {
            return Err(Reason::BalanceMismatch {
                detail: format!(
                    "block {}: {} has {} stored, 0 replayed",
                    block.number, address, stored
                ),
            });
        }
    }

    Ok(())
}
