//! Transaction validation logic.
//!
//! Checks run in a fixed order and the first failure wins, so a transaction
//! that breaks several rules always reports the same reason.

use crate::error::Reason;
use ledger_types::constants::{MAX_AMOUNT, MAX_NOTE_LENGTH, MIN_FEE};
use ledger_types::{Account, Transaction};
use std::collections::{BTreeMap, HashSet};

/// Ledger state a transaction is validated against.
#[derive(Debug)]
pub struct ValidationContext<'a> {
    /// Live accounts, by address
    pub accounts: &'a BTreeMap<String, Account>,
    /// Every transaction id already accepted
    pub known_ids: &'a HashSet<String>,
}

impl<'a> ValidationContext<'a> {
    pub fn new(
        accounts: &'a BTreeMap<String, Account>,
        known_ids: &'a HashSet<String>,
    ) -> Self {
        Self {
            accounts,
            known_ids,
        }
    }
}

/// Validate a transaction against the current ledger state.
///
/// Order: amount range, fee floor, note length, id uniqueness, then account
/// existence and funds.
pub fn validate_transaction(tx: &Transaction, context: &ValidationContext) -> Result<(), Reason> {
    validate_amount(tx)?;
    validate_fee(tx)?;
    validate_note(tx)?;
    validate_unique_id(tx, context)?;
    validate_funds(tx, context)
}

fn validate_amount(tx: &Transaction) -> Result<(), Reason> {
    if tx.amount < 0 || tx.amount > MAX_AMOUNT {
        return Err(Reason::AmountOutOfRange { amount: tx.amount });
    }
    Ok(())
}

fn validate_fee(tx: &Transaction) -> Result<(), Reason> {
    if tx.fee < MIN_FEE {
        return Err(Reason::FeeTooLow {
            fee: tx.fee,
            minimum: MIN_FEE,
        });
    }
    Ok(())
}

fn validate_note(tx: &Transaction) -> Result<(), Reason> {
    let length = tx.note.chars().count();
    if length > MAX_NOTE_LENGTH {
        return Err(Reason::NoteTooLong {
            length,
            max: MAX_NOTE_LENGTH,
        });
    }
    Ok(())
}

fn validate_unique_id(tx: &Transaction, context: &ValidationContext) -> Result<(), Reason> {
    if context.known_ids.contains(&tx.id) {
        return Err(Reason::DuplicateTransactionId { id: tx.id.clone() });
    }
    Ok(())
}

fn validate_funds(tx: &Transaction, context: &ValidationContext) -> Result<(), Reason> {
    let payer = context
        .accounts
        .get(&tx.payer)
        .ok_or_else(|| Reason::AccountDoesNotExist {
            address: tx.payer.clone(),
        })?;

    if !context.accounts.contains_key(&tx.receiver) {
        return Err(Reason::AccountDoesNotExist {
            address: tx.receiver.clone(),
        });
    }

    let need = tx.total_cost();
    if payer.balance < need {
        return Err(Reason::InsufficientFunds {
            have: payer.balance,
            need,
        });
    }
    Ok(())
}
