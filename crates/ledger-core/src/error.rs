use std::fmt;
use thiserror::Error;

/// Ledger operation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    CreateAccount,
    ProcessTransaction,
    GetAccountBalance,
    GetBlock,
    Validate,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::CreateAccount => "Create Account",
            Action::ProcessTransaction => "Process Transaction",
            Action::GetAccountBalance => "Get Account Balance",
            Action::GetBlock => "Get Block",
            Action::Validate => "Validate",
        };
        f.write_str(name)
    }
}

/// Why a ledger operation failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Reason {
    #[error("Account already exists: {address}")]
    AccountAlreadyExists { address: String },

    #[error("Account does not exist: {address}")]
    AccountDoesNotExist { address: String },

    #[error("Transaction amount is out of range: {amount}")]
    AmountOutOfRange { amount: i64 },

    #[error("Transaction fee too low: minimum {minimum}, got {fee}")]
    FeeTooLow { fee: i64, minimum: i64 },

    #[error("Note length must be at most {max} characters, got {length}")]
    NoteTooLong { length: usize, max: usize },

    #[error("Transaction id must be unique: {id}")]
    DuplicateTransactionId { id: String },

    #[error("Payer has insufficient funds: have {have}, need {need}")]
    InsufficientFunds { have: i64, need: i64 },

    #[error("Block does not exist: {number}")]
    BlockDoesNotExist { number: i64 },

    #[error("No block has been committed")]
    NoBlockCommitted,

    #[error("Hash is inconsistent in block {block}")]
    HashInconsistent { block: u64 },

    #[error("Block {block} has {count} transactions, expected {expected}")]
    TransactionCountMismatch {
        block: u64,
        count: usize,
        expected: usize,
    },

    #[error("Balance does not add up: {detail}")]
    BalanceMismatch { detail: String },
}

/// Error returned by every fallible ledger operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{action} failed: {reason}")]
pub struct LedgerError {
    pub action: Action,
    pub reason: Reason,
}

impl LedgerError {
    pub fn new(action: Action, reason: Reason) -> Self {
        Self { action, reason }
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn reason(&self) -> &Reason {
        &self.reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LedgerError::new(
            Action::GetAccountBalance,
            Reason::AccountDoesNotExist {
                address: "mary".into(),
            },
        );
        assert_eq!(
            err.to_string(),
            "Get Account Balance failed: Account does not exist: mary"
        );
    }

    #[test]
    fn test_error_accessors() {
        let err = LedgerError::new(Action::Validate, Reason::HashInconsistent { block: 2 });
        assert_eq!(err.action(), Action::Validate);
        assert_eq!(err.reason(), &Reason::HashInconsistent { block: 2 });
        assert!(err.to_string().contains("block 2"));
    }
}
