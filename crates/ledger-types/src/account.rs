use std::fmt;

/// Address-keyed balance holder.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Account {
    /// Unique key of the account
    pub address: String,
    /// Current balance
    pub balance: i64,
}

impl Account {
    /// Create a new zero-balance account
    pub fn new(address: impl Into<String>) -> Self {
        Self::with_balance(address, 0)
    }

    /// Create an account holding `balance`
    pub fn with_balance(address: impl Into<String>, balance: i64) -> Self {
        Self {
            address: address.into(),
            balance,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Add balance
    pub fn credit(&mut self, amount: i64) {
        self.balance += amount;
    }

    /// Subtract balance
    pub fn debit(&mut self, amount: i64) {
        self.balance -= amount;
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Account {{ address: {}, balance: {} }}", self.address, self.balance)
    }
}
