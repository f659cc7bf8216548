//! Runs script commands against a ledger and renders one result line each.

use crate::command::{Command, CommandError};
use ledger_core::{Ledger, LedgerConfig, LedgerContext, LedgerError};
use std::io::{self, BufRead, Write};
use thiserror::Error;

/// Failure of a single script command.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Totals for a processed script.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProcessSummary {
    pub commands: usize,
    pub failures: usize,
}

/// Line-oriented interpreter owning the ledger context.
#[derive(Debug, Default)]
pub struct CommandProcessor {
    context: LedgerContext,
    json: bool,
}

impl CommandProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render blocks and transactions as single-line JSON.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Construct the ledger up front; a later `create-ledger` is a no-op.
    pub fn initialize(&mut self, config: &LedgerConfig) -> &Ledger {
        self.context.get_instance_from_config(config)
    }

    pub fn context(&self) -> &LedgerContext {
        &self.context
    }

    /// Execute one script line.
    ///
    /// Returns `None` for blank lines; comment lines are echoed.
    pub fn execute_line(&mut self, line: &str) -> Option<Result<String, ExecError>> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if line.starts_with('#') {
            return Some(Ok(line.to_string()));
        }

        Some(Command::parse(line).map_err(ExecError::from).and_then(|command| self.execute(command)))
    }

    /// Execute a parsed command.
    pub fn execute(&mut self, command: Command) -> Result<String, ExecError> {
        let json = self.json;
        let ledger = match &command {
            Command::CreateLedger {
                name,
                description,
                seed,
            } => self.context.get_instance(name, description, seed),
            _ => self
                .context
                .ledger_mut()
                .ok_or(CommandError::NotInitialized)?,
        };
        Self::execute_on(ledger, command, json)
    }

    fn execute_on(ledger: &mut Ledger, command: Command, json: bool) -> Result<String, ExecError> {
        let output = match command {
            Command::CreateLedger { .. } => format!(
                "Ledger: {} ({}) seed {}",
                ledger.name(),
                ledger.description(),
                ledger.seed()
            ),
            Command::CreateAccount { address } => {
                let account = ledger.create_account(&address)?;
                format!("Created account {}", account.address())
            }
            Command::ProcessTransaction(tx) => {
                let id = ledger.process_transaction(tx)?;
                format!("Processed transaction {}", id)
            }
            Command::GetAccountBalance { address } => {
                let balance = ledger.get_account_balance(&address)?;
                format!("Balance of {}: {}", address, balance)
            }
            Command::GetAccountBalances => match ledger.get_account_balances() {
                Some(balances) => {
                    let entries: Vec<String> = balances
                        .iter()
                        .map(|(address, balance)| format!("{}={}", address, balance))
                        .collect();
                    format!("Balances: {}", entries.join(", "))
                }
                None => "Balances: no block committed".to_string(),
            },
            Command::GetAccount { address } => match ledger.get_account(&address) {
                Some(account) => account.to_string(),
                None => format!("Account not found: {:?}", address),
            },
            Command::GetAccounts => {
                let entries: Vec<String> = ledger
                    .accounts()
                    .map(|account| format!("{}={}", account.address(), account.balance()))
                    .collect();
                format!("Accounts: {}", entries.join(", "))
            }
            Command::GetTransaction { id } => match ledger.get_transaction(&id) {
                Some(tx) if json => serde_json::to_string(tx)?,
                Some(tx) => tx.to_string(),
                None => format!("Transaction not found: {:?}", id),
            },
            Command::GetBlock { number } => {
                let block = ledger.get_block(number)?;
                if json {
                    serde_json::to_string(block)?
                } else {
                    block.to_string()
                }
            }
            Command::GetNumberOfBlocks => {
                format!("Number of blocks: {}", ledger.get_number_of_blocks())
            }
            Command::Validate => {
                ledger.validate()?;
                format!("Valid: {} blocks", ledger.get_number_of_blocks())
            }
            Command::Reset => {
                ledger.reset();
                format!("Reset ledger {}", ledger.name())
            }
        };

        Ok(output)
    }

    /// Execute every line of `reader`, writing one result line per command.
    ///
    /// Failures are reported inline and processing continues.
    pub fn process<R: BufRead, W: Write>(
        &mut self,
        reader: R,
        writer: &mut W,
    ) -> io::Result<ProcessSummary> {
        let mut summary = ProcessSummary::default();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let Some(result) = self.execute_line(&line) else {
                continue;
            };

            summary.commands += 1;
            match result {
                Ok(output) => writeln!(writer, "{}", output)?,
                Err(err) => {
                    summary.failures += 1;
                    tracing::debug!("Line {} failed: {}", index + 1, err);
                    writeln!(writer, "Error (line {}): {}", index + 1, err)?;
                }
            }
        }

        Ok(summary)
    }
}
