//! Script command parsing.
//!
//! One command per line. Arguments follow shell quoting rules: a quoted
//! argument may contain spaces and may be empty.

use ledger_types::Transaction;
use thiserror::Error;

/// Errors produced while turning a script line into a [`Command`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("{command}: missing argument '{argument}'")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{command}: unexpected argument '{argument}'")]
    UnexpectedArgument {
        command: &'static str,
        argument: String,
    },

    #[error("{command}: '{value}' is not a valid {argument}")]
    InvalidNumber {
        command: &'static str,
        argument: &'static str,
        value: String,
    },

    #[error("Failed to parse arguments: {0}")]
    Tokenize(String),

    #[error("Ledger not initialized; run create-ledger first")]
    NotInitialized,
}

/// A parsed script command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateLedger {
        name: String,
        description: String,
        seed: String,
    },
    CreateAccount {
        address: String,
    },
    ProcessTransaction(Transaction),
    GetAccountBalance {
        address: String,
    },
    GetAccountBalances,
    GetAccount {
        address: String,
    },
    GetAccounts,
    GetTransaction {
        id: String,
    },
    GetBlock {
        number: i64,
    },
    GetNumberOfBlocks,
    Validate,
    Reset,
}

impl Command {
    /// Parse a non-blank, non-comment line.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let tokens = tokenize(line)?;
        let mut args = Args::new(&tokens);
        let name = args.next().unwrap_or_default();

        let command = match name {
            "create-ledger" => {
                const CMD: &str = "create-ledger";
                let name = args.required(CMD, "name")?;
                Command::CreateLedger {
                    name,
                    description: args.keyword(CMD, "description")?,
                    seed: args.keyword(CMD, "seed")?,
                }
            }
            "create-account" => Command::CreateAccount {
                address: args.required("create-account", "address")?,
            },
            "process-transaction" => parse_transaction(&mut args)?,
            "get-account-balance" => Command::GetAccountBalance {
                address: args.required("get-account-balance", "address")?,
            },
            "get-account-balances" => Command::GetAccountBalances,
            "get-account" => Command::GetAccount {
                address: args.required("get-account", "address")?,
            },
            "get-accounts" => Command::GetAccounts,
            "get-transaction" => Command::GetTransaction {
                id: args.required("get-transaction", "id")?,
            },
            "get-block" => {
                const CMD: &str = "get-block";
                let value = args.required(CMD, "number")?;
                Command::GetBlock {
                    number: parse_i64(CMD, "block number", value)?,
                }
            }
            "get-number-of-blocks" => Command::GetNumberOfBlocks,
            "validate" => Command::Validate,
            "reset" => Command::Reset,
            other => return Err(CommandError::UnknownCommand(other.to_string())),
        };

        args.finish(command_name(&command))?;
        Ok(command)
    }
}

fn command_name(command: &Command) -> &'static str {
    match command {
        Command::CreateLedger { .. } => "create-ledger",
        Command::CreateAccount { .. } => "create-account",
        Command::ProcessTransaction(_) => "process-transaction",
        Command::GetAccountBalance { .. } => "get-account-balance",
        Command::GetAccountBalances => "get-account-balances",
        Command::GetAccount { .. } => "get-account",
        Command::GetAccounts => "get-accounts",
        Command::GetTransaction { .. } => "get-transaction",
        Command::GetBlock { .. } => "get-block",
        Command::GetNumberOfBlocks => "get-number-of-blocks",
        Command::Validate => "validate",
        Command::Reset => "reset",
    }
}

/// `process-transaction <id> amount <n> fee <n> note <text> payer <addr> receiver <addr>`
fn parse_transaction(args: &mut Args<'_>) -> Result<Command, CommandError> {
    const CMD: &str = "process-transaction";

    let id = args.required(CMD, "id")?;
    let amount = parse_i64(CMD, "amount", args.keyword(CMD, "amount")?)?;
    let fee = parse_i64(CMD, "fee", args.keyword(CMD, "fee")?)?;
    let note = args.keyword(CMD, "note")?;
    let payer = args.keyword(CMD, "payer")?;
    let receiver = args.keyword(CMD, "receiver")?;

    Ok(Command::ProcessTransaction(Transaction::new(
        id, amount, fee, note, payer, receiver,
    )))
}

fn parse_i64(command: &'static str, argument: &'static str, value: String) -> Result<i64, CommandError> {
    value.parse().map_err(|_| CommandError::InvalidNumber {
        command,
        argument,
        value,
    })
}

/// Cursor over a line's tokens.
struct Args<'a> {
    tokens: std::slice::Iter<'a, String>,
}

impl<'a> Args<'a> {
    fn new(tokens: &'a [String]) -> Self {
        Self {
            tokens: tokens.iter(),
        }
    }

    fn next(&mut self) -> Option<&'a str> {
        self.tokens.next().map(String::as_str)
    }

    fn required(&mut self, command: &'static str, argument: &'static str) -> Result<String, CommandError> {
        self.next()
            .map(str::to_string)
            .ok_or(CommandError::MissingArgument { command, argument })
    }

    /// Consume `<keyword> <value>` and return the value.
    fn keyword(&mut self, command: &'static str, keyword: &'static str) -> Result<String, CommandError> {
        match self.next() {
            Some(token) if token == keyword => self.required(command, keyword),
            Some(token) => Err(CommandError::UnexpectedArgument {
                command,
                argument: token.to_string(),
            }),
            None => Err(CommandError::MissingArgument {
                command,
                argument: keyword,
            }),
        }
    }

    fn finish(mut self, command: &'static str) -> Result<(), CommandError> {
        match self.next() {
            Some(extra) => Err(CommandError::UnexpectedArgument {
                command,
                argument: extra.to_string(),
            }),
            None => Ok(()),
        }
    }
}

/// Split a line into arguments, honouring shell quoting.
pub fn tokenize(line: &str) -> Result<Vec<String>, CommandError> {
    shell_words::split(line).map_err(|e| CommandError::Tokenize(e.to_string()))
}
