//! Fixed ledger parameters.

/// Transactions per committed block.
pub const BLOCK_CAPACITY: usize = 10;

/// Smallest fee a transaction may carry.
pub const MIN_FEE: i64 = 10;

/// Longest note, in characters.
pub const MAX_NOTE_LENGTH: usize = 1024;

/// Largest transferable amount.
pub const MAX_AMOUNT: i64 = i32::MAX as i64;

/// Address of the funding account seeded at genesis.
pub const MASTER_ADDRESS: &str = "master";

/// Balance of the master account at genesis; also the total supply.
pub const MASTER_INITIAL_BALANCE: i64 = i32::MAX as i64;

/// Domain separator for the genesis hash derived from the ledger seed.
pub const GENESIS_DOMAIN: &str = "ledger-genesis";

/// Domain separator for block hashes, keeping them apart from Merkle nodes.
pub const BLOCK_HASH_DOMAIN: &str = "ledger-block";
