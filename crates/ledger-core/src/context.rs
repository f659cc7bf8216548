//! Owned slot for the single logical ledger of a process.

use crate::config::LedgerConfig;
use crate::ledger::Ledger;

/// Holds at most one [`Ledger`].
///
/// The first [`get_instance`](LedgerContext::get_instance) call constructs the
/// ledger; later calls return the same instance and ignore their arguments.
/// The context is passed explicitly to whoever drives the ledger.
#[derive(Debug, Default)]
pub struct LedgerContext {
    ledger: Option<Ledger>,
}

impl LedgerContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the ledger, constructing it on first use.
    pub fn get_instance(&mut self, name: &str, description: &str, seed: &str) -> &mut Ledger {
        self.ledger.get_or_insert_with(|| Ledger::new(name, description, seed))
    }

    /// [`get_instance`](LedgerContext::get_instance) with arguments from a config.
    pub fn get_instance_from_config(&mut self, config: &LedgerConfig) -> &mut Ledger {
        self.get_instance(&config.name, &config.description, &config.seed)
    }

    pub fn is_initialized(&self) -> bool {
        self.ledger.is_some()
    }

    pub fn ledger(&self) -> Option<&Ledger> {
        self.ledger.as_ref()
    }

    pub fn ledger_mut(&mut self) -> Option<&mut Ledger> {
        self.ledger.as_mut()
    }
}
