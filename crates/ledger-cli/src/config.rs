//! CLI configuration loading.

use ledger_core::LedgerConfig;
use std::path::Path;

/// Load a ledger configuration from a TOML file.
pub fn load_config(path: &Path) -> anyhow::Result<LedgerConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
    let config = LedgerConfig::from_toml_str(&contents)
        .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
    Ok(config)
}
