//! Ledger configuration.
//!
//! Identity metadata for a ledger instance, loadable from TOML.

use serde::{Deserialize, Serialize};

/// Ledger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Ledger name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Seed the genesis hash is derived from
    pub seed: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            name: "ledger".to_string(),
            description: "in-memory hash-chained ledger".to_string(),
            seed: "genesis".to_string(),
        }
    }
}

impl LedgerConfig {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        seed: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            seed: seed.into(),
        }
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Render configuration as TOML text.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LedgerConfig::default();
        assert_eq!(config.name, "ledger");
        assert_eq!(config.seed, "genesis");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = LedgerConfig::from_toml_str(r#"name = "test""#).unwrap();
        assert_eq!(config.name, "test");
        assert_eq!(config.seed, LedgerConfig::default().seed);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = LedgerConfig::new("test", "test ledger 2025", "chapman");
        let text = config.to_toml_string().unwrap();
        assert!(text.contains("chapman"));
        assert_eq!(LedgerConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(LedgerConfig::from_toml_str("name = ").is_err());
    }
}
