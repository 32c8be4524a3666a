//! Bank configuration loaded from TOML
//!
//! ```toml
//! name = "Banco del Estado"
//! log_level = "debug"
//!
//! [accounts]
//! duplicates = "reject"
//! ```
//!
//! Every field is optional.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// File not found
    #[error("config file not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Validation error
    #[error("validation error: {0}")]
    Validation(String),
}

/// What `Bank::add_account` does with a handle that is already registered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Append it again
    #[default]
    Allow,
    /// Refuse with `LedgerError::DuplicateAccount`
    Reject,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Allow => write!(f, "allow"),
            DuplicatePolicy::Reject => write!(f, "reject"),
        }
    }
}

/// Account registration settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountsConfig {
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

/// Root configuration of a bank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankConfig {
    /// Bank name
    #[serde(default)]
    pub name: String,

    /// Default log filter for binaries embedding the ledger
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Account registration settings
    #[serde(default)]
    pub accounts: AccountsConfig,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            log_level: default_log_level(),
            accounts: AccountsConfig::default(),
        }
    }
}

impl BankConfig {
    /// Config with the given bank name and defaults elsewhere
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the duplicate registration policy
    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.accounts.duplicates = policy;
        self
    }

    /// Load configuration from file
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::load_str(&content)?;

        tracing::debug!(path = %path.display(), bank = %config.name, "Configuration loaded");
        Ok(config)
    }

    /// Load configuration from string
    pub fn load_str(content: &str) -> Result<Self, ConfigError> {
        let config: BankConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.name.is_empty() && self.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "bank name cannot be blank".to_string(),
            ));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::Validation(format!(
                "unknown log level '{}'",
                self.log_level
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_string() {
        let config_str = r#"
name = "Banco del Estado"
log_level = "debug"

[accounts]
duplicates = "reject"
"#;

        let config = BankConfig::load_str(config_str).unwrap();

        assert_eq!(config.name, "Banco del Estado");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.accounts.duplicates, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_defaults() {
        let config = BankConfig::load_str("").unwrap();

        assert_eq!(config, BankConfig::default());
        assert!(config.name.is_empty());
        assert_eq!(config.log_level, "info");
        assert_eq!(config.accounts.duplicates, DuplicatePolicy::Allow);
    }

    #[test]
    fn test_validation_blank_name() {
        let result = BankConfig::load_str("name = \"   \"");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validation_log_level() {
        let result = BankConfig::load_str("log_level = \"loud\"");
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_unknown_policy_is_parse_error() {
        let result = BankConfig::load_str("[accounts]\nduplicates = \"merge\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "name = \"Banco Central\"").unwrap();

        let config = BankConfig::load_file(file.path()).unwrap();
        assert_eq!(config.name, "Banco Central");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = BankConfig::load_file(dir.path().join("bank.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_builder_helpers() {
        let config = BankConfig::named("Banco").with_duplicates(DuplicatePolicy::Reject);
        assert_eq!(config.name, "Banco");
        assert_eq!(config.accounts.duplicates, DuplicatePolicy::Reject);
        assert_eq!(config.accounts.duplicates.to_string(), "reject");
    }
}
