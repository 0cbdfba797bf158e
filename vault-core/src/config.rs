//! Configuration for the vault
//!
//! Both values are fixed at vault creation and never change afterwards.
//! Validation happens when a `Vault` is created, not when a `Config` is
//! constructed, so partially built configs can flow through loaders freely.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Vault configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Upper bound on the aggregate balance held by the vault
    pub capacity: u64,

    /// Upper bound on the amount a single withdrawal call may move
    pub withdrawal_ceiling: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 1_000_000,
            withdrawal_ceiling: 100_000,
        }
    }
}

impl Config {
    /// Check the creation-time constraints
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidConfiguration(
                "capacity must be greater than zero".to_string(),
            ));
        }
        if self.withdrawal_ceiling == 0 {
            return Err(Error::InvalidConfiguration(
                "withdrawal ceiling must be greater than zero".to_string(),
            ));
        }
        if self.withdrawal_ceiling > self.capacity {
            return Err(Error::InvalidConfiguration(format!(
                "withdrawal ceiling {} exceeds capacity {}",
                self.withdrawal_ceiling, self.capacity
            )));
        }
        Ok(())
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    /// Load from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(capacity) = std::env::var("VAULT_CAPACITY") {
            config.capacity = capacity
                .parse()
                .map_err(|e| Error::Config(format!("Invalid VAULT_CAPACITY: {}", e)))?;
        }

        if let Ok(ceiling) = std::env::var("VAULT_WITHDRAWAL_CEILING") {
            config.withdrawal_ceiling = ceiling
                .parse()
                .map_err(|e| Error::Config(format!("Invalid VAULT_WITHDRAWAL_CEILING: {}", e)))?;
        }

        Ok(config)
    }
}
