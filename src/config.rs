//! Runtime configuration for the controllers.
//!
//! Loaded from JSON; every key is optional and falls back to the shipped
//! defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Largest supported number of minor-unit digits.
pub const MAX_MINOR_UNIT_DIGITS: u32 = 6;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Symbol placed in front of formatted amounts.
    pub currency_symbol: String,
    /// Decimal places of the currency minor unit.
    pub minor_unit_digits: u32,
    /// Items offered by the category picker.
    pub categories: Vec<String>,
    /// chrono format used to prefill and parse the draft date.
    pub date_format: String,
    /// Refuse a second sign-in/sign-up while one is in flight.
    pub reject_concurrent_submits: bool,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "₦".to_string(),
            minor_unit_digits: 2,
            categories: ["Food", "Transport", "Shopping", "Bills", "Subscriptions", "Other"]
                .into_iter()
                .map(String::from)
                .collect(),
            date_format: "%B %-d, %Y".to_string(),
            reject_concurrent_submits: true,
        }
    }
}

impl CoreConfig {
    pub fn from_json_str(data: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(data).map_err(|err| ConfigError::Serde(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            let data = fs::read_to_string(path)?;
            Self::from_json_str(&data)
        } else {
            Ok(Self::default())
        }
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|err| ConfigError::Serde(err.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.minor_unit_digits > MAX_MINOR_UNIT_DIGITS {
            return Err(ConfigError::Invalid(format!(
                "minor_unit_digits must be at most {MAX_MINOR_UNIT_DIGITS}, got {}",
                self.minor_unit_digits
            )));
        }
        if self.date_format.trim().is_empty() {
            return Err(ConfigError::Invalid("date_format must not be empty".into()));
        }
        if let Some(blank) = self.categories.iter().position(|c| c.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "category at position {blank} is blank"
            )));
        }
        Ok(())
    }
}
