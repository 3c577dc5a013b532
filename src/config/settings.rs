//! User settings for pocket-ledger
//!
//! Manages display preferences and the default credit filter.

use std::fmt::Write;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::storage::file_io::{read_json, write_json_atomic};

/// User settings for pocket-ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version of the settings file
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol shown next to amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format used when displaying entries (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Whether summaries include credit entries unless told otherwise
    #[serde(default = "default_include_credit")]
    pub include_credit_by_default: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}

fn default_include_credit() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            include_credit_by_default: default_include_credit(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or the defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings: Settings = read_json(paths.settings_file())
            .map_err(|e| LedgerError::Config(format!("Failed to load settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that would fail at display time
    ///
    /// The date format is checked by rendering a sample date with it, which
    /// catches unknown specifiers as well as ones a date alone cannot fill
    /// (`%H`, `%M`, ...).
    pub fn validate(&self) -> Result<(), LedgerError> {
        let invalid = || LedgerError::Config(format!("Invalid date format: '{}'", self.date_format));
        if self.date_format.is_empty() {
            return Err(invalid());
        }

        let sample = NaiveDate::from_ymd_opt(2024, 1, 31).ok_or_else(invalid)?;
        let mut rendered = String::new();
        write!(rendered, "{}", sample.format(&self.date_format)).map_err(|_| invalid())?;
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
