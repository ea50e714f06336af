//! User settings for gst-ledger
//!
//! Holds the currency symbol, timestamp formats and the GST rate table.
//! Every field has a default so a partial `config.json` still loads.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::CategoryTaxTable;
use crate::storage::file_io::{read_json, write_json_atomic};

/// User settings for gst-ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used for display
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// strftime format for the transaction list
    #[serde(default = "default_display_datetime_format")]
    pub display_datetime_format: String,

    /// strftime format for the Date column of the CSV export
    #[serde(default = "default_export_datetime_format")]
    pub export_datetime_format: String,

    /// GST rate per category, in percent
    #[serde(default)]
    pub gst_rates: CategoryTaxTable,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

fn default_display_datetime_format() -> String {
    "%d %b %Y %I:%M %p".to_string()
}

fn default_export_datetime_format() -> String {
    "%-m/%-d/%Y, %-I:%M:%S %p".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            display_datetime_format: default_display_datetime_format(),
            export_datetime_format: default_export_datetime_format(),
            gst_rates: CategoryTaxTable::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    ///
    /// The defaults are not written back; `init` does that explicitly.
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings: Option<Settings> = read_json(&paths.settings_file()).map_err(|e| match e {
            LedgerError::Json(msg) => LedgerError::Config(msg),
            other => other,
        })?;

        Ok(settings.unwrap_or_default())
    }

    /// Save settings to disk, replacing the file atomically
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        write_json_atomic(&paths.settings_file(), self)
    }
}
