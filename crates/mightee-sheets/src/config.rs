//! # Sheets Configuration
//!
//! Configuration for the spreadsheet ledger layer.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     MIGHTEE_SPREADSHEET_ID=1rNAba2...                                   │
//! │     MIGHTEE_UTC_OFFSET_HOURS=8                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/mightee-pos/sheets.toml (Linux)                           │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     Template names, UTC+8, 5 retry attempts                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # sheets.toml
//! [spreadsheet]
//! id = "1rNAba2jqzBqzXZZxplfkXc5XthDbgVVvntDOIdDEx9w"
//! inventory_template = "Inventory"
//! sales_template = "SalesLog"
//! stocks_sheet = "Stocks"
//!
//! [partition]
//! utc_offset_hours = 8
//!
//! [retry]
//! max_attempts = 5
//! initial_backoff_ms = 250
//! max_backoff_secs = 8
//!
//! [stocks]
//! first_row = 4
//! names = ["Buko", "Sugar", "Condensed Milk", "Cups", "Bottles", "Pizza Boxes"]
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{LedgerError, LedgerResult};

// =============================================================================
// Spreadsheet Settings
// =============================================================================

/// Which spreadsheet and which template worksheets to use.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpreadsheetSettings {
    /// Remote spreadsheet identifier. May stay empty when running against
    /// the in-memory backend.
    #[serde(default)]
    pub id: String,

    /// Template worksheet the daily inventory copies are duplicated from.
    #[serde(default = "default_inventory_template")]
    pub inventory_template: String,

    /// Template worksheet the daily sales-log copies are duplicated from.
    #[serde(default = "default_sales_template")]
    pub sales_template: String,

    /// The stocks ledger worksheet (not partitioned by day).
    #[serde(default = "default_stocks_sheet")]
    pub stocks_sheet: String,
}

fn default_inventory_template() -> String {
    "Inventory".to_string()
}

fn default_sales_template() -> String {
    "SalesLog".to_string()
}

fn default_stocks_sheet() -> String {
    "Stocks".to_string()
}

impl Default for SpreadsheetSettings {
    fn default() -> Self {
        SpreadsheetSettings {
            id: String::new(),
            inventory_template: default_inventory_template(),
            sales_template: default_sales_template(),
            stocks_sheet: default_stocks_sheet(),
        }
    }
}

// =============================================================================
// Partition Settings
// =============================================================================

/// Daily partition behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartitionSettings {
    /// Fixed timezone offset the stall operates in. The Philippines is
    /// UTC+8 with no daylight saving, so a plain offset is enough.
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

fn default_utc_offset_hours() -> i32 {
    8
}

impl Default for PartitionSettings {
    fn default() -> Self {
        PartitionSettings {
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

// =============================================================================
// Retry Settings
// =============================================================================

/// Tuning for the decrement retry loop (the only retried path).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Total attempts, first try included.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Initial backoff duration (milliseconds).
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff duration (seconds).
    #[serde(default = "default_max_backoff_secs")]
    pub max_backoff_secs: u64,
}

fn default_max_attempts() -> u32 {
    5
}

fn default_initial_backoff_ms() -> u64 {
    250
}

fn default_max_backoff_secs() -> u64 {
    8
}

impl Default for RetrySettings {
    fn default() -> Self {
        RetrySettings {
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_secs: default_max_backoff_secs(),
        }
    }
}

impl RetrySettings {
    /// Initial backoff as a Duration.
    pub fn initial_backoff(&self) -> Duration {
        Duration::from_millis(self.initial_backoff_ms)
    }

    /// Maximum backoff as a Duration.
    pub fn max_backoff(&self) -> Duration {
        Duration::from_secs(self.max_backoff_secs)
    }
}

// =============================================================================
// Stocks Layout
// =============================================================================

/// Fixed layout of the stocks ledger worksheet.
///
/// Column layout is fixed by the sheet itself: names in A, beginning
/// balance in B, quantity-in in C, ending balance in D.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StocksSettings {
    /// First data row (rows above are headers).
    #[serde(default = "default_stocks_first_row")]
    pub first_row: u32,

    /// The fixed, ordered list of stock row names.
    #[serde(default = "default_stock_names")]
    pub names: Vec<String>,
}

fn default_stocks_first_row() -> u32 {
    4
}

fn default_stock_names() -> Vec<String> {
    [
        "Buko",
        "Sugar",
        "Condensed Milk",
        "Cups",
        "Bottles",
        "Pizza Boxes",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for StocksSettings {
    fn default() -> Self {
        StocksSettings {
            first_row: default_stocks_first_row(),
            names: default_stock_names(),
        }
    }
}

impl StocksSettings {
    /// Last data row, inclusive.
    pub fn last_row(&self) -> u32 {
        self.first_row + self.names.len() as u32 - 1
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete ledger-layer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetsConfig {
    /// Spreadsheet and template names.
    #[serde(default)]
    pub spreadsheet: SpreadsheetSettings,

    /// Daily partition behavior.
    #[serde(default)]
    pub partition: PartitionSettings,

    /// Decrement retry tuning.
    #[serde(default)]
    pub retry: RetrySettings,

    /// Stocks ledger layout.
    #[serde(default)]
    pub stocks: StocksSettings,
}

impl SheetsConfig {
    /// Creates a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (sheets.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> LedgerResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading sheets config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load sheets config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> LedgerResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| LedgerError::InvalidConfig("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Sheets config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> LedgerResult<()> {
        if self.spreadsheet.inventory_template.is_empty()
            || self.spreadsheet.sales_template.is_empty()
        {
            return Err(LedgerError::InvalidConfig(
                "template sheet names must not be empty".into(),
            ));
        }

        if !(-12..=14).contains(&self.partition.utc_offset_hours) {
            return Err(LedgerError::InvalidConfig(format!(
                "utc_offset_hours must be between -12 and 14, got {}",
                self.partition.utc_offset_hours
            )));
        }

        if self.retry.max_attempts == 0 {
            return Err(LedgerError::InvalidConfig(
                "retry.max_attempts must be greater than 0".into(),
            ));
        }

        if self.stocks.names.is_empty() {
            return Err(LedgerError::InvalidConfig(
                "stocks.names must not be empty".into(),
            ));
        }

        if self.stocks.first_row < 2 {
            return Err(LedgerError::InvalidConfig(
                "stocks.first_row must leave room for a header row".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(id) = std::env::var("MIGHTEE_SPREADSHEET_ID") {
            debug!(spreadsheet_id = %id, "Overriding spreadsheet id from environment");
            self.spreadsheet.id = id;
        }

        if let Ok(name) = std::env::var("MIGHTEE_INVENTORY_TEMPLATE") {
            self.spreadsheet.inventory_template = name;
        }

        if let Ok(name) = std::env::var("MIGHTEE_SALES_TEMPLATE") {
            self.spreadsheet.sales_template = name;
        }

        if let Ok(offset) = std::env::var("MIGHTEE_UTC_OFFSET_HOURS") {
            if let Ok(parsed) = offset.parse::<i32>() {
                debug!(offset = parsed, "Overriding timezone offset from environment");
                self.partition.utc_offset_hours = parsed;
            }
        }

        if let Ok(attempts) = std::env::var("MIGHTEE_RETRY_MAX_ATTEMPTS") {
            if let Ok(parsed) = attempts.parse::<u32>() {
                self.retry.max_attempts = parsed;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("ph", "mightee", "pos").map(|dirs| {
            let config_dir = dirs.config_dir();
            config_dir.join("sheets.toml")
        })
    }
}
