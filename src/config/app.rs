//! Application configuration loading from `stock-keeper.toml`.
//!
//! Every setting has a default, so the file is optional. Its location can be
//! overridden with the `STOCK_KEEPER_CONFIG` environment variable (which may
//! also come from a `.env` file); an explicitly named file must exist.

use crate::{
    config::products::ProductSeed,
    errors::{Error, Result},
};
use serde::Deserialize;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};
use tracing::{debug, info};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_VAR: &str = "STOCK_KEEPER_CONFIG";

/// Log filter used when neither `RUST_LOG` nor the file sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Configuration file used when `STOCK_KEEPER_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "stock-keeper.toml";

/// Configuration structure representing the entire `stock-keeper.toml` file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Console presentation settings
    pub display: DisplayConfig,
    /// Products to put in stock at startup
    pub products: Vec<ProductSeed>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            display: DisplayConfig::default(),
            products: Vec::new(),
        }
    }
}

/// How the console behaves between actions
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Clear the terminal before showing the menu and each action
    pub clear_screen: bool,
    /// Pause after every menu action, in milliseconds
    pub message_pause_ms: u64,
    /// Pause after the stock table, in milliseconds
    pub table_pause_ms: u64,
    /// Pause after the product details view, in milliseconds
    pub info_pause_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            clear_screen: true,
            message_pause_ms: 1_000,
            table_pause_ms: 5_000,
            info_pause_ms: 5_000,
        }
    }
}

impl DisplayConfig {
    /// Settings for driving a session from a script: no clearing, no pauses.
    #[must_use]
    pub const fn immediate() -> Self {
        Self {
            clear_screen: false,
            message_pause_ms: 0,
            table_pause_ms: 0,
            info_pause_ms: 0,
        }
    }

    /// Pause after every menu action.
    #[must_use]
    pub const fn message_pause(&self) -> Duration {
        Duration::from_millis(self.message_pause_ms)
    }

    /// Pause after the stock table.
    #[must_use]
    pub const fn table_pause(&self) -> Duration {
        Duration::from_millis(self.table_pause_ms)
    }

    /// Pause after the product details view.
    #[must_use]
    pub const fn info_pause(&self) -> Duration {
        Duration::from_millis(self.info_pause_ms)
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid or a field has the wrong type
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path_ref.display()),
    })
}

/// Loads the configuration named by `STOCK_KEEPER_CONFIG`, or the default file.
///
/// # Errors
/// Returns an error if an explicitly configured file is missing, or if the file
/// that was found cannot be parsed.
pub fn load_app_configuration() -> Result<AppConfig> {
    let explicit = std::env::var_os(CONFIG_PATH_VAR).map(PathBuf::from);
    load_from(explicit.as_deref(), Path::new(DEFAULT_CONFIG_PATH))
}

/// Loads `explicit` if given; otherwise `fallback`, tolerating its absence.
fn load_from(explicit: Option<&Path>, fallback: &Path) -> Result<AppConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    if fallback.exists() {
        load_config(fallback)
    } else {
        info!(
            "No configuration file at {}, using defaults.",
            fallback.display()
        );
        Ok(AppConfig::default())
    }
}
