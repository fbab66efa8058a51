//! Application settings loaded from `config.toml` and the environment.
//!
//! `config.toml` is optional. Its `[pricing]` table supplies the values the global
//! configuration row is created with on first run; once the row exists it is the
//! source of truth and the file is no longer consulted for pricing.

use crate::entities::global_config;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default location of the settings file
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Default directory of the restore snapshot side channel
pub const DEFAULT_SNAPSHOT_DIR: &str = "data/restore";

/// Settings structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Pricing parameters used to seed the global configuration
    #[serde(default)]
    pub pricing: PricingDefaults,
    /// Where restore snapshots are written; `SNAPSHOT_DIR` overrides it
    #[serde(default)]
    pub snapshot_dir: Option<PathBuf>,
}

/// Initial values of the global configuration row
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PricingDefaults {
    /// Electricity price per kWh
    pub energy_rate_kwh: f64,
    /// Printer power draw in watts
    pub printer_power_watts: f64,
    /// Default profit margin in percent
    pub default_profit_margin: f64,
    /// Currency display symbol
    pub currency: String,
}

impl Default for PricingDefaults {
    fn default() -> Self {
        let model = global_config::Model::default();
        Self {
            energy_rate_kwh: model.energy_rate_kwh,
            printer_power_watts: model.printer_power_watts,
            default_profit_margin: model.default_profit_margin,
            currency: model.currency,
        }
    }
}

impl PricingDefaults {
    /// Builds the singleton configuration row from these defaults
    #[must_use]
    pub fn to_model(&self) -> global_config::Model {
        global_config::Model {
            id: global_config::SINGLETON_ID,
            energy_rate_kwh: self.energy_rate_kwh,
            printer_power_watts: self.printer_power_watts,
            default_profit_margin: self.default_profit_margin,
            currency: self.currency.clone(),
        }
    }
}

impl Settings {
    /// Resolved snapshot directory: `SNAPSHOT_DIR`, then the file, then the default
    #[must_use]
    pub fn snapshot_dir(&self) -> PathBuf {
        std::env::var("SNAPSHOT_DIR").map_or_else(
            |_| {
                self.snapshot_dir
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_DIR))
            },
            PathBuf::from,
        )
    }
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path = path.as_ref();
    debug!("Loading settings from {}", path.display());
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read {}: {e}", path.display()),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse {}: {e}", path.display()),
    })
}

/// Loads settings from `CONFIG_PATH` or `./config.toml`, using defaults when the
/// file does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be parsed.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if Path::new(&path).exists() {
        load_settings(&path)
    } else {
        info!("No settings file at {path}, using built-in defaults");
        Ok(Settings::default())
    }
}
