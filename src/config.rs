//! Configuration module
//!
//! Reads a TOML file (default `~/.config/parking-facility/config.toml`) with
//! `[facility]`, `[charging]` and `[logging]` sections; every field falls back
//! to a sensible default so a missing or partial file still boots.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Slot inventory of the facility
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FacilityConfig {
    /// Regular slot capacity
    pub regular_capacity: usize,
    /// EV slot capacity (one charger is registered per EV slot)
    pub ev_capacity: usize,
    /// Facility level this inventory describes
    pub level: u32,
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            regular_capacity: 10,
            ev_capacity: 4,
            level: 1,
        }
    }
}

/// Charging session parameters
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChargingConfig {
    /// Base energy rate applied to every new session
    pub rate_per_kwh: Decimal,
    /// Energy billed when a vehicle departs without a metered reading
    pub default_session_kwh: f64,
}

impl Default for ChargingConfig {
    fn default() -> Self {
        Self {
            rate_per_kwh: Decimal::new(50, 0),
            default_session_kwh: 10.0,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (`error`, `warn`, `info`, `debug`, `trace`)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub facility: FacilityConfig,
    pub charging: ChargingConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }
}

/// Default config file location (`~/.config/parking-facility/config.toml`).
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("parking-facility")
        .join("config.toml")
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sensible() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.facility.regular_capacity, 10);
        assert_eq!(cfg.facility.ev_capacity, 4);
        assert_eq!(cfg.charging.rate_per_kwh, Decimal::new(50, 0));
        assert_eq!(cfg.charging.default_session_kwh, 10.0);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn load_full_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[facility]
regular_capacity = 20
ev_capacity = 6
level = 2

[charging]
rate_per_kwh = "62.5"
default_session_kwh = 8.0

[logging]
level = "debug"
"#
        )
        .unwrap();

        let cfg = AppConfig::load(file.path()).unwrap();
        assert_eq!(cfg.facility.regular_capacity, 20);
        assert_eq!(cfg.facility.ev_capacity, 6);
        assert_eq!(cfg.facility.level, 2);
        assert_eq!(cfg.charging.rate_per_kwh, Decimal::new(625, 1));
        assert_eq!(cfg.charging.default_session_kwh, 8.0);
        assert_eq!(cfg.logging.level, "debug");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[facility]\nregular_capacity = 3\n").unwrap();
        let cfg = AppConfig::load(file.path()).unwrap();
        assert_eq!(cfg.facility.regular_capacity, 3);
        assert_eq!(cfg.facility.ev_capacity, 4);
        assert_eq!(cfg.charging.default_session_kwh, 10.0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AppConfig::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
