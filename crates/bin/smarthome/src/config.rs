//! Configuration loading from an optional TOML file.
//!
//! Looks for `smarthome.toml` in the working directory. Every field has a
//! default, so the file is optional. The process takes no arguments and
//! reads no environment variables; the file is the only input.

use serde::Deserialize;
use smarthome_domain::device::{DEFAULT_DEGREES, DEFAULT_ECO_DEGREES, DEFAULT_NIGHT_DEGREES};

pub const CONFIG_FILE: &str = "smarthome.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Initial light state.
    pub light: LightConfig,
    /// Initial lock state.
    pub lock: LockConfig,
    /// Initial setpoint and mode presets.
    pub thermostat: ThermostatConfig,
    /// Per-mode reactions that are optional.
    pub modes: ModesConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LightConfig {
    pub on: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LockConfig {
    pub locked: bool,
}

/// Thermostat setpoints in whole degrees Celsius.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ThermostatConfig {
    /// Setpoint at startup.
    pub degrees: i32,
    /// Ceiling applied by the `Sleep` mode.
    pub night_degrees: i32,
    /// Setpoint applied by the `Vacation` mode.
    pub eco_degrees: i32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ModesConfig {
    /// Lock the door when `Sleep` is broadcast.
    pub lock_on_sleep: bool,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `smarthome.toml` (if present) and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, is malformed,
    /// or fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::from_file(CONFIG_FILE)?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging filter must not be empty".to_string(),
            ));
        }
        if self.thermostat.night_degrees < self.thermostat.eco_degrees {
            return Err(ConfigError::Validation(format!(
                "night setpoint ({}) must not be below the eco setpoint ({})",
                self.thermostat.night_degrees, self.thermostat.eco_degrees
            )));
        }
        Ok(())
    }
}

impl Default for ThermostatConfig {
    fn default() -> Self {
        Self {
            degrees: DEFAULT_DEGREES,
            night_degrees: DEFAULT_NIGHT_DEGREES,
            eco_degrees: DEFAULT_ECO_DEGREES,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "smarthome=info,smarthome_app=info,smarthome_adapter_console=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse smarthome.toml")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read smarthome.toml")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
