//! Environment-driven settings for locating the datasets.

use std::env;
use std::path::PathBuf;

use crate::DEFAULT_WARNING_WINDOW_DAYS;

pub const CALENDAR_PATH_VAR: &str = "PILA_CALENDAR_PATH";
pub const LIMITS_PATH_VAR: &str = "PILA_LIMITS_PATH";
pub const WARNING_WINDOW_VAR: &str = "PILA_WARNING_WINDOW_DAYS";

pub const DEFAULT_CALENDAR_PATH: &str = "data/calendario.json";
pub const DEFAULT_LIMITS_PATH: &str = "data/CAC_LIMITE_SEG_SOCIAL.json";

/// Error type for configuration loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {name} value '{value}': {reason}")]
    Invalid {
        name:   &'static str,
        value:  String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PilaConfig {
    pub calendar_path:       PathBuf,
    pub limits_path:         PathBuf,
    pub warning_window_days: u32,
}

impl Default for PilaConfig {
    fn default() -> Self {
        Self {
            calendar_path:       PathBuf::from(DEFAULT_CALENDAR_PATH),
            limits_path:         PathBuf::from(DEFAULT_LIMITS_PATH),
            warning_window_days: DEFAULT_WARNING_WINDOW_DAYS,
        }
    }
}

impl PilaConfig {
    /// Reads the process environment. Unset or blank variables fall back to
    /// the defaults.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if a set variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Same as [`PilaConfig::from_env`] over an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` if a set variable cannot be parsed.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let calendar_path = read(CALENDAR_PATH_VAR).map_or(defaults.calendar_path, PathBuf::from);
        let limits_path = read(LIMITS_PATH_VAR).map_or(defaults.limits_path, PathBuf::from);
        let warning_window_days = match read(WARNING_WINDOW_VAR) {
            Some(value) => value.parse::<u32>().map_err(|error| ConfigError::Invalid {
                name: WARNING_WINDOW_VAR,
                reason: error.to_string(),
                value,
            })?,
            None => defaults.warning_window_days,
        };

        Ok(Self {
            calendar_path,
            limits_path,
            warning_window_days,
        })
    }
}
