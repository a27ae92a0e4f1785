//! EDMKit Settings Crate
//!
//! Handles application configuration: interpreter limits, output and
//! logging preferences, stored as JSON or TOML.

pub mod config;
pub mod error;

pub use config::{Config, LoggingSettings, OutputSettings, LOG_LEVELS};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
