//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PERK_REMINDERS` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use perk_reminders::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Handle map at {}", config.storage.handle_map_path.display());
//! ```

mod error;
mod logging;
mod reminders;
mod storage;

pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};
pub use reminders::RemindersConfig;
pub use storage::StorageConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Reminder scheduling (default time, UTC offset, platform limits)
    #[serde(default)]
    pub reminders: RemindersConfig,

    /// File locations
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PERK_REMINDERS` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PERK_REMINDERS__REMINDERS__UTC_OFFSET_MINUTES=-300` -> `reminders.utc_offset_minutes = -300`
    /// - `PERK_REMINDERS__STORAGE__SNAPSHOT_PATH=...` -> `storage.snapshot_path = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PERK_REMINDERS")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.reminders.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("PERK_REMINDERS__REMINDERS__UTC_OFFSET_MINUTES");
        env::remove_var("PERK_REMINDERS__REMINDERS__DEFAULT_REMINDER_TIME");
        env::remove_var("PERK_REMINDERS__REMINDERS__MAX_PENDING");
        env::remove_var("PERK_REMINDERS__STORAGE__HANDLE_MAP_PATH");
        env::remove_var("PERK_REMINDERS__LOGGING__FORMAT");
    }

    #[test]
    fn test_load_defaults_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.reminders.default_reminder_time, "09:00");
        assert_eq!(config.reminders.max_pending, 64);
        assert_eq!(
            config.storage.handle_map_path,
            PathBuf::from("data/reminder-handles.json")
        );
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PERK_REMINDERS__REMINDERS__UTC_OFFSET_MINUTES", "-300");
        env::set_var("PERK_REMINDERS__REMINDERS__DEFAULT_REMINDER_TIME", "08:15");
        env::set_var("PERK_REMINDERS__STORAGE__HANDLE_MAP_PATH", "/tmp/handles.json");
        env::set_var("PERK_REMINDERS__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.reminders.utc_offset_minutes, -300);
        assert_eq!(config.reminders.default_reminder_time, "08:15");
        assert_eq!(config.storage.handle_map_path, PathBuf::from("/tmp/handles.json"));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_validate_rejects_zero_max_pending() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("PERK_REMINDERS__REMINDERS__MAX_PENDING", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidMaxPending)
        ));
    }
}
