//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid default reminder time '{0}', expected HH:MM")]
    InvalidReminderTime(String),

    #[error("UTC offset of {0} minutes is outside ±14 hours")]
    InvalidUtcOffset(i32),

    #[error("max_pending must be greater than zero")]
    InvalidMaxPending,

    #[error("Invalid log filter '{0}'")]
    InvalidLogLevel(String),
}
