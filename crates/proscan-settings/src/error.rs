//! Error types for the settings crate.
//!
//! This module provides structured error types for loading, saving and
//! validating the configuration file.

use proscan_core::ValidationErrors;
use std::io;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The configuration file extension is neither `.toml` nor `.json`.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// A configuration value is invalid.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    /// The default scan parameters are invalid.
    #[error("Invalid default parameters:\n{0}")]
    InvalidParameters(#[from] ValidationErrors),

    /// The configuration directory could not be found.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSerializeError(#[from] toml::ser::Error),
}

impl SettingsError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<SettingsError> for proscan_core::Error {
    fn from(err: SettingsError) -> Self {
        match err {
            SettingsError::InvalidParameters(errors) => Self::Validation(errors),
            SettingsError::IoError(e) => Self::Io(e),
            other => Self::other(other.to_string()),
        }
    }
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use proscan_core::ParameterViolation;

    #[test]
    fn test_settings_error_display() {
        let err = SettingsError::UnsupportedFormat("yaml".to_string());
        assert_eq!(err.to_string(), "Unsupported config format: yaml");

        let err = SettingsError::invalid("output.gcode_prefix", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Invalid setting 'output.gcode_prefix': must not be empty"
        );
    }

    #[test]
    fn test_error_conversion() {
        let err: SettingsError =
            ValidationErrors::new(vec![ParameterViolation::ScanLengthNotPositive]).into();
        let core: proscan_core::Error = err.into();
        assert!(core.is_validation_error());

        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let settings_err: SettingsError = io_err.into();
        assert!(matches!(settings_err, SettingsError::IoError(_)));
    }
}
