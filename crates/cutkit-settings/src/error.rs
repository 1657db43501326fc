//! Error types for the settings crate.
//!
//! This module provides structured error types for job file loading,
//! saving and validation.

use thiserror::Error;

/// Errors that can occur while reading or writing job files.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The job file could not be loaded.
    #[error("Failed to load job file: {0}")]
    LoadError(String),

    /// The job file could not be saved.
    #[error("Failed to save job file: {0}")]
    SaveError(String),

    /// The file extension does not name a supported format.
    #[error("Unsupported job file format: {0}")]
    UnsupportedFormat(String),

    /// A job value was rejected by validation.
    #[error("Invalid setting: {0}")]
    InvalidSetting(#[from] cutkit_core::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSerError(#[from] toml::ser::Error),
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_error_display() {
        let err = SettingsError::LoadError("job.json: file not found".to_string());
        assert_eq!(
            err.to_string(),
            "Failed to load job file: job.json: file not found"
        );

        let err = SettingsError::UnsupportedFormat("yaml".to_string());
        assert_eq!(err.to_string(), "Unsupported job file format: yaml");

        let err: SettingsError = cutkit_core::Error::from(cutkit_core::ParameterError::NotFinite {
            name: "margin".to_string(),
        })
        .into();
        assert_eq!(err.to_string(), "Invalid setting: margin must be finite");
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let settings_err: SettingsError = json_err.into();
        assert!(matches!(settings_err, SettingsError::JsonError(_)));
    }
}
