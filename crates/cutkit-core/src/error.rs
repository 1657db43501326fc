//! Error handling for CutKit
//!
//! Provides the error types shared by every layer of the workspace:
//! - Parameter errors (job values rejected before planning)
//! - Geometry errors (degenerate or unusable input shapes)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Parameter validation error
///
/// Raised when a job value is outside the range the planner accepts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// Value must be strictly positive
    #[error("{name} must be positive, got {value}")]
    NotPositive {
        /// Name of the offending field.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// Value must not be negative
    #[error("{name} must not be negative, got {value}")]
    Negative {
        /// Name of the offending field.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// Value is outside an allowed range
    #[error("{name} out of range: {value} (valid: {min}..={max})")]
    OutOfRange {
        /// Name of the offending field.
        name: String,
        /// The rejected value.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
    },

    /// Value is not a finite number
    #[error("{name} must be finite")]
    NotFinite {
        /// Name of the offending field.
        name: String,
    },
}

/// Main error type for CutKit core
#[derive(Error, Debug)]
pub enum Error {
    /// Parameter validation error
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// Geometry could not be used
    #[error("Geometry error: {0}")]
    Geometry(String),
}

impl Error {
    /// Check if this is a parameter validation error
    pub fn is_parameter_error(&self) -> bool {
        matches!(self, Error::Parameter(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Rejects values that are not finite or not strictly positive.
pub fn require_positive(name: &str, value: f64) -> std::result::Result<(), ParameterError> {
    if !value.is_finite() {
        return Err(ParameterError::NotFinite { name: name.into() });
    }
    if value <= 0.0 {
        return Err(ParameterError::NotPositive {
            name: name.into(),
            value,
        });
    }
    Ok(())
}

/// Rejects values that are not finite or negative.
pub fn require_non_negative(name: &str, value: f64) -> std::result::Result<(), ParameterError> {
    if !value.is_finite() {
        return Err(ParameterError::NotFinite { name: name.into() });
    }
    if value < 0.0 {
        return Err(ParameterError::Negative {
            name: name.into(),
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_display() {
        let err = ParameterError::NotPositive {
            name: "diameter".into(),
            value: 0.0,
        };
        assert_eq!(err.to_string(), "diameter must be positive, got 0");

        let err = ParameterError::OutOfRange {
            name: "stepover".into(),
            value: 1.5,
            min: 0.0,
            max: 1.0,
        };
        assert_eq!(err.to_string(), "stepover out of range: 1.5 (valid: 0..=1)");
    }

    #[test]
    fn test_require_helpers() {
        assert!(require_positive("d", 0.1).is_ok());
        assert!(require_positive("d", 0.0).is_err());
        assert!(require_positive("d", f64::NAN).is_err());
        assert!(require_non_negative("d", 0.0).is_ok());
        assert!(require_non_negative("d", -0.1).is_err());
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = ParameterError::NotFinite { name: "x".into() }.into();
        assert!(err.is_parameter_error());
        assert_eq!(err.to_string(), "x must be finite");

        let err = Error::Geometry("operation 0: coordinate is not finite".into());
        assert!(!err.is_parameter_error());
    }
}
