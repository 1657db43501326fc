//! Error types for the CAM tools crate.
//!
//! This module provides structured error types for toolpath planning,
//! external geometry capabilities and program generation.

use thiserror::Error;

/// Errors that can occur during CAM tool operations.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// Ring stepping did not converge within the iteration guard.
    #[error("Ring generation for {operation} did not terminate after {limit} iterations")]
    RingLimitExceeded { operation: String, limit: usize },

    /// A geometry operation failed during toolpath creation.
    #[error("Geometry error: {0}")]
    GeometryError(String),

    /// An external geometry capability is not available.
    #[error("{0} is not available")]
    CapabilityUnavailable(String),

    /// The job was rejected by validation.
    #[error("Invalid job: {0}")]
    InvalidJob(#[from] cutkit_core::Error),
}

impl CamToolError {
    /// Planning failures are scoped to one operation; the rest of the job continues.
    pub fn is_planning_failure(&self) -> bool {
        matches!(
            self,
            CamToolError::RingLimitExceeded { .. } | CamToolError::GeometryError(_)
        )
    }
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cam_tool_error_display() {
        let err = CamToolError::RingLimitExceeded {
            operation: "Pocket".to_string(),
            limit: 10,
        };
        assert_eq!(
            err.to_string(),
            "Ring generation for Pocket did not terminate after 10 iterations"
        );
        assert!(err.is_planning_failure());

        let err = CamToolError::CapabilityUnavailable("V-pocket kernel".to_string());
        assert_eq!(err.to_string(), "V-pocket kernel is not available");
        assert!(!err.is_planning_failure());
    }

    #[test]
    fn test_error_conversion() {
        let param_err = cutkit_core::ParameterError::NotFinite {
            name: "width".to_string(),
        };
        let cam_err: CamToolError = cutkit_core::Error::from(param_err).into();
        assert!(matches!(cam_err, CamToolError::InvalidJob(_)));
        assert_eq!(cam_err.to_string(), "Invalid job: width must be finite");
    }
}
