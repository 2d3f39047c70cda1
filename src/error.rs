//! Error types for scenario validation, projection and report output

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProjectionError {
    /// Malformed or out-of-range scenario field. Raised before any simulation starts.
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    /// Numeric fault during the forward simulation (non-finite balance)
    #[error("Computation error: {0}")]
    Computation(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProjectionError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ProjectionError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// True for errors the caller can only fix by changing the scenario
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ProjectionError::InvalidInput { .. })
    }
}

pub type Result<T> = std::result::Result<T, ProjectionError>;
