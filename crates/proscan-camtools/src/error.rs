//! Error types for the CAM tools crate.
//!
//! Parameter problems are reported as the full list of violations; file
//! problems carry the underlying I/O error.

use proscan_core::ValidationErrors;
use std::io;
use thiserror::Error;

/// Errors that can occur while producing a motion program.
#[derive(Error, Debug)]
pub enum CamToolError {
    /// One or more scan parameters are invalid.
    #[error("Invalid parameters:\n{0}")]
    InvalidParameters(#[from] ValidationErrors),

    /// I/O error while writing the program file.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

impl From<CamToolError> for proscan_core::Error {
    fn from(err: CamToolError) -> Self {
        match err {
            CamToolError::InvalidParameters(errors) => Self::Validation(errors),
            CamToolError::IoError(e) => Self::Io(e),
        }
    }
}

/// Result type alias for CAM tool operations.
pub type CamToolResult<T> = Result<T, CamToolError>;
