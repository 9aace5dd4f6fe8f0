//! Error types for the geometry crate.

use proscan_core::DataError;
use std::io;
use thiserror::Error;

/// Errors that can occur while reading points or writing geometry.
#[derive(Error, Debug)]
pub enum GeometryError {
    /// The points source parsed but is not usable.
    #[error(transparent)]
    Data(#[from] DataError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// The DXF library rejected the drawing.
    #[error("DXF error: {0}")]
    Dxf(#[from] dxf::DxfError),

    /// The point table could not be written or read.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl GeometryError {
    /// Check if this is a data error (as opposed to a file or codec fault)
    pub fn is_data_error(&self) -> bool {
        matches!(self, GeometryError::Data(_))
    }
}

impl From<GeometryError> for proscan_core::Error {
    fn from(err: GeometryError) -> Self {
        match err {
            GeometryError::Data(e) => Self::Data(e),
            GeometryError::IoError(e) => Self::Io(e),
            other => Self::other(other.to_string()),
        }
    }
}

/// Result type alias for geometry operations.
pub type GeometryResult<T> = Result<T, GeometryError>;
