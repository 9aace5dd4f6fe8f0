//! Error handling for ProScan
//!
//! Three error classes reach the operator:
//! - Validation errors (scan parameters violate one or more constraints)
//! - Data errors (a points source does not yield usable geometry)
//! - I/O errors (a file could not be read or written)
//!
//! Validation and data errors are recoverable input problems and are
//! reported as values; I/O errors carry the underlying cause.

use crate::data::ZoneKind;
use thiserror::Error;

/// A single violated scan parameter constraint
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterViolation {
    #[error("Scan length must be > 0")]
    ScanLengthNotPositive,

    #[error("Probe depth must be > 0")]
    ProbeDepthNotPositive,

    #[error("Start zone step must be > 0")]
    StartZoneStepNotPositive,

    #[error("Main zone step must be > 0")]
    MainZoneStepNotPositive,

    #[error("End zone step must be > 0")]
    EndZoneStepNotPositive,

    #[error("Start zone length must be less than the scan length")]
    StartZoneTooLong,

    #[error("End zone length must be less than the scan length")]
    EndZoneTooLong,

    #[error("Start and end zone lengths combined must be less than the scan length")]
    ZonesExceedScanLength,

    #[error("{0} length must not be negative")]
    ZoneLengthNegative(ZoneKind),

    #[error("Retract must be >= 0")]
    RetractNegative,

    #[error("Speed must be > 0")]
    SpeedNotPositive,

    /// The zone would be segmented into an unmanageable number of steps
    #[error("{zone} needs more than {limit} steps")]
    TooManySteps { zone: ZoneKind, limit: usize },
}

/// Every violation found in one parameter record, in check order
///
/// Displays as one message per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ParameterViolation>);

impl ValidationErrors {
    pub fn new(violations: Vec<ParameterViolation>) -> Self {
        Self(violations)
    }

    pub fn violations(&self) -> &[ParameterViolation] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, violation: ParameterViolation) -> bool {
        self.0.contains(&violation)
    }

    /// Operator-facing messages, one per violation
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.messages().join("\n"))
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ParameterViolation;
    type IntoIter = std::vec::IntoIter<ParameterViolation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Input data that parsed but cannot be used
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataError {
    /// Too few points survived parsing to form a polyline
    #[error("At least {required} points are required, found {found}")]
    InsufficientPoints {
        /// Number of usable points found.
        found: usize,
        /// Minimum number of points needed.
        required: usize,
    },

    /// A generated document could not be read back
    #[error("Malformed {format} document: {reason}")]
    MalformedDocument {
        /// Name of the document encoding.
        format: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Main error type for ProScan
#[derive(Error, Debug)]
pub enum Error {
    /// Scan parameters failed validation
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Unusable input data
    #[error(transparent)]
    Data(#[from] DataError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    pub fn is_data_error(&self) -> bool {
        matches!(self, Error::Data(_))
    }

    pub fn is_io_error(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_validation_errors_join_with_newlines() {
        let errors = ValidationErrors::new(vec![
            ParameterViolation::ScanLengthNotPositive,
            ParameterViolation::ProbeDepthNotPositive,
        ]);
        assert_eq!(
            errors.to_string(),
            "Scan length must be > 0\nProbe depth must be > 0"
        );
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(ParameterViolation::ProbeDepthNotPositive));
    }

    #[test]
    fn test_zone_specific_messages() {
        assert_eq!(
            ParameterViolation::ZoneLengthNegative(ZoneKind::End).to_string(),
            "End zone length must not be negative"
        );
        assert_eq!(
            ParameterViolation::TooManySteps {
                zone: ZoneKind::Main,
                limit: 1_000_000
            }
            .to_string(),
            "Main zone needs more than 1000000 steps"
        );
    }

    #[test]
    fn test_data_error_display() {
        let err = DataError::InsufficientPoints {
            found: 1,
            required: 2,
        };
        assert_eq!(err.to_string(), "At least 2 points are required, found 1");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = ValidationErrors::new(vec![ParameterViolation::EndZoneTooLong]).into();
        assert!(err.is_validation_error());
        assert_eq!(
            err.to_string(),
            "End zone length must be less than the scan length"
        );

        let err: Error = DataError::InsufficientPoints {
            found: 0,
            required: 2,
        }
        .into();
        assert!(err.is_data_error());

        let err: Error = io::Error::new(io::ErrorKind::NotFound, "points.txt").into();
        assert!(err.is_io_error());
        assert_eq!(err.to_string(), "I/O error: points.txt");
    }
}
