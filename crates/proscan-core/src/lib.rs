//! # ProScan Core
//!
//! Core types and the error taxonomy shared by the ProScan crates.
//! Provides the scan parameter record, zone identifiers, the point type used
//! by the geometry pipeline, and numeric formatting helpers used by every
//! text writer in the workspace.

pub mod data;
pub mod error;
pub mod format;

pub use data::{Point, ScanParameters, ZoneKind};
pub use error::{DataError, Error, ParameterViolation, Result, ValidationErrors};
pub use format::{format_coordinate, format_number, COORDINATE_DECIMALS};
