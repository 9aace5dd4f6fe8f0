//! Geometry serializer
//!
//! Turns an ordered point sequence into one of three downstream encodings
//! and reads each encoding back. Points are never reordered, merged or
//! smoothed; coordinates are written with [`COORDINATE_DECIMALS`] places
//! wherever the encoding is text we control.
//!
//! [`COORDINATE_DECIMALS`]: proscan_core::COORDINATE_DECIMALS

mod dxf_document;
mod entity_text;
mod point_table;

pub use dxf_document::{read_dxf, write_dxf};
pub use entity_text::{read_entity_text, write_entity_text};
pub use point_table::{read_point_table, write_point_table, POINT_TABLE_HEADER};

use crate::error::GeometryResult;
use crate::points_reader::MIN_POINTS;
use proscan_core::{DataError, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Supported geometry encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GeometryFormat {
    /// Polyline entity in a DXF drawing written by the `dxf` library
    #[default]
    Dxf,
    /// Hand-written minimal group-code/value text
    EntityText,
    /// Comma separated point table
    PointTable,
}

impl GeometryFormat {
    pub const ALL: [GeometryFormat; 3] = [Self::Dxf, Self::EntityText, Self::PointTable];

    /// File extension for documents in this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Dxf | Self::EntityText => "dxf",
            Self::PointTable => "csv",
        }
    }
}

impl fmt::Display for GeometryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dxf => write!(f, "dxf"),
            Self::EntityText => write!(f, "entity-text"),
            Self::PointTable => write!(f, "point-table"),
        }
    }
}

impl FromStr for GeometryFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "dxf" => Ok(Self::Dxf),
            "entity-text" | "entities" | "text" => Ok(Self::EntityText),
            "point-table" | "table" | "csv" => Ok(Self::PointTable),
            _ => Err(format!("Unknown geometry format: {}", s)),
        }
    }
}

/// Serialized geometry ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryDocument {
    format: GeometryFormat,
    text: String,
}

impl GeometryDocument {
    pub fn format(&self) -> GeometryFormat {
        self.format
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Write the document to `path`, replacing any existing file
    pub fn write_to(&self, path: &Path) -> GeometryResult<()> {
        fs::write(path, self.text.as_bytes())?;
        tracing::info!(
            path = %path.display(),
            format = %self.format,
            bytes = self.text.len(),
            "geometry written"
        );
        Ok(())
    }
}

/// Renders point sequences in one [`GeometryFormat`]
#[derive(Debug, Clone, Copy, Default)]
pub struct GeometrySerializer {
    format: GeometryFormat,
}

impl GeometrySerializer {
    pub fn new(format: GeometryFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> GeometryFormat {
        self.format
    }

    /// Serialize `points`; at least [`MIN_POINTS`] are required
    pub fn serialize(&self, points: &[Point]) -> GeometryResult<GeometryDocument> {
        if points.len() < MIN_POINTS {
            return Err(DataError::InsufficientPoints {
                found: points.len(),
                required: MIN_POINTS,
            }
            .into());
        }

        let text = match self.format {
            GeometryFormat::Dxf => write_dxf(points)?,
            GeometryFormat::EntityText => write_entity_text(points),
            GeometryFormat::PointTable => write_point_table(points)?,
        };
        tracing::debug!(format = %self.format, points = points.len(), "geometry serialized");

        Ok(GeometryDocument {
            format: self.format,
            text,
        })
    }

    /// Parse a document previously produced in this format
    pub fn deserialize(&self, text: &str) -> GeometryResult<Vec<Point>> {
        match self.format {
            GeometryFormat::Dxf => read_dxf(text),
            GeometryFormat::EntityText => read_entity_text(text),
            GeometryFormat::PointTable => read_point_table(text),
        }
    }

    /// Read and parse a document file in this format
    pub fn read_file(&self, path: &Path) -> GeometryResult<Vec<Point>> {
        let text = fs::read_to_string(path)?;
        self.deserialize(&text)
    }
}

/// Build a malformed document error for `format`
pub(crate) fn malformed(format: GeometryFormat, reason: impl Into<String>) -> DataError {
    DataError::MalformedDocument {
        format: format.to_string(),
        reason: reason.into(),
    }
}
