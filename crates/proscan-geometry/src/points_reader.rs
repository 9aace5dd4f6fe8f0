//! Points file reader
//!
//! Reads the probe points recorded by the controller, one record per line.
//! Two line grammars are supported and the caller chooses which one applies;
//! the reader never guesses.
//!
//! - [`PointsFormat::Absolute`]: `x, y[, z]`, comma separated, z defaults to 0
//! - [`PointsFormat::Delta`]: `dx dy`, whitespace separated, accumulated from
//!   the origin; the running position after each line is one point
//!
//! Lines that do not parse are skipped. Only a result with fewer than
//! [`MIN_POINTS`] points is an error.

use crate::error::GeometryResult;
use proscan_core::{DataError, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Fewest points that describe a polyline
pub const MIN_POINTS: usize = 2;

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Line grammar of a points file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointsFormat {
    /// Comma-separated absolute coordinates
    #[default]
    Absolute,
    /// Whitespace-separated offsets from the previous point
    Delta,
}

impl fmt::Display for PointsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute => write!(f, "absolute"),
            Self::Delta => write!(f, "delta"),
        }
    }
}

impl FromStr for PointsFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "absolute" | "abs" => Ok(Self::Absolute),
            "delta" | "relative" => Ok(Self::Delta),
            _ => Err(format!("Unknown points format: {}", s)),
        }
    }
}

/// Line counts gathered while reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadStats {
    /// Lines seen, including blank ones
    pub lines_read: usize,
    /// Non-blank lines that did not parse
    pub skipped_lines: usize,
}

/// Parses points sources in one [`PointsFormat`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PointsReader {
    format: PointsFormat,
}

fn parse_number(field: &str) -> Option<f64> {
    field.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl PointsReader {
    pub fn new(format: PointsFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> PointsFormat {
        self.format
    }

    /// Parse `x, y[, z]`; extra fields are ignored
    fn parse_absolute(line: &str) -> Option<Point> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 2 {
            return None;
        }
        let x = parse_number(fields[0])?;
        let y = parse_number(fields[1])?;
        let z = match fields.get(2) {
            Some(field) => parse_number(field)?,
            None => 0.0,
        };
        Some(Point::new(x, y, z))
    }

    /// Parse `dx dy`; extra fields are ignored
    fn parse_delta(line: &str) -> Option<(f64, f64)> {
        let mut fields = line.split_whitespace();
        let dx = parse_number(fields.next()?)?;
        let dy = parse_number(fields.next()?)?;
        Some((dx, dy))
    }

    /// Parse a whole points source
    pub fn parse_str(&self, text: &str) -> GeometryResult<Vec<Point>> {
        self.parse_str_with_stats(text).map(|(points, _)| points)
    }

    /// Parse a whole points source, also returning line counts
    pub fn parse_str_with_stats(&self, text: &str) -> GeometryResult<(Vec<Point>, ReadStats)> {
        let text = text.trim_start_matches(BYTE_ORDER_MARK);
        let mut points = Vec::new();
        let mut stats = ReadStats::default();
        let (mut cursor_x, mut cursor_y) = (0.0, 0.0);

        for (index, line) in text.lines().enumerate() {
            stats.lines_read += 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let point = match self.format {
                PointsFormat::Absolute => Self::parse_absolute(line),
                PointsFormat::Delta => Self::parse_delta(line).map(|(dx, dy)| {
                    cursor_x += dx;
                    cursor_y += dy;
                    Point::planar(cursor_x, cursor_y)
                }),
            };

            match point {
                Some(point) => points.push(point),
                None => {
                    stats.skipped_lines += 1;
                    tracing::debug!(line = index + 1, content = line, "skipping malformed point line");
                }
            }
        }

        if points.len() < MIN_POINTS {
            tracing::warn!(
                found = points.len(),
                skipped = stats.skipped_lines,
                format = %self.format,
                "points source has too few usable points"
            );
            return Err(DataError::InsufficientPoints {
                found: points.len(),
                required: MIN_POINTS,
            }
            .into());
        }

        Ok((points, stats))
    }

    /// Read and parse the points file at `path`
    ///
    /// The file is decoded leniently: bytes that are not valid UTF-8 only
    /// spoil the lines they appear on.
    pub fn read_file(&self, path: &Path) -> GeometryResult<Vec<Point>> {
        self.read_file_with_stats(path).map(|(points, _)| points)
    }

    /// Read and parse the points file at `path`, also returning line counts
    pub fn read_file_with_stats(&self, path: &Path) -> GeometryResult<(Vec<Point>, ReadStats)> {
        let bytes = fs::read(path)?;
        let text = String::from_utf8_lossy(&bytes);
        let (points, stats) = self.parse_str_with_stats(&text)?;
        tracing::info!(
            path = %path.display(),
            points = points.len(),
            skipped = stats.skipped_lines,
            "points file read"
        );
        Ok((points, stats))
    }
}
