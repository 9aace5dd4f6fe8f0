//! Data models for scan planning and point geometry
//!
//! This module provides:
//! - The immutable scan parameter record collected from the operator
//! - Zone identifiers (start, main, end) used by the planner and reports
//! - A 3D point used by the points reader and geometry writers

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three contiguous sub-ranges of the scan length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneKind {
    /// Optional leading zone, usually scanned with a finer step
    Start,
    /// Zone between the start and end zones; always present
    Main,
    /// Optional trailing zone, usually scanned with a finer step
    End,
}

impl ZoneKind {
    /// Zones in emission order
    pub const ALL: [ZoneKind; 3] = [ZoneKind::Start, ZoneKind::Main, ZoneKind::End];
}

impl fmt::Display for ZoneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "Start zone"),
            Self::Main => write!(f, "Main zone"),
            Self::End => write!(f, "End zone"),
        }
    }
}

/// Physical parameters of one probe scan (millimeters, mm/min)
///
/// Values are taken as entered; [`ScanParameters::effective_zone_length`]
/// applies the rule that a disabled zone has zero length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanParameters {
    /// Total travel along the advance axis (mm)
    pub scan_length: f64,
    /// Distance the probe travels toward the surface each cycle (mm)
    pub probe_depth: f64,
    /// Distance the probe backs off after contact (mm)
    pub retract: f64,
    /// Feed rate (mm/min)
    pub speed: f64,
    pub use_start_zone: bool,
    pub start_zone_length: f64,
    pub start_zone_step: f64,
    pub main_zone_step: f64,
    pub use_end_zone: bool,
    pub end_zone_length: f64,
    pub end_zone_step: f64,
}

impl Default for ScanParameters {
    fn default() -> Self {
        Self {
            scan_length: 100.0,
            probe_depth: 20.0,
            retract: 5.0,
            speed: 300.0,
            use_start_zone: true,
            start_zone_length: 10.0,
            start_zone_step: 0.5,
            main_zone_step: 2.0,
            use_end_zone: true,
            end_zone_length: 10.0,
            end_zone_step: 0.5,
        }
    }
}

impl ScanParameters {
    /// Whether a zone takes part in the scan. The main zone always does.
    pub fn zone_is_active(&self, kind: ZoneKind) -> bool {
        match kind {
            ZoneKind::Start => self.use_start_zone,
            ZoneKind::Main => true,
            ZoneKind::End => self.use_end_zone,
        }
    }

    /// Zone length after applying the enable flags
    ///
    /// The main zone covers whatever the start and end zones leave over,
    /// floored at zero.
    pub fn effective_zone_length(&self, kind: ZoneKind) -> f64 {
        match kind {
            ZoneKind::Start if self.use_start_zone => self.start_zone_length,
            ZoneKind::End if self.use_end_zone => self.end_zone_length,
            ZoneKind::Start | ZoneKind::End => 0.0,
            ZoneKind::Main => (self.scan_length
                - self.effective_zone_length(ZoneKind::Start)
                - self.effective_zone_length(ZoneKind::End))
            .max(0.0),
        }
    }

    /// Step size configured for a zone
    pub fn zone_step(&self, kind: ZoneKind) -> f64 {
        match kind {
            ZoneKind::Start => self.start_zone_step,
            ZoneKind::Main => self.main_zone_step,
            ZoneKind::End => self.end_zone_step,
        }
    }

    /// Offset of the zone's first step from the scan origin
    pub fn zone_start_offset(&self, kind: ZoneKind) -> f64 {
        match kind {
            ZoneKind::Start => 0.0,
            ZoneKind::Main => self.effective_zone_length(ZoneKind::Start),
            ZoneKind::End => {
                self.effective_zone_length(ZoneKind::Start)
                    + self.effective_zone_length(ZoneKind::Main)
            }
        }
    }
}

/// A point read from a probe points file
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Point on the XY plane (z = 0)
    pub fn planar(x: f64, y: f64) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Component-wise comparison within `tolerance`
    pub fn approx_eq(&self, other: &Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.z - other.z).abs() <= tolerance
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X:{:.3} Y:{:.3} Z:{:.3}", self.x, self.y, self.z)
    }
}
