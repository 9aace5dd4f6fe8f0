//! # ProScan Geometry
//!
//! The points-to-geometry pipeline: read the probe points recorded during a
//! scan and export them as a polyline for CAD/CAM import.
//!
//! ## Modules
//!
//! - `points_reader`: absolute and delta points file grammars
//! - `serializer`: DXF drawing, minimal entity text and point table output,
//!   each with a matching reader
//! - `error`: geometry error type

pub mod error;
pub mod points_reader;
pub mod serializer;

pub use error::{GeometryError, GeometryResult};
pub use points_reader::{PointsFormat, PointsReader, ReadStats, MIN_POINTS};
pub use serializer::{GeometryDocument, GeometryFormat, GeometrySerializer};

use proscan_core::Point;
use std::path::Path;

/// Read a points file and serialize it in one step
///
/// Nothing is written; the caller decides where the document goes.
pub fn convert_points_file(
    path: &Path,
    points_format: PointsFormat,
    geometry_format: GeometryFormat,
) -> GeometryResult<(Vec<Point>, GeometryDocument)> {
    let points = PointsReader::new(points_format).read_file(path)?;
    let document = GeometrySerializer::new(geometry_format).serialize(&points)?;
    Ok((points, document))
}
