//! Point table output
//!
//! One CSV row per point. The first row is a `Point` (move to), every later
//! row a `LineTo`. Heights are not carried; Z is always written as 0.0.

use super::{malformed, GeometryFormat};
use crate::error::GeometryResult;
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use proscan_core::{format_coordinate, Point};
use std::io;

/// Header row of the point table
pub const POINT_TABLE_HEADER: [&str; 7] = ["Type", "X", "Y", "Z", "Bulge", "Weight", "Layer"];

const MOVE_TO: &str = "Point";
const LINE_TO: &str = "LineTo";

/// Render `points` as a point table, newline terminated
pub fn write_point_table(points: &[Point]) -> GeometryResult<String> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(POINT_TABLE_HEADER)?;
    for (index, point) in points.iter().enumerate() {
        let kind = if index == 0 { MOVE_TO } else { LINE_TO };
        let x = format_coordinate(point.x);
        let y = format_coordinate(point.y);
        writer.write_record([kind, x.as_str(), y.as_str(), "0.0", "0.0", "1", "0"])?;
    }

    let buffer = writer
        .into_inner()
        .map_err(|e| io::Error::new(e.error().kind(), e.to_string()))?;
    String::from_utf8(buffer)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// Parse a point table back into planar points
pub fn read_point_table(text: &str) -> GeometryResult<Vec<Point>> {
    let format = GeometryFormat::PointTable;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    if headers.iter().ne(POINT_TABLE_HEADER) {
        return Err(malformed(format, "unexpected header row").into());
    }

    let mut points = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let row = index + 2;
        let expected = if index == 0 { MOVE_TO } else { LINE_TO };
        if record.get(0) != Some(expected) {
            return Err(malformed(format, format!("row {} is not a {} row", row, expected)).into());
        }
        let coordinate = |column: usize| -> GeometryResult<f64> {
            record
                .get(column)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .ok_or_else(|| malformed(format, format!("bad coordinate in row {}", row)).into())
        };
        points.push(Point::planar(coordinate(1)?, coordinate(2)?));
    }
    Ok(points)
}
