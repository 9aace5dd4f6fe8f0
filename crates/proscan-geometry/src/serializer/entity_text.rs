//! Minimal entity text
//!
//! A bare ENTITIES section holding one POLYLINE, written as group code and
//! value lines. Older CAM packages import this without a header section.

use super::{malformed, GeometryFormat};
use crate::error::GeometryResult;
use proscan_core::{format_coordinate, Point};

const LAYER: &str = "0";
const VERTEX_FLAGS: &str = "32";

fn push_pair(lines: &mut Vec<String>, code: &str, value: impl Into<String>) {
    lines.push(code.to_string());
    lines.push(value.into());
}

/// Render `points` as minimal entity text, newline terminated
pub fn write_entity_text(points: &[Point]) -> String {
    let mut lines = Vec::with_capacity(8 + points.len() * 14 + 6);

    push_pair(&mut lines, "0", "SECTION");
    push_pair(&mut lines, "2", "ENTITIES");
    push_pair(&mut lines, "0", "POLYLINE");
    push_pair(&mut lines, "8", LAYER);

    for point in points {
        push_pair(&mut lines, "0", "VERTEX");
        push_pair(&mut lines, "8", LAYER);
        push_pair(&mut lines, "10", format_coordinate(point.x));
        push_pair(&mut lines, "20", format_coordinate(point.y));
        push_pair(&mut lines, "30", format_coordinate(point.z));
        push_pair(&mut lines, "70", VERTEX_FLAGS);
    }

    push_pair(&mut lines, "0", "SEQEND");
    push_pair(&mut lines, "0", "ENDSEC");
    push_pair(&mut lines, "0", "EOF");

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Parse minimal entity text back into its vertices
///
/// Codes other than the vertex coordinates are accepted and ignored, so
/// files touched by other tools still read as long as the pairing holds.
pub fn read_entity_text(text: &str) -> GeometryResult<Vec<Point>> {
    let format = GeometryFormat::EntityText;
    let lines: Vec<&str> = text.lines().map(str::trim).collect();
    if lines.len() % 2 != 0 {
        return Err(malformed(format, "odd number of lines").into());
    }

    let mut points = Vec::new();
    let mut current: Option<Point> = None;
    let mut seen_polyline = false;
    let mut seen_eof = false;

    for (index, pair) in lines.chunks_exact(2).enumerate() {
        let (code, value) = (pair[0], pair[1]);
        let code: i32 = code
            .parse()
            .map_err(|_| malformed(format, format!("bad group code at pair {}", index + 1)))?;

        match code {
            0 => {
                if let Some(point) = current.take() {
                    points.push(point);
                }
                match value {
                    "POLYLINE" => seen_polyline = true,
                    "VERTEX" => {
                        if !seen_polyline {
                            return Err(malformed(format, "VERTEX before POLYLINE").into());
                        }
                        current = Some(Point::default());
                    }
                    "EOF" => {
                        seen_eof = true;
                        break;
                    }
                    _ => {}
                }
            }
            10 | 20 | 30 => {
                if let Some(point) = current.as_mut() {
                    let coordinate: f64 = value.parse().map_err(|_| {
                        malformed(format, format!("bad coordinate '{}' at pair {}", value, index + 1))
                    })?;
                    match code {
                        10 => point.x = coordinate,
                        20 => point.y = coordinate,
                        _ => point.z = coordinate,
                    }
                }
            }
            _ => {}
        }
    }

    if !seen_eof {
        return Err(malformed(format, "missing EOF marker").into());
    }
    Ok(points)
}
