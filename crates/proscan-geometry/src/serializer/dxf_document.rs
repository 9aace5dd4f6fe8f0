//! DXF drawing output through the `dxf` crate
//!
//! The points become the vertices of a single POLYLINE on layer 0. The
//! polyline is flagged 3D only when some point leaves the XY plane.

use super::{malformed, GeometryFormat};
use crate::error::GeometryResult;
use dxf::entities::{Entity, EntityType, Polyline, Vertex};
use dxf::enums::AcadVersion;
use dxf::Drawing;
use proscan_core::{Point, COORDINATE_DECIMALS};
use std::io;

const POLYLINE_3D: i32 = 8;
const VERTEX_3D: i32 = 32;

fn round_coordinate(value: f64) -> f64 {
    let scale = 10f64.powi(COORDINATE_DECIMALS as i32);
    let rounded = (value * scale).round() / scale;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Render `points` as an R2010 DXF drawing
pub fn write_dxf(points: &[Point]) -> GeometryResult<String> {
    let mut drawing = Drawing::new();
    drawing.header.version = AcadVersion::R2010;

    let is_3d = points.iter().any(|p| p.z != 0.0);
    let mut polyline = Polyline::default();
    if is_3d {
        polyline.flags |= POLYLINE_3D;
    }

    for point in points {
        let mut vertex = Vertex::new(dxf::Point::new(
            round_coordinate(point.x),
            round_coordinate(point.y),
            round_coordinate(point.z),
        ));
        if is_3d {
            vertex.flags |= VERTEX_3D;
        }
        polyline.add_vertex(&mut drawing, vertex);
    }

    drawing.add_entity(Entity::new(EntityType::Polyline(polyline)));

    let mut buffer = Vec::new();
    drawing.save(&mut buffer)?;
    String::from_utf8(buffer)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// Read the vertices of the first polyline in a DXF drawing
pub fn read_dxf(text: &str) -> GeometryResult<Vec<Point>> {
    let mut reader = text.as_bytes();
    let drawing = Drawing::load(&mut reader)?;

    for entity in drawing.entities() {
        match &entity.specific {
            EntityType::Polyline(polyline) => {
                return Ok(polyline
                    .vertices()
                    .map(|v| Point::new(v.location.x, v.location.y, v.location.z))
                    .collect());
            }
            EntityType::LwPolyline(polyline) => {
                return Ok(polyline
                    .vertices
                    .iter()
                    .map(|v| Point::planar(v.x, v.y))
                    .collect());
            }
            _ => {}
        }
    }

    Err(malformed(GeometryFormat::Dxf, "no polyline entity").into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polyline_flags(text: &str) -> i32 {
        let mut reader = text.as_bytes();
        let drawing = Drawing::load(&mut reader).unwrap();
        let flags = drawing
            .entities()
            .find_map(|e| match &e.specific {
                EntityType::Polyline(p) => Some(p.flags),
                _ => None,
            })
            .unwrap();
        flags
    }

    #[test]
    fn test_planar_points_stay_2d() {
        let text = write_dxf(&[Point::planar(0.0, 0.0), Point::planar(10.0, 5.0)]).unwrap();
        assert_eq!(polyline_flags(&text) & POLYLINE_3D, 0);
        assert!(text.contains("POLYLINE"));
    }

    #[test]
    fn test_any_height_makes_it_3d() {
        let text = write_dxf(&[Point::planar(0.0, 0.0), Point::new(10.0, 5.0, -1.5)]).unwrap();
        assert_ne!(polyline_flags(&text) & POLYLINE_3D, 0);
    }

    #[test]
    fn test_read_back_in_order() {
        let points = vec![
            Point::new(3.0, 1.0, 0.5),
            Point::new(-2.0, 4.25, 0.0),
            Point::new(0.123456, 7.0, 1.0),
        ];
        let read = read_dxf(&write_dxf(&points).unwrap()).unwrap();
        assert_eq!(read.len(), 3);
        for (a, b) in read.iter().zip(&points) {
            assert!(a.approx_eq(b, 1e-5), "{} != {}", a, b);
        }
    }

    #[test]
    fn test_coordinate_rounding() {
        assert_eq!(round_coordinate(0.123456), 0.12346);
        assert_eq!(round_coordinate(-0.000001), 0.0);
    }
}
