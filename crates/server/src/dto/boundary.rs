use serde::Serialize;
use zonekit::prelude::*;

/// Normalized boundary returned to the map editor.
#[derive(Debug, Clone, Serialize)]
pub struct BoundaryDto {
    pub boundary: GeoJsonPolygon,
    pub points: usize,
    pub clockwise: bool,
    pub bounds: Option<[f64; 4]>,
}

impl BoundaryDto {
    pub fn from(boundary: &Boundary) -> Self {
        Self {
            boundary: boundary.to_geojson(),
            points: boundary.ring().len(),
            clockwise: boundary.ring().is_clockwise(),
            bounds: boundary.bounds(),
        }
    }
}
