//! Zone boundary geometry.
//!
//! Coordinates are `[lng, lat]` pairs. A boundary is a GeoJSON polygon with exactly one
//! closed, simple ring; consecutive points closer than [`EPSILON`] are merged before the
//! ring is checked so that double clicks on a map do not produce zero length edges.

pub mod coordinate;
pub mod polygon;
pub mod ring;

pub use coordinate::*;
pub use polygon::*;
pub use ring::*;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Point {index} has an invalid {axis}: {value}")]
    CoordinateRange { index: usize, axis: Axis, value: f64 },
    #[error("Polygon must have at least 4 points, got {len}")]
    RingTooShort { len: usize },
    #[error("Polygon must enclose an area")]
    ZeroArea,
    #[error("Polygon must be closed")]
    NotClosed,
    #[error("Polygon cannot self-intersect (edges {first} and {second} cross)")]
    SelfIntersection { first: usize, second: usize },
    #[error("Polygon must have exactly one ring, got {count}")]
    MultiRingUnsupported { count: usize },
    #[error("Polygon has no ring")]
    MissingRing,
    #[error("Geometry type must be Polygon, got {0:?}")]
    UnsupportedType(String),
}

impl Error {
    /// Stable machine readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Error::CoordinateRange { .. } => "COORDINATE_OUT_OF_RANGE",
            Error::RingTooShort { .. } => "RING_TOO_SHORT",
            Error::ZeroArea => "DEGENERATE_RING",
            Error::NotClosed => "RING_NOT_CLOSED",
            Error::SelfIntersection { .. } => "SELF_INTERSECTION",
            Error::MultiRingUnsupported { .. } => "MULTI_RING_UNSUPPORTED",
            Error::MissingRing => "MISSING_RING",
            Error::UnsupportedType(_) => "UNSUPPORTED_GEOMETRY_TYPE",
        }
    }
}
