use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::geometry::Error;

/// Tolerance used when comparing two drawn points.
pub const EPSILON: f64 = 1e-6;

pub const MAX_LONGITUDE: f64 = 180.0;
pub const MAX_LATITUDE: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Longitude,
    Latitude,
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Longitude => f.write_str("longitude"),
            Axis::Latitude => f.write_str("latitude"),
        }
    }
}

/// A `[lng, lat]` position. Serialized as a GeoJSON position pair.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("[{}, {}]", self.longitude, self.latitude))
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([longitude, latitude]: [f64; 2]) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        [value.longitude, value.latitude]
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((longitude, latitude): (f64, f64)) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

impl Coordinate {
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Checks both axes against their legal domain, longitude first.
    /// `index` is the position of the point in its ring and ends up in the error.
    pub fn validate(&self, index: usize) -> Result<(), Error> {
        if !(-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&self.longitude) {
            return Err(Error::CoordinateRange {
                index,
                axis: Axis::Longitude,
                value: self.longitude,
            });
        }
        if !(-MAX_LATITUDE..=MAX_LATITUDE).contains(&self.latitude) {
            return Err(Error::CoordinateRange {
                index,
                axis: Axis::Latitude,
                value: self.latitude,
            });
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate(0).is_ok()
    }

    /// Equal within [`EPSILON`] on both axes.
    pub fn approx_eq(&self, other: &Self) -> bool {
        (self.longitude - other.longitude).abs() < EPSILON
            && (self.latitude - other.latitude).abs() < EPSILON
    }
}

/// Z component of `(p - o) x (q - o)`. Positive when `q` lies to the left of `o -> p`.
pub fn cross(o: &Coordinate, p: &Coordinate, q: &Coordinate) -> f64 {
    (p.longitude - o.longitude) * (q.latitude - o.latitude)
        - (p.latitude - o.latitude) * (q.longitude - o.longitude)
}

/// Strict crossing of segments `a-b` and `c-d`. Touching or collinear segments do not count.
pub fn segments_cross(a: &Coordinate, b: &Coordinate, c: &Coordinate, d: &Coordinate) -> bool {
    let o1 = cross(a, b, c);
    let o2 = cross(a, b, d);
    let o3 = cross(c, d, a);
    let o4 = cross(c, d, b);
    o1 * o2 < 0.0 && o3 * o4 < 0.0
}

#[test]
fn range_bounds_are_inclusive() {
    assert!(Coordinate::new(180.0, 90.0).is_valid());
    assert!(Coordinate::new(-180.0, -90.0).is_valid());
}

#[test]
fn longitude_is_reported_before_latitude() {
    let err = Coordinate::new(181.0, 91.0).validate(3).unwrap_err();
    match err {
        Error::CoordinateRange { index, axis, .. } => {
            assert_eq!(index, 3);
            assert_eq!(axis, Axis::Longitude);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn nan_is_out_of_range() {
    assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    assert!(!Coordinate::new(0.0, f64::INFINITY).is_valid());
}

#[test]
fn approx_eq_test() {
    let a = Coordinate::new(77.209_000_0, 28.613_900_0);
    let b = Coordinate::new(77.209_000_4, 28.613_899_7);
    assert!(a.approx_eq(&b));
    assert!(!a.approx_eq(&Coordinate::new(77.209_01, 28.613_9)));
}

#[test]
fn touching_segments_do_not_cross() {
    let a = Coordinate::new(0.0, 0.0);
    let b = Coordinate::new(1.0, 0.0);
    let c = Coordinate::new(1.0, 0.0);
    let d = Coordinate::new(2.0, 1.0);
    assert!(!segments_cross(&a, &b, &c, &d));
}
