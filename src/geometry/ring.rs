use serde::{Deserialize, Serialize};

use crate::geometry::{
    Coordinate, EPSILON, Error,
    coordinate::{cross, segments_cross},
};

/// 3 distinct vertices plus the closing repeat.
pub const MIN_RING_LEN: usize = 4;

/// Ordered coordinates of a closed loop.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ring(Vec<Coordinate>);

impl From<Vec<Coordinate>> for Ring {
    fn from(value: Vec<Coordinate>) -> Self {
        Self(value)
    }
}

impl From<Ring> for Vec<Coordinate> {
    fn from(value: Ring) -> Self {
        value.0
    }
}

impl FromIterator<Coordinate> for Ring {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Ring {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Segments `(p[i], p[i + 1])` in ring order.
    pub fn edges(&self) -> impl Iterator<Item = (&Coordinate, &Coordinate)> + '_ {
        self.0.windows(2).map(|pair| (&pair[0], &pair[1]))
    }

    pub fn check_ranges(&self) -> Result<(), Error> {
        self.0
            .iter()
            .enumerate()
            .try_for_each(|(i, point)| point.validate(i))
    }

    /// Collapses runs of adjacent points that are equal within epsilon, keeping the
    /// first point of every run. Non-adjacent repeats such as the closing point survive.
    pub fn dedupe(&self) -> Self {
        let mut points: Vec<Coordinate> = Vec::with_capacity(self.0.len());
        for point in &self.0 {
            match points.last() {
                Some(last) if last.approx_eq(point) => {}
                _ => points.push(*point),
            }
        }
        Self(points)
    }

    pub fn check_length(&self) -> Result<(), Error> {
        if self.0.len() < MIN_RING_LEN {
            return Err(Error::RingTooShort { len: self.0.len() });
        }
        Ok(())
    }

    /// Fewer than 3 distinct vertices cannot enclose anything, however long the ring is.
    /// Reported as a ring of `distinct + 1` points.
    pub fn check_distinct(&self) -> Result<(), Error> {
        let open = &self.0[..self.0.len().saturating_sub(1)];
        let mut distinct: Vec<&Coordinate> = Vec::with_capacity(MIN_RING_LEN - 1);
        for point in open {
            if !distinct.iter().any(|seen| seen.approx_eq(point)) {
                distinct.push(point);
                if distinct.len() == MIN_RING_LEN - 1 {
                    return Ok(());
                }
            }
        }
        Err(Error::RingTooShort {
            len: distinct.len() + 1,
        })
    }

    /// Collinear rings pass every other check but have no interior.
    pub fn check_area(&self) -> Result<(), Error> {
        if self.signed_area().abs() <= EPSILON * EPSILON {
            return Err(Error::ZeroArea);
        }
        Ok(())
    }

    pub fn check_closed(&self) -> Result<(), Error> {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) if first.approx_eq(last) => Ok(()),
            _ => Err(Error::NotClosed),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.check_closed().is_ok()
    }

    /// First pair of non-adjacent edges that strictly cross, scanning `i` then `j > i + 1`.
    /// The first and last edge share the closing vertex and are never compared.
    pub fn find_self_intersection(&self) -> Option<(usize, usize)> {
        let points = &self.0;
        if points.len() < 2 {
            return None;
        }
        let edge_count = points.len() - 1;
        for i in 0..edge_count {
            let (a, b) = (&points[i], &points[i + 1]);
            for j in (i + 2)..edge_count {
                if i == 0 && j == edge_count - 1 {
                    continue;
                }
                let (c, d) = (&points[j], &points[j + 1]);
                if segments_cross(a, b, c, d) {
                    return Some((i, j));
                }
            }
        }
        None
    }

    pub fn check_simple(&self) -> Result<(), Error> {
        match self.find_self_intersection() {
            Some((first, second)) => Err(Error::SelfIntersection { first, second }),
            None => Ok(()),
        }
    }

    /// Range check, dedupe, length, closure, distinct vertices, self-intersection and
    /// area, in that order. Returns the deduplicated ring.
    pub fn normalize(&self) -> Result<Self, Error> {
        self.check_ranges()?;
        let ring = self.dedupe();
        ring.check_length()?;
        ring.check_closed()?;
        ring.check_distinct()?;
        ring.check_simple()?;
        ring.check_area()?;
        Ok(ring)
    }

    /// Same length and the same vertex sequence read forwards or backwards, compared exactly.
    /// A ring rotated to start on another vertex is a different ring.
    pub fn same_boundary(&self, other: &Self) -> bool {
        if self.0.len() != other.0.len() {
            return false;
        }
        let forward = self.0.iter().zip(other.0.iter()).all(|(a, b)| a == b);
        forward || self.0.iter().zip(other.0.iter().rev()).all(|(a, b)| a == b)
    }

    /// Even-odd ray cast. Points on an edge may land either side.
    pub fn contains(&self, point: &Coordinate) -> bool {
        let mut inside = false;
        for (a, b) in self.edges() {
            if (a.latitude > point.latitude) != (b.latitude > point.latitude) {
                let t = (point.latitude - a.latitude) / (b.latitude - a.latitude);
                if point.longitude < a.longitude + t * (b.longitude - a.longitude) {
                    inside = !inside;
                }
            }
        }
        inside
    }

    /// Longitudes where the horizontal line at `latitude` crosses an edge, in edge order.
    /// Horizontal edges never cross.
    pub fn crossings_at(&self, latitude: f64) -> impl Iterator<Item = f64> + '_ {
        self.edges().filter_map(move |(a, b)| {
            if (a.latitude > latitude) == (b.latitude > latitude) {
                return None;
            }
            let t = (latitude - a.latitude) / (b.latitude - a.latitude);
            Some(a.longitude + t * (b.longitude - a.longitude))
        })
    }

    /// `[min_lng, min_lat, max_lng, max_lat]`, `None` for an empty ring.
    pub fn bounds(&self) -> Option<[f64; 4]> {
        let first = self.0.first()?;
        let init = [
            first.longitude,
            first.latitude,
            first.longitude,
            first.latitude,
        ];
        Some(self.0.iter().fold(init, |[x0, y0, x1, y1], p| {
            [
                x0.min(p.longitude),
                y0.min(p.latitude),
                x1.max(p.longitude),
                y1.max(p.latitude),
            ]
        }))
    }

    /// Shoelace area in squared degrees. Positive for counter-clockwise rings.
    pub fn signed_area(&self) -> f64 {
        let origin = Coordinate::default();
        self.edges().map(|(a, b)| cross(&origin, a, b)).sum::<f64>() / 2.0
    }

    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// Whether any edge of `self` strictly crosses any edge of `other`.
    pub fn crosses(&self, other: &Self) -> bool {
        self.edges()
            .any(|(a, b)| other.edges().any(|(c, d)| segments_cross(a, b, c, d)))
    }
}

#[cfg(test)]
fn ring(points: &[[f64; 2]]) -> Ring {
    points.iter().copied().map(Coordinate::from).collect()
}

#[test]
fn dedupe_keeps_closing_point() {
    let r = ring(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]);
    assert_eq!(r.dedupe(), r);
}

#[test]
fn dedupe_collapses_near_duplicates() {
    let r = ring(&[
        [0.0, 0.0],
        [1.0, 0.0],
        [1.000_000_1, 0.0],
        [1.0, 1.0],
        [0.0, 0.0],
    ]);
    assert_eq!(
        r.dedupe(),
        ring(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]])
    );
}

#[test]
fn first_and_last_edge_are_adjacent() {
    // A triangle: edge 0 and edge 2 share the closing vertex.
    let r = ring(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0]]);
    assert_eq!(r.find_self_intersection(), None);
}

#[test]
fn distinct_vertices_ignore_the_closing_point() {
    let back_and_forth = ring(&[[0.0, 0.0], [1.0, 0.0], [0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]);
    assert_eq!(
        back_and_forth.check_distinct(),
        Err(Error::RingTooShort { len: 3 })
    );
    let triangle = ring(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 0.0]]);
    assert_eq!(triangle.check_distinct(), Ok(()));
}

#[test]
fn crossings_skip_horizontal_edges() {
    let r = ring(&[[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0], [0.0, 0.0]]);
    assert_eq!(r.crossings_at(1.0).collect::<Vec<_>>(), vec![0.0, 2.0]);
    assert_eq!(r.crossings_at(3.0).count(), 0);
}

#[test]
fn contains_test() {
    let r = ring(&[[0.0, 0.0], [0.0, 2.0], [2.0, 2.0], [2.0, 0.0], [0.0, 0.0]]);
    assert!(r.contains(&Coordinate::new(1.0, 1.0)));
    assert!(!r.contains(&Coordinate::new(3.0, 1.0)));
    assert!(!r.contains(&Coordinate::new(1.0, -0.5)));
}

#[test]
fn winding_test() {
    let cw = ring(&[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]]);
    let ccw = ring(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]);
    assert!(cw.is_clockwise());
    assert!(!ccw.is_clockwise());
    assert_eq!(ccw.signed_area(), 1.0);
}

#[test]
fn bounds_test() {
    let r = ring(&[[-1.0, 2.0], [3.0, 2.0], [3.0, 5.0], [-1.0, 2.0]]);
    assert_eq!(r.bounds(), Some([-1.0, 2.0, 3.0, 5.0]));
    assert_eq!(Ring::default().bounds(), None);
}
