use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::{Coordinate, Error, Ring};

pub const POLYGON_TYPE: &str = "Polygon";

/// A GeoJSON polygon as submitted by a client. Nothing about it is trusted yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonPolygon {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Vec<Ring>,
}

impl GeoJsonPolygon {
    pub fn new(ring: Ring) -> Self {
        Self {
            kind: POLYGON_TYPE.into(),
            coordinates: vec![ring],
        }
    }

    /// The only ring, if there is exactly one.
    pub fn single_ring(&self) -> Option<&Ring> {
        match self.coordinates.as_slice() {
            [ring] => Some(ring),
            _ => None,
        }
    }
}

impl From<Vec<Coordinate>> for GeoJsonPolygon {
    fn from(value: Vec<Coordinate>) -> Self {
        Self::new(value.into())
    }
}

/// A polygon that passed [`validate_polygon`]. Holds the normalized ring.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(into = "GeoJsonPolygon")]
pub struct Boundary {
    ring: Ring,
}

impl From<Boundary> for GeoJsonPolygon {
    fn from(value: Boundary) -> Self {
        GeoJsonPolygon::new(value.ring)
    }
}

impl TryFrom<&GeoJsonPolygon> for Boundary {
    type Error = Error;

    fn try_from(value: &GeoJsonPolygon) -> Result<Self, Self::Error> {
        validate_polygon(value)
    }
}

impl Boundary {
    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn to_geojson(&self) -> GeoJsonPolygon {
        GeoJsonPolygon::new(self.ring.clone())
    }

    /// Same ring, allowing the reverse winding. See [`Ring::same_boundary`].
    pub fn same_as(&self, other: &Self) -> bool {
        self.ring.same_boundary(&other.ring)
    }

    pub fn contains(&self, point: &Coordinate) -> bool {
        match self.bounds() {
            Some(bounds) if within(&bounds, point) => self.ring.contains(point),
            _ => false,
        }
    }

    pub fn bounds(&self) -> Option<[f64; 4]> {
        self.ring.bounds()
    }

    /// Interiors share area: some pair of edges crosses, or some point strictly inside
    /// both rings exists. Rings that only touch along an edge or at a vertex do not overlap;
    /// identical rings do.
    pub fn overlaps(&self, other: &Self) -> bool {
        let (Some(a), Some(b)) = (self.bounds(), other.bounds()) else {
            return false;
        };
        if a[0] >= b[2] || b[0] >= a[2] || a[1] >= b[3] || b[1] >= a[3] {
            return false;
        }
        self.ring.crosses(&other.ring) || shares_interior(&self.ring, &other.ring)
    }
}

/// Without strict crossings, every horizontal slab between two consecutive vertex
/// latitudes is cut into cells by the edges of both rings, and each cell is either inside
/// both rings everywhere or nowhere. Sampling the middle of every cell on the slab's
/// midline settles it; those samples never sit on an edge.
fn shares_interior(a: &Ring, b: &Ring) -> bool {
    let mut latitudes: Vec<f64> = a
        .points()
        .iter()
        .chain(b.points())
        .map(|point| point.latitude)
        .collect();
    latitudes.sort_by(f64::total_cmp);
    latitudes.dedup();

    latitudes.windows(2).any(|slab| {
        let latitude = (slab[0] + slab[1]) / 2.0;
        let mut longitudes: Vec<f64> = a
            .crossings_at(latitude)
            .chain(b.crossings_at(latitude))
            .collect();
        longitudes.sort_by(f64::total_cmp);
        longitudes
            .windows(2)
            .filter(|cell| cell[0] < cell[1])
            .any(|cell| {
                let sample = Coordinate::new((cell[0] + cell[1]) / 2.0, latitude);
                a.contains(&sample) && b.contains(&sample)
            })
    })
}

fn within(bounds: &[f64; 4], point: &Coordinate) -> bool {
    point.longitude >= bounds[0]
        && point.latitude >= bounds[1]
        && point.longitude <= bounds[2]
        && point.latitude <= bounds[3]
}

/// The one authority on what counts as a zone boundary. Checks, in order: the type tag,
/// the ring count, coordinate ranges, then the deduplicated ring's length, closure and
/// simplicity.
pub fn validate_polygon(polygon: &GeoJsonPolygon) -> Result<Boundary, Error> {
    if polygon.kind != POLYGON_TYPE {
        return Err(Error::UnsupportedType(polygon.kind.clone()));
    }
    let ring = match polygon.coordinates.as_slice() {
        [] => return Err(Error::MissingRing),
        [ring] => ring,
        rings => return Err(Error::MultiRingUnsupported { count: rings.len() }),
    };
    let ring = ring.normalize().inspect_err(|err| {
        debug!("Rejected polygon: {err}");
    })?;
    debug!("Accepted polygon with {} points", ring.len());
    Ok(Boundary { ring })
}

/// Exact, winding-insensitive comparison of two single-ring polygons.
pub fn polygons_equal(a: &GeoJsonPolygon, b: &GeoJsonPolygon) -> bool {
    match (a.single_ring(), b.single_ring()) {
        (Some(a), Some(b)) => a.same_boundary(b),
        _ => false,
    }
}
