pub mod geometry;
pub mod zone;

pub mod prelude {
    pub use crate::geometry::{
        Boundary, Coordinate, GeoJsonPolygon, Ring, polygons_equal, validate_polygon,
    };
    pub use crate::zone::{
        Config, Error, Zone, ZoneId, ZoneInput, ZonePatch, ZoneService,
        store::{Aggregates, Counter, MemoryStore, StoreError, Transaction, ZoneStore},
    };
}
