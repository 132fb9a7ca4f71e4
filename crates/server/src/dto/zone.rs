use serde::{Deserialize, Serialize};
use zonekit::prelude::*;

#[derive(Debug, Clone, Serialize)]
pub struct ZoneDto {
    pub id: ZoneId,
    pub name: String,
    pub city: String,
    pub boundary: GeoJsonPolygon,
    pub is_active: bool,
    pub priority: u32,
    pub base_fee: f64,
    pub per_km_fee: f64,
    pub avg_prep_time: u32,
    pub created_at: String,
    pub updated_at: String,
}

impl ZoneDto {
    pub fn from(zone: &Zone) -> Self {
        Self {
            id: zone.id,
            name: zone.name.clone(),
            city: zone.city.clone(),
            boundary: zone.boundary.to_geojson(),
            is_active: zone.is_active,
            priority: zone.priority,
            base_fee: zone.base_fee,
            per_km_fee: zone.per_km_fee,
            avg_prep_time: zone.avg_prep_time,
            created_at: zone.created_at.to_rfc3339(),
            updated_at: zone.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocateQuery {
    pub lng: f64,
    pub lat: f64,
}

impl From<&LocateQuery> for Coordinate {
    fn from(value: &LocateQuery) -> Self {
        Coordinate::new(value.lng, value.lat)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverlapRequest {
    pub boundary: GeoJsonPolygon,
    pub exclude_id: Option<ZoneId>,
}
