use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    geometry::{Boundary, GeoJsonPolygon, validate_polygon},
    zone::{Config, Error},
};

pub type ZoneId = u64;

/// A named service area as stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    pub city: String,
    pub boundary: Boundary,
    pub is_active: bool,
    pub priority: u32,
    pub base_fee: f64,
    pub per_km_fee: f64,
    // Minutes
    pub avg_prep_time: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create request body. Values are checked by [`ZoneInput::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneInput {
    pub name: String,
    pub city: String,
    pub boundary: GeoJsonPolygon,
    pub is_active: bool,
    pub priority: i64,
    pub base_fee: f64,
    pub per_km_fee: f64,
    pub avg_prep_time: i64,
}

/// Partial update body. Absent fields are left untouched; an absent boundary skips
/// geometry validation entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ZonePatch {
    pub name: Option<String>,
    pub city: Option<String>,
    pub boundary: Option<GeoJsonPolygon>,
    pub is_active: Option<bool>,
    pub priority: Option<i64>,
    pub base_fee: Option<f64>,
    pub per_km_fee: Option<f64>,
    pub avg_prep_time: Option<i64>,
}

/// A create request that passed every check.
#[derive(Debug, Clone)]
pub struct NewZone {
    pub name: String,
    pub city: String,
    pub boundary: Boundary,
    pub is_active: bool,
    pub priority: u32,
    pub base_fee: f64,
    pub per_km_fee: f64,
    pub avg_prep_time: u32,
}

/// Scalar columns of an update, written separately from the boundary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldsPatch {
    pub name: Option<String>,
    pub city: Option<String>,
    pub is_active: Option<bool>,
    pub priority: Option<u32>,
    pub base_fee: Option<f64>,
    pub per_km_fee: Option<f64>,
    pub avg_prep_time: Option<u32>,
}

/// An update request that passed every check.
#[derive(Debug, Clone, Default)]
pub struct ValidPatch {
    pub boundary: Option<Boundary>,
    pub fields: FieldsPatch,
}

impl ZoneInput {
    /// Scalar fields first, then the polygon. Nothing here touches storage.
    pub fn validate(&self, config: &Config) -> Result<NewZone, Error> {
        let name = check_name(&self.name, config)?;
        let city = check_city(&self.city, config)?;
        let priority = check_integer("priority", self.priority, config.max_priority)?;
        let base_fee = check_amount("base_fee", self.base_fee, config.max_fee)?;
        let per_km_fee = check_amount("per_km_fee", self.per_km_fee, config.max_fee)?;
        let avg_prep_time =
            check_integer("avg_prep_time", self.avg_prep_time, config.max_prep_time)?;
        let boundary = validate_polygon(&self.boundary)?;
        Ok(NewZone {
            name,
            city,
            boundary,
            is_active: self.is_active,
            priority,
            base_fee,
            per_km_fee,
            avg_prep_time,
        })
    }
}

impl ZonePatch {
    pub fn validate(&self, config: &Config) -> Result<ValidPatch, Error> {
        let fields = FieldsPatch {
            name: self
                .name
                .as_deref()
                .map(|name| check_name(name, config))
                .transpose()?,
            city: self
                .city
                .as_deref()
                .map(|city| check_city(city, config))
                .transpose()?,
            is_active: self.is_active,
            priority: self
                .priority
                .map(|value| check_integer("priority", value, config.max_priority))
                .transpose()?,
            base_fee: self
                .base_fee
                .map(|value| check_amount("base_fee", value, config.max_fee))
                .transpose()?,
            per_km_fee: self
                .per_km_fee
                .map(|value| check_amount("per_km_fee", value, config.max_fee))
                .transpose()?,
            avg_prep_time: self
                .avg_prep_time
                .map(|value| check_integer("avg_prep_time", value, config.max_prep_time))
                .transpose()?,
        };
        let boundary = self.boundary.as_ref().map(validate_polygon).transpose()?;
        Ok(ValidPatch { boundary, fields })
    }
}

impl FieldsPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(&self, zone: &mut Zone) {
        if let Some(name) = &self.name {
            zone.name = name.clone();
        }
        if let Some(city) = &self.city {
            zone.city = city.clone();
        }
        if let Some(is_active) = self.is_active {
            zone.is_active = is_active;
        }
        if let Some(priority) = self.priority {
            zone.priority = priority;
        }
        if let Some(base_fee) = self.base_fee {
            zone.base_fee = base_fee;
        }
        if let Some(per_km_fee) = self.per_km_fee {
            zone.per_km_fee = per_km_fee;
        }
        if let Some(avg_prep_time) = self.avg_prep_time {
            zone.avg_prep_time = avg_prep_time;
        }
    }
}

fn check_name(name: &str, config: &Config) -> Result<String, Error> {
    let name = name.trim();
    let len = name.chars().count();
    if len < config.name_min_len || len > config.name_max_len {
        return Err(Error::InvalidField {
            field: "name",
            reason: format!(
                "must be between {} and {} characters",
                config.name_min_len, config.name_max_len
            ),
        });
    }
    Ok(name.to_string())
}

fn check_city(city: &str, config: &Config) -> Result<String, Error> {
    let city = city.trim();
    if city.chars().count() < config.city_min_len {
        return Err(Error::InvalidField {
            field: "city",
            reason: format!("must be at least {} characters", config.city_min_len),
        });
    }
    Ok(city.to_string())
}

fn check_integer(field: &'static str, value: i64, max: i64) -> Result<u32, Error> {
    if !(0..=max).contains(&value) {
        return Err(Error::InvalidField {
            field,
            reason: format!("must be between 0 and {max}"),
        });
    }
    u32::try_from(value).map_err(|_| Error::InvalidField {
        field,
        reason: format!("must be between 0 and {max}"),
    })
}

fn check_amount(field: &'static str, value: f64, max: f64) -> Result<f64, Error> {
    if !value.is_finite() || !(0.0..=max).contains(&value) {
        return Err(Error::InvalidField {
            field,
            reason: format!("must be between 0 and {max}"),
        });
    }
    Ok(value)
}

#[cfg(test)]
fn sample_input() -> ZoneInput {
    use crate::geometry::Coordinate;

    let ring = vec![
        Coordinate::new(77.0, 28.0),
        Coordinate::new(77.0, 28.1),
        Coordinate::new(77.1, 28.1),
        Coordinate::new(77.1, 28.0),
        Coordinate::new(77.0, 28.0),
    ];
    ZoneInput {
        name: "  Sector 12 ".into(),
        city: "Gurugram".into(),
        boundary: ring.into(),
        is_active: true,
        priority: 5,
        base_fee: 20.0,
        per_km_fee: 5.0,
        avg_prep_time: 15,
    }
}

#[test]
fn input_is_trimmed() {
    let zone = sample_input().validate(&Config::default()).unwrap();
    assert_eq!(zone.name, "Sector 12");
    assert_eq!(zone.priority, 5);
}

#[test]
fn one_char_name_is_rejected() {
    let mut input = sample_input();
    input.name = " A ".into();
    let err = input.validate(&Config::default()).unwrap_err();
    assert_eq!(err.code(), "INVALID_DATA");
}

#[test]
fn fee_limits() {
    let mut input = sample_input();
    input.base_fee = 10_000.01;
    assert!(input.validate(&Config::default()).is_err());
    input.base_fee = f64::NAN;
    assert!(input.validate(&Config::default()).is_err());
    input.base_fee = 10_000.0;
    assert!(input.validate(&Config::default()).is_ok());
}

#[test]
fn negative_priority_is_rejected() {
    let mut input = sample_input();
    input.priority = -1;
    assert!(matches!(
        input.validate(&Config::default()),
        Err(Error::InvalidField {
            field: "priority",
            ..
        })
    ));
}

#[test]
fn scalar_fields_are_checked_before_geometry() {
    let mut input = sample_input();
    input.avg_prep_time = 10_001;
    input.boundary.kind = "LineString".into();
    assert_eq!(
        input.validate(&Config::default()).unwrap_err().code(),
        "INVALID_DATA"
    );
}

#[test]
fn empty_patch_validates_to_nothing() {
    let patch = ZonePatch::default().validate(&Config::default()).unwrap();
    assert!(patch.boundary.is_none());
    assert!(patch.fields.is_empty());
}
