use std::fmt::Display;

use serde::Serialize;
use thiserror::Error;

use crate::{
    geometry::Boundary,
    zone::{FieldsPatch, NewZone, Zone, ZoneId},
};

mod memory;
pub use memory::*;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    #[error("Unique constraint violated for zone name {0:?}")]
    UniqueViolation(String),
    #[error("No zone row with id {0}")]
    MissingRow(ZoneId),
    #[error("Counter {0} cannot drop below zero")]
    CounterUnderflow(Counter),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Global platform counters kept next to the zone table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Counter {
    Zones,
    ZonesWithoutStores,
    ZonesWithLowRiders,
    ActiveZones,
}

impl Display for Counter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Counter::Zones => "zones",
            Counter::ZonesWithoutStores => "zones_without_stores",
            Counter::ZonesWithLowRiders => "zones_with_low_riders",
            Counter::ActiveZones => "active_zones",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Aggregates {
    pub zones: u64,
    pub zones_without_stores: u64,
    pub zones_with_low_riders: u64,
    pub active_zones: u64,
}

impl Aggregates {
    pub fn get(&self, counter: Counter) -> u64 {
        match counter {
            Counter::Zones => self.zones,
            Counter::ZonesWithoutStores => self.zones_without_stores,
            Counter::ZonesWithLowRiders => self.zones_with_low_riders,
            Counter::ActiveZones => self.active_zones,
        }
    }

    /// Adds `delta` to one counter. Fails instead of wrapping below zero.
    pub fn apply(&mut self, counter: Counter, delta: i64) -> Result<(), StoreError> {
        let slot = match counter {
            Counter::Zones => &mut self.zones,
            Counter::ZonesWithoutStores => &mut self.zones_without_stores,
            Counter::ZonesWithLowRiders => &mut self.zones_with_low_riders,
            Counter::ActiveZones => &mut self.active_zones,
        };
        *slot = slot
            .checked_add_signed(delta)
            .ok_or(StoreError::CounterUnderflow(counter))?;
        Ok(())
    }
}

/// Operations available inside one unit of work. Nothing written through a transaction
/// is visible to other readers until the closure passed to
/// [`ZoneStore::transaction`] returns `Ok`.
pub trait Transaction {
    fn zone(&self, id: ZoneId) -> Result<Option<Zone>, StoreError>;

    /// Exact, case sensitive match.
    fn zone_by_name(&self, name: &str) -> Result<Option<Zone>, StoreError>;

    /// Fails with [`StoreError::UniqueViolation`] when the name is taken.
    fn insert(&mut self, zone: NewZone) -> Result<Zone, StoreError>;

    fn write_boundary(&mut self, id: ZoneId, boundary: Boundary) -> Result<(), StoreError>;

    /// Fails with [`StoreError::UniqueViolation`] on a rename onto a taken name.
    fn write_fields(&mut self, id: ZoneId, fields: &FieldsPatch) -> Result<Zone, StoreError>;

    fn remove(&mut self, id: ZoneId) -> Result<Zone, StoreError>;

    fn increment(&mut self, counter: Counter, delta: i64) -> Result<(), StoreError>;
}

/// Persistence collaborator for zones and the global counters.
pub trait ZoneStore: Send + Sync {
    /// Runs `f` as one serializable unit of work. Commits when `f` returns `Ok`,
    /// discards every staged write otherwise.
    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn Transaction) -> Result<T, E>,
        E: From<StoreError>;

    fn zone(&self, id: ZoneId) -> Result<Option<Zone>, StoreError>;

    /// Committed zones ordered by id.
    fn zones(&self) -> Result<Vec<Zone>, StoreError>;

    fn aggregates(&self) -> Result<Aggregates, StoreError>;
}

#[test]
fn counter_underflow_is_an_error() {
    let mut aggregates = Aggregates::default();
    aggregates.apply(Counter::ActiveZones, 1).unwrap();
    aggregates.apply(Counter::ActiveZones, -1).unwrap();
    assert_eq!(
        aggregates.apply(Counter::ActiveZones, -1),
        Err(StoreError::CounterUnderflow(Counter::ActiveZones))
    );
    assert_eq!(aggregates.get(Counter::ActiveZones), 0);
}
