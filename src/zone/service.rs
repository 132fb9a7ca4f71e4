use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    geometry::{Coordinate, GeoJsonPolygon, validate_polygon},
    zone::{
        Config, Error, Zone, ZoneId, ZoneInput, ZonePatch,
        store::{Aggregates, Counter, Transaction, ZoneStore},
    },
};

/// Create, update and delete zones against a [`ZoneStore`]. Every request is validated in
/// full before a transaction is opened.
pub struct ZoneService<S> {
    store: S,
    config: Config,
}

impl<S: ZoneStore> ZoneService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn create(&self, input: &ZoneInput) -> Result<Zone, Error> {
        let zone = input.validate(&self.config).inspect_err(|err| {
            warn!("Rejected zone {:?}: {err}", input.name.trim());
        })?;
        let zone = self.store.transaction(|tx| -> Result<Zone, Error> {
            if tx.zone_by_name(&zone.name)?.is_some() {
                return Err(Error::DuplicateName(zone.name.clone()));
            }
            let zone = tx.insert(zone)?;
            tx.increment(Counter::Zones, 1)?;
            tx.increment(Counter::ZonesWithoutStores, 1)?;
            tx.increment(Counter::ZonesWithLowRiders, 1)?;
            if zone.is_active {
                tx.increment(Counter::ActiveZones, 1)?;
            }
            Ok(zone)
        })?;
        info!("Created zone {} ({})", zone.id, zone.name);
        Ok(zone)
    }

    /// Boundary is written before the scalar fields, both inside one transaction.
    ///
    /// A boundary equal to the stored one under
    /// [`same_as`](crate::geometry::Boundary::same_as) is not written, so
    /// resubmitting the stored ring with the opposite winding keeps the stored winding.
    pub fn update(&self, id: ZoneId, patch: &ZonePatch) -> Result<Zone, Error> {
        let patch = patch.validate(&self.config).inspect_err(|err| {
            warn!("Rejected update of zone {id}: {err}");
        })?;
        let zone = self.store.transaction(|tx| -> Result<Zone, Error> {
            let current = tx.zone(id)?.ok_or(Error::NotFound(id))?;

            let mut fields = patch.fields.clone();
            fields.name = fields.name.take().filter(|name| *name != current.name);
            if let Some(name) = &fields.name
                && tx.zone_by_name(name)?.is_some()
            {
                return Err(Error::DuplicateName(name.clone()));
            }

            let mut changed = false;
            if let Some(boundary) = &patch.boundary {
                if boundary.same_as(&current.boundary) {
                    debug!("Boundary of zone {id} unchanged, skipping geometry write");
                } else {
                    tx.write_boundary(id, boundary.clone())?;
                    changed = true;
                }
            }

            if !fields.is_empty() {
                adjust_active(tx, current.is_active, fields.is_active)?;
                tx.write_fields(id, &fields)?;
                changed = true;
            }

            if changed {
                tx.zone(id)?.ok_or(Error::NotFound(id))
            } else {
                Ok(current)
            }
        })?;
        info!("Updated zone {} ({})", zone.id, zone.name);
        Ok(zone)
    }

    pub fn delete(&self, id: ZoneId) -> Result<Zone, Error> {
        let zone = self.store.transaction(|tx| -> Result<Zone, Error> {
            tx.zone(id)?.ok_or(Error::NotFound(id))?;
            let zone = tx.remove(id)?;
            tx.increment(Counter::Zones, -1)?;
            tx.increment(Counter::ZonesWithoutStores, -1)?;
            tx.increment(Counter::ZonesWithLowRiders, -1)?;
            if zone.is_active {
                tx.increment(Counter::ActiveZones, -1)?;
            }
            Ok(zone)
        })?;
        info!("Deleted zone {} ({})", zone.id, zone.name);
        Ok(zone)
    }

    pub fn zone(&self, id: ZoneId) -> Result<Zone, Error> {
        self.store.zone(id)?.ok_or(Error::NotFound(id))
    }

    pub fn zones(&self) -> Result<Vec<Zone>, Error> {
        Ok(self.store.zones()?)
    }

    pub fn aggregates(&self) -> Result<Aggregates, Error> {
        Ok(self.store.aggregates()?)
    }

    /// Active zone covering `point`. Overlaps go to the highest priority, then the oldest id.
    pub fn locate(&self, point: &Coordinate) -> Result<Option<Zone>, Error> {
        point.validate(0)?;
        let zones = self.store.zones()?;
        Ok(zones
            .into_par_iter()
            .filter(|zone| zone.is_active && zone.boundary.contains(point))
            .max_by(|a, b| a.priority.cmp(&b.priority).then(b.id.cmp(&a.id))))
    }

    /// Stored zones whose boundary overlaps `polygon`, ordered by id. Validates `polygon`
    /// with the same rules as a create.
    pub fn overlapping(
        &self,
        polygon: &GeoJsonPolygon,
        exclude: Option<ZoneId>,
    ) -> Result<Vec<Zone>, Error> {
        let boundary = validate_polygon(polygon)?;
        let zones = self.store.zones()?;
        let mut overlapping: Vec<Zone> = zones
            .into_par_iter()
            .filter(|zone| Some(zone.id) != exclude && zone.boundary.overlaps(&boundary))
            .collect();
        overlapping.par_sort_unstable_by_key(|zone| zone.id);
        Ok(overlapping)
    }
}

fn adjust_active(
    tx: &mut dyn Transaction,
    was_active: bool,
    is_active: Option<bool>,
) -> Result<(), Error> {
    match is_active {
        Some(true) if !was_active => tx.increment(Counter::ActiveZones, 1)?,
        Some(false) if was_active => tx.increment(Counter::ActiveZones, -1)?,
        _ => {}
    }
    Ok(())
}
