use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use parking_lot::RwLock;

use crate::{
    geometry::Boundary,
    zone::{
        FieldsPatch, NewZone, Zone, ZoneId,
        store::{Aggregates, Counter, StoreError, Transaction, ZoneStore},
    },
};

#[derive(Debug, Clone, Default)]
struct Tables {
    zones: BTreeMap<ZoneId, Zone>,
    // Unique index on zone name
    names: HashMap<String, ZoneId>,
    aggregates: Aggregates,
    last_id: ZoneId,
}

/// In-process zone store. Transactions run one at a time against a staged copy of the
/// tables which replaces the committed copy only on success.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Default::default()
    }
}

impl ZoneStore for MemoryStore {
    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn Transaction) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut committed = self.tables.write();
        let mut tx = MemoryTransaction {
            staged: committed.clone(),
        };
        let value = f(&mut tx)?;
        *committed = tx.staged;
        Ok(value)
    }

    fn zone(&self, id: ZoneId) -> Result<Option<Zone>, StoreError> {
        Ok(self.tables.read().zones.get(&id).cloned())
    }

    fn zones(&self) -> Result<Vec<Zone>, StoreError> {
        Ok(self.tables.read().zones.values().cloned().collect())
    }

    fn aggregates(&self) -> Result<Aggregates, StoreError> {
        Ok(self.tables.read().aggregates)
    }
}

struct MemoryTransaction {
    staged: Tables,
}

impl MemoryTransaction {
    fn row_mut(&mut self, id: ZoneId) -> Result<&mut Zone, StoreError> {
        self.staged
            .zones
            .get_mut(&id)
            .ok_or(StoreError::MissingRow(id))
    }
}

impl Transaction for MemoryTransaction {
    fn zone(&self, id: ZoneId) -> Result<Option<Zone>, StoreError> {
        Ok(self.staged.zones.get(&id).cloned())
    }

    fn zone_by_name(&self, name: &str) -> Result<Option<Zone>, StoreError> {
        Ok(self
            .staged
            .names
            .get(name)
            .and_then(|id| self.staged.zones.get(id))
            .cloned())
    }

    fn insert(&mut self, zone: NewZone) -> Result<Zone, StoreError> {
        if self.staged.names.contains_key(&zone.name) {
            return Err(StoreError::UniqueViolation(zone.name));
        }
        self.staged.last_id += 1;
        let now = Utc::now();
        let row = Zone {
            id: self.staged.last_id,
            name: zone.name,
            city: zone.city,
            boundary: zone.boundary,
            is_active: zone.is_active,
            priority: zone.priority,
            base_fee: zone.base_fee,
            per_km_fee: zone.per_km_fee,
            avg_prep_time: zone.avg_prep_time,
            created_at: now,
            updated_at: now,
        };
        self.staged.names.insert(row.name.clone(), row.id);
        self.staged.zones.insert(row.id, row.clone());
        Ok(row)
    }

    fn write_boundary(&mut self, id: ZoneId, boundary: Boundary) -> Result<(), StoreError> {
        let row = self.row_mut(id)?;
        row.boundary = boundary;
        row.updated_at = Utc::now();
        Ok(())
    }

    fn write_fields(&mut self, id: ZoneId, fields: &FieldsPatch) -> Result<Zone, StoreError> {
        if let Some(name) = &fields.name {
            match self.staged.names.get(name) {
                Some(owner) if *owner != id => {
                    return Err(StoreError::UniqueViolation(name.clone()));
                }
                _ => {}
            }
        }
        let row = self.row_mut(id)?;
        let old_name = row.name.clone();
        fields.apply(row);
        row.updated_at = Utc::now();
        let row = row.clone();
        if row.name != old_name {
            self.staged.names.remove(&old_name);
            self.staged.names.insert(row.name.clone(), id);
        }
        Ok(row)
    }

    fn remove(&mut self, id: ZoneId) -> Result<Zone, StoreError> {
        let row = self
            .staged
            .zones
            .remove(&id)
            .ok_or(StoreError::MissingRow(id))?;
        self.staged.names.remove(&row.name);
        Ok(row)
    }

    fn increment(&mut self, counter: Counter, delta: i64) -> Result<(), StoreError> {
        self.staged.aggregates.apply(counter, delta)
    }
}
