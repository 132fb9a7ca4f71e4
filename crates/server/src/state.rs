use zonekit::prelude::*;

pub struct AppState {
    pub zones: ZoneService<MemoryStore>,
}

impl AppState {
    pub fn new(zones: ZoneService<MemoryStore>) -> Self {
        Self { zones }
    }
}
