/// Limits applied to the scalar fields of a zone submission.
#[derive(Debug, Clone)]
pub struct Config {
    pub name_min_len: usize,
    pub name_max_len: usize,
    pub city_min_len: usize,
    pub max_priority: i64,
    pub max_fee: f64,
    pub max_prep_time: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name_min_len: 2,
            name_max_len: 100,
            city_min_len: 2,
            max_priority: 10_000,
            max_fee: 10_000.0,
            max_prep_time: 10_000,
        }
    }
}
