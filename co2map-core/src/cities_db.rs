use ustr::{Ustr, UstrMap};

use crate::city::CityRecord;
use crate::normalize;

/// The full city collection, built once at startup and never mutated
/// afterwards. Shared read-only across request handlers.
#[derive(Debug, Default)]
pub struct CitiesDb {
    pub all: UstrMap<CityRecord>,
}

impl CitiesDb {
    /// Last write wins: a duplicate key replaces the earlier record.
    pub fn insert(&mut self, record: CityRecord) {
        self.all.insert(record.key, record);
    }

    /// Case-insensitive, whitespace-insensitive lookup by city name.
    /// `from_existing` keeps arbitrary request strings out of the
    /// interner: only keys seen at load time can resolve.
    pub fn get(&self, raw_name: &str) -> Option<&CityRecord> {
        let key = Ustr::from_existing(&normalize(raw_name))?;
        self.all.get(&key)
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
