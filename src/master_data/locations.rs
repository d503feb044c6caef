//! Location table keyed by location id

use std::collections::BTreeMap;

use crate::models::Location;

/// Location id -> master record, seeded unresolved
#[derive(Debug, Clone, Default)]
pub struct LocationTable {
    entries: BTreeMap<String, Option<Location>>,
}

impl LocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an id that needs a master record
    pub fn seed(&mut self, id: &str) {
        if !self.entries.contains_key(id) {
            self.entries.insert(id.to_string(), None);
        }
    }

    /// Store a fetched master record under its id
    pub fn populate(&mut self, location: Location) {
        self.entries.insert(location.id.clone(), Some(location));
    }

    /// Master record for an id; None when unknown or never resolved
    pub fn get(&self, id: &str) -> Option<&Location> {
        self.entries.get(id).and_then(Option::as_ref)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn unresolved_count(&self) -> usize {
        self.entries.values().filter(|l| l.is_none()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<Location> for LocationTable {
    fn from_iter<I: IntoIterator<Item = Location>>(iter: I) -> Self {
        let mut table = Self::new();
        for location in iter {
            table.populate(location);
        }
        table
    }
}
