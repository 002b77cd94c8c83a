//! Ordered in-memory profile collection keyed by id.

use std::collections::HashMap;

use crate::core::profile::Profile;

/// Ordered profile collection.
///
/// Order is significant: it is the tie-break order for ranking and the
/// positional order of the similarity index built over it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileStore {
    profiles: Vec<Profile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk load. Later duplicates of an id replace earlier ones in place.
    pub fn from_profiles(profiles: Vec<Profile>) -> Self {
        let mut store = Self::new();
        store.upsert(profiles);
        store
    }

    /// Insert-or-replace by id.
    ///
    /// A replaced record keeps its position; new ids are appended in batch
    /// order. Replacement is wholesale, no field-level merge.
    pub fn upsert(&mut self, records: impl IntoIterator<Item = Profile>) {
        let mut positions: HashMap<i64, usize> = self
            .profiles
            .iter()
            .enumerate()
            .map(|(pos, profile)| (profile.id, pos))
            .collect();

        for record in records {
            if let Some(&pos) = positions.get(&record.id) {
                self.profiles[pos] = record;
            } else {
                positions.insert(record.id, self.profiles.len());
                self.profiles.push(record);
            }
        }
    }

    pub fn as_slice(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Projected text of every profile, in store order.
    pub fn projections(&self) -> Vec<String> {
        self.profiles.iter().map(Profile::project).collect()
    }
}
