//! In-memory place store.

use std::collections::HashMap;

use crate::model::{Place, PlaceId};
use crate::traits::PlaceLookup;

/// Place store indexed by id and exact name. The first place seen for a name
/// wins the name index.
#[derive(Debug, Clone, Default)]
pub struct PlaceStore {
    by_id: HashMap<PlaceId, Place>,
    by_name: HashMap<String, PlaceId>,
}

impl PlaceStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a place. Ids replace earlier entries; names keep the first place seen.
    pub fn insert(&mut self, place: Place) {
        self.by_name
            .entry(place.name.trim().to_string())
            .or_insert_with(|| place.id.clone());
        self.by_id.insert(place.id.clone(), place);
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl FromIterator<Place> for PlaceStore {
    fn from_iter<I: IntoIterator<Item = Place>>(iter: I) -> Self {
        let mut store = PlaceStore::new();
        for place in iter {
            store.insert(place);
        }
        store
    }
}

impl PlaceLookup for PlaceStore {
    fn find_place_by_id(&self, id: &PlaceId) -> Option<Place> {
        self.by_id.get(id).cloned()
    }

    fn find_place_by_name(&self, name: &str) -> Option<Place> {
        self.by_name
            .get(name.trim())
            .and_then(|id| self.by_id.get(id))
            .cloned()
    }
}
