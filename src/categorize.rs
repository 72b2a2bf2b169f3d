//! Category buckets for the heuristic builder.

use std::collections::HashSet;

use crate::model::{Category, Place, PlaceId};

/// A place plus its usage within one build.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorizedPlace {
    pub place: Place,
    pub used_in_itinerary: bool,
}

/// Ids placed so far in one build. Source places are never mutated.
#[derive(Debug, Clone, Default)]
pub struct UsedSet {
    ids: HashSet<PlaceId>,
}

impl UsedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `id` as placed in this build.
    pub fn mark(&mut self, id: &PlaceId) {
        self.ids.insert(id.clone());
    }

    pub fn contains(&self, id: &PlaceId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Places bucketed by the four planned categories, in input order.
#[derive(Debug, Clone, Default)]
pub struct PlaceBuckets {
    pub accommodations: Vec<CategorizedPlace>,
    pub attractions: Vec<CategorizedPlace>,
    pub restaurants: Vec<CategorizedPlace>,
    pub cafes: Vec<CategorizedPlace>,
}

impl PlaceBuckets {
    /// Places of one category in input order. Unplanned categories are empty.
    pub fn bucket(&self, category: Category) -> &[CategorizedPlace] {
        match category {
            Category::Accommodation => &self.accommodations,
            Category::Attraction => &self.attractions,
            Category::Restaurant => &self.restaurants,
            Category::Cafe => &self.cafes,
            Category::Transport | Category::Other => &[],
        }
    }

    pub fn count(&self, category: Category) -> usize {
        self.bucket(category).len()
    }

    /// Places across all buckets.
    pub fn total(&self) -> usize {
        Category::PLANNED.iter().map(|c| self.count(*c)).sum()
    }

    /// Copy of the buckets with usage flags taken from `used`.
    pub fn with_usage(&self, used: &UsedSet) -> PlaceBuckets {
        let annotate = |bucket: &[CategorizedPlace]| {
            bucket
                .iter()
                .map(|entry| CategorizedPlace {
                    place: entry.place.clone(),
                    used_in_itinerary: used.contains(&entry.place.id),
                })
                .collect()
        };
        PlaceBuckets {
            accommodations: annotate(&self.accommodations),
            attractions: annotate(&self.attractions),
            restaurants: annotate(&self.restaurants),
            cafes: annotate(&self.cafes),
        }
    }

    /// Places not yet used, in category then input order.
    pub fn unused(&self, used: &UsedSet) -> Vec<&Place> {
        Category::PLANNED
            .iter()
            .flat_map(|category| self.bucket(*category))
            .map(|entry| &entry.place)
            .filter(|place| !used.contains(&place.id))
            .collect()
    }
}

/// Bucket places by category. Places outside the planned categories are dropped.
pub fn categorize(places: &[Place]) -> PlaceBuckets {
    let mut buckets = PlaceBuckets::default();

    for place in places {
        let entry = CategorizedPlace {
            place: place.clone(),
            used_in_itinerary: false,
        };
        match place.category {
            Category::Accommodation => buckets.accommodations.push(entry),
            Category::Attraction => buckets.attractions.push(entry),
            Category::Restaurant => buckets.restaurants.push(entry),
            Category::Cafe => buckets.cafes.push(entry),
            Category::Transport | Category::Other => {
                tracing::debug!(
                    place_id = %place.id,
                    name = %place.name,
                    category = %place.category,
                    "dropping place outside planned categories"
                );
            }
        }
    }

    buckets
}
