//! Tops up under-filled categories from recommended candidates.

use std::collections::{HashMap, HashSet};

use crate::error::Shortfall;
use crate::model::{Category, Place, PlaceId};
use crate::traits::MinimumRequirement;

/// A place going into the outbound payload.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedPlace {
    pub place: Place,
    /// Added by auto-completion rather than chosen by the user.
    pub is_candidate: bool,
}

impl SelectedPlace {
    pub fn chosen(place: Place) -> Self {
        Self {
            place,
            is_candidate: false,
        }
    }

    pub fn candidate(place: Place) -> Self {
        Self {
            place,
            is_candidate: true,
        }
    }
}

/// Recommended candidates per category, in recommendation order.
#[derive(Debug, Clone, Default)]
pub struct RecommendedPool {
    pools: HashMap<Category, Vec<Place>>,
}

impl RecommendedPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, category: Category, place: Place) {
        self.pools.entry(category).or_default().push(place);
    }

    pub fn with(mut self, category: Category, places: Vec<Place>) -> Self {
        self.pools.entry(category).or_default().extend(places);
        self
    }

    pub fn candidates(&self, category: Category) -> &[Place] {
        self.pools.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Per-day minimums used when the caller has no policy of its own.
#[derive(Debug, Clone)]
pub struct DefaultMinimums {
    pub attractions_per_day: usize,
    pub restaurants_per_day: usize,
    pub cafes_per_day: usize,
}

impl Default for DefaultMinimums {
    fn default() -> Self {
        Self {
            attractions_per_day: 2,
            restaurants_per_day: 2,
            cafes_per_day: 1,
        }
    }
}

impl MinimumRequirement for DefaultMinimums {
    fn minimum_for(&self, trip_days: u32, category: Category) -> usize {
        let days = trip_days.max(1) as usize;
        match category {
            Category::Accommodation => usize::from(days > 1),
            Category::Attraction => self.attractions_per_day * days,
            Category::Restaurant => self.restaurants_per_day * days,
            Category::Cafe => self.cafes_per_day * days,
            Category::Transport | Category::Other => 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutoCompleteResult {
    /// New candidates, all with `is_candidate` set.
    pub additions: Vec<SelectedPlace>,
    pub shortfalls: Vec<Shortfall>,
}

/// Fill each category up to its minimum from the recommended pool.
///
/// Candidates already selected, or already added for another category, are
/// skipped. A pool too small for the shortage fills what it can and reports
/// the remainder.
pub fn auto_complete<M: MinimumRequirement + ?Sized>(
    selected: &[Place],
    pool: &RecommendedPool,
    trip_days: u32,
    minimums: &M,
) -> AutoCompleteResult {
    let mut taken: HashSet<PlaceId> = selected.iter().map(|p| p.id.clone()).collect();
    let mut result = AutoCompleteResult::default();

    for category in Category::PLANNED {
        let required = minimums.minimum_for(trip_days, category);
        let current = selected.iter().filter(|p| p.category == category).count();
        let shortage = required.saturating_sub(current);
        if shortage == 0 {
            continue;
        }

        let mut filled = 0;
        for candidate in pool.candidates(category) {
            if filled == shortage {
                break;
            }
            if taken.contains(&candidate.id) {
                continue;
            }
            taken.insert(candidate.id.clone());
            result.additions.push(SelectedPlace::candidate(candidate.clone()));
            filled += 1;
        }

        if filled < shortage {
            let missing = shortage - filled;
            tracing::warn!(
                category = %category,
                required,
                current,
                missing,
                "not enough recommended candidates to meet minimum"
            );
            result.shortfalls.push(Shortfall { category, missing });
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cafe(id: i64) -> Place {
        Place::new(id, format!("cafe-{}", id), Category::Cafe)
    }

    fn cafes_only(trip_days: u32, category: Category) -> usize {
        match category {
            Category::Cafe => trip_days as usize,
            _ => 0,
        }
    }

    #[test]
    fn test_fills_shortage_in_pool_order() {
        let pool = RecommendedPool::new().with(Category::Cafe, vec![cafe(10), cafe(11), cafe(12)]);
        let result = auto_complete(&[cafe(1)], &pool, 3, &cafes_only);

        let ids: Vec<_> = result.additions.iter().map(|p| p.place.id.clone()).collect();
        assert_eq!(ids, vec![PlaceId::from_int(10), PlaceId::from_int(11)]);
        assert!(result.additions.iter().all(|p| p.is_candidate));
        assert!(result.shortfalls.is_empty());
    }

    #[test]
    fn test_skips_already_selected() {
        let pool = RecommendedPool::new().with(Category::Cafe, vec![cafe(1), cafe(11)]);
        let result = auto_complete(&[cafe(1)], &pool, 2, &cafes_only);

        assert_eq!(result.additions.len(), 1);
        assert_eq!(result.additions[0].place.id, PlaceId::from_int(11));
    }

    #[test]
    fn test_reports_deficit() {
        let pool = RecommendedPool::new().with(Category::Cafe, vec![cafe(10)]);
        let result = auto_complete(&[], &pool, 3, &cafes_only);

        assert_eq!(result.additions.len(), 1);
        assert_eq!(
            result.shortfalls,
            vec![Shortfall {
                category: Category::Cafe,
                missing: 2
            }]
        );
    }

    #[test]
    fn test_default_minimums() {
        let minimums = DefaultMinimums::default();
        assert_eq!(minimums.minimum_for(1, Category::Accommodation), 0);
        assert_eq!(minimums.minimum_for(3, Category::Accommodation), 1);
        assert_eq!(minimums.minimum_for(3, Category::Restaurant), 6);
        assert_eq!(minimums.minimum_for(0, Category::Cafe), 1);
    }
}
