//! Per-day and whole-trip category quotas.

use crate::categorize::PlaceBuckets;
use crate::model::Category;

/// Counts for the categories that carry quotas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub attraction: usize,
    pub restaurant: usize,
    pub cafe: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Attraction => self.attraction,
            Category::Restaurant => self.restaurant,
            Category::Cafe => self.cafe,
            _ => 0,
        }
    }

    /// Use up one slot of `category`. No-op for categories without quotas.
    pub fn take(&mut self, category: Category) {
        match category {
            Category::Attraction => self.attraction = self.attraction.saturating_sub(1),
            Category::Restaurant => self.restaurant = self.restaurant.saturating_sub(1),
            Category::Cafe => self.cafe = self.cafe.saturating_sub(1),
            _ => {}
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.attraction == 0 && self.restaurant == 0 && self.cafe == 0
    }
}

/// Quotas derived from bucket sizes and trip length.
///
/// Accommodation is not quota-driven: the assigner places at most one per day
/// while unused accommodations remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaPlan {
    pub num_days: u32,
    pub per_day: CategoryCounts,
    pub trip_total: CategoryCounts,
}

/// `ceil(count / num_days)` per category. A zero-day trip counts as one day.
pub fn quota_plan(buckets: &PlaceBuckets, num_days: u32) -> QuotaPlan {
    let days = num_days.max(1) as usize;
    let trip_total = CategoryCounts {
        attraction: buckets.count(Category::Attraction),
        restaurant: buckets.count(Category::Restaurant),
        cafe: buckets.count(Category::Cafe),
    };
    let per_day = CategoryCounts {
        attraction: trip_total.attraction.div_ceil(days),
        restaurant: trip_total.restaurant.div_ceil(days),
        cafe: trip_total.cafe.div_ceil(days),
    };

    QuotaPlan {
        num_days: days as u32,
        per_day,
        trip_total,
    }
}
