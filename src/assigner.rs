//! Greedy nearest-neighbour day assigner (heuristic path).
//!
//! Each day is seeded with an accommodation, else an attraction, else any
//! remaining place, then filled with the nearest unused place whose category
//! still has quota left for the day.

use chrono::{Datelike, Duration, NaiveDateTime, NaiveTime};

use crate::categorize::{CategorizedPlace, PlaceBuckets, UsedSet};
use crate::config::BuildOptions;
use crate::haversine::{haversine_km, TravelTimeEstimator};
use crate::model::{
    date_label, weekday_abbrev, Category, Coordinates, ItineraryDay, ItineraryPlaceWithTime, Place,
    PlaceId, TripWindow,
};
use crate::quota::{quota_plan, CategoryCounts};

/// Categories the fill phase draws from, in tie-break order.
const FILL_CATEGORIES: [Category; 3] = [Category::Attraction, Category::Restaurant, Category::Cafe];

#[derive(Debug, Clone)]
pub struct Assignment {
    pub days: Vec<ItineraryDay>,
    pub used: UsedSet,
    /// Places left over after every day closed.
    pub unplaced: Vec<PlaceId>,
}

/// Simulated state of the day being built.
struct DayState<'a> {
    day: u32,
    day_key: &'static str,
    clock: NaiveDateTime,
    /// Midnight closing the day. Stays must end before it.
    closes_at: NaiveDateTime,
    position: Option<Coordinates>,
    quota_left: CategoryCounts,
    places: Vec<ItineraryPlaceWithTime>,
    estimator: &'a TravelTimeEstimator,
    options: &'a BuildOptions,
}

impl<'a> DayState<'a> {
    fn travel_to(&self, place: &Place) -> Duration {
        match (self.position, place.coordinates()) {
            (Some(from), Some(to)) => {
                Duration::minutes(i64::from(self.estimator.minutes_for_km(haversine_km(from, to))))
            }
            _ => Duration::zero(),
        }
    }

    /// Whether a visit to `place` would end before the day closes.
    fn fits(&self, place: &Place) -> bool {
        let stay = Duration::minutes(i64::from(self.options.stay.for_category(place.category)));
        self.clock + self.travel_to(place) + stay < self.closes_at
    }

    fn push(&mut self, place: &Place, used: &mut UsedSet) {
        self.clock += self.travel_to(place);

        let stay = self.options.stay.for_category(place.category);
        let entry = ItineraryPlaceWithTime::new(
            format!("{}_{}_{}", place.id, self.day, self.places.len()),
            place.clone(),
            self.clock.time(),
            stay,
            format!("{}_{}", self.day_key, self.clock.format("%H%M")),
        );
        self.clock += Duration::minutes(i64::from(stay));
        if let Some(coords) = place.coordinates() {
            self.position = Some(coords);
        }

        used.mark(&place.id);
        self.quota_left.take(place.category);
        self.places.push(entry);
    }
}

/// Build every trip day from the bucketed places.
pub fn assign_days(buckets: &PlaceBuckets, window: &TripWindow, options: &BuildOptions) -> Assignment {
    let num_days = window.num_days();
    let plan = quota_plan(buckets, num_days);
    let estimator = TravelTimeEstimator::new(options.speed_kmh);
    let mut used = UsedSet::new();
    let mut days = Vec::with_capacity(num_days as usize);

    for index in 0..num_days {
        let date = window.date_for(index);
        let day_key = weekday_abbrev(date.weekday());

        let opens_at = if index == 0 {
            window.start.time()
        } else {
            options.day_start
        };
        let mut state = DayState {
            day: index + 1,
            day_key,
            clock: date.and_time(opens_at),
            closes_at: (date + Duration::days(1)).and_time(NaiveTime::MIN),
            position: None,
            quota_left: plan.per_day,
            places: Vec::new(),
            estimator: &estimator,
            options,
        };

        if let Some(seed) = pick_seed(buckets, &used).filter(|seed| state.fits(&seed.place)) {
            state.push(&seed.place, &mut used);

            while !state.quota_left.is_exhausted() {
                match nearest_unused(buckets, &used, state.position, &state.quota_left) {
                    Some(next) if state.fits(&next.place) => state.push(&next.place, &mut used),
                    Some(next) => {
                        tracing::debug!(day = index + 1, place = %next.place.name, "day closes at midnight");
                        break;
                    }
                    None => break,
                }
            }
        }

        let mut places = state.places;
        let score = estimator.score_day(&mut places);

        tracing::debug!(
            day = index + 1,
            places = places.len(),
            distance_km = score.total_distance_km,
            "closed heuristic day"
        );

        let mut day = ItineraryDay::empty(index + 1, day_key, Some(date_label(date)));
        day.places = places;
        day.total_distance_km = score.total_distance_km;
        day.route_data.segment_routes = score.segments;
        days.push(day);
    }

    let unplaced = buckets
        .unused(&used)
        .into_iter()
        .map(|place| place.id.clone())
        .collect();

    Assignment {
        days,
        used,
        unplaced,
    }
}

/// First unused accommodation, else attraction, else any remaining place.
fn pick_seed<'b>(buckets: &'b PlaceBuckets, used: &UsedSet) -> Option<&'b CategorizedPlace> {
    let first_unused = |category: Category| {
        buckets
            .bucket(category)
            .iter()
            .find(|entry| !used.contains(&entry.place.id))
    };

    first_unused(Category::Accommodation)
        .or_else(|| first_unused(Category::Attraction))
        .or_else(|| first_unused(Category::Restaurant))
        .or_else(|| first_unused(Category::Cafe))
}

/// Nearest unused place with quota left. Equidistant candidates resolve to
/// the first in bucket order; places without coordinates come last.
fn nearest_unused<'b>(
    buckets: &'b PlaceBuckets,
    used: &UsedSet,
    position: Option<Coordinates>,
    quota_left: &CategoryCounts,
) -> Option<&'b CategorizedPlace> {
    let mut best: Option<(&CategorizedPlace, f64)> = None;

    for category in FILL_CATEGORIES {
        if quota_left.get(category) == 0 {
            continue;
        }
        for entry in buckets.bucket(category) {
            if used.contains(&entry.place.id) {
                continue;
            }
            let distance = match (position, entry.place.coordinates()) {
                (Some(from), Some(to)) => haversine_km(from, to),
                _ => f64::INFINITY,
            };
            let closer = match best {
                None => true,
                Some((_, best_distance)) => distance < best_distance,
            };
            if closer {
                best = Some((entry, distance));
            }
        }
    }

    best.map(|(entry, _)| entry)
}
