//! Rebuilds the per-day itinerary from a planner response.

use crate::config::BuildOptions;
use crate::day_order::{group_by_day_key, normalize_day_order, WeekdayTable};
use crate::error::Diagnostic;
use crate::grouping::group_consecutive;
use crate::haversine::TravelTimeEstimator;
use crate::matcher::{IdHints, MatcherConfig, ScheduleItemMatcher};
use crate::model::{date_label, ItineraryDay};
use crate::route::route_data;
use crate::schedule::{RouteSummary, ScheduleResponse};
use crate::traits::PlaceLookup;

use chrono::NaiveDate;

/// Turns a flat planner schedule into numbered, scored days.
pub struct ItineraryAssembler<'a, L: PlaceLookup> {
    lookup: &'a L,
    options: &'a BuildOptions,
    matcher_config: &'a MatcherConfig,
    weekdays: &'a WeekdayTable,
}

impl<'a, L: PlaceLookup> ItineraryAssembler<'a, L> {
    /// Borrow the store and configuration for one ingestion.
    pub fn new(
        lookup: &'a L,
        options: &'a BuildOptions,
        matcher_config: &'a MatcherConfig,
        weekdays: &'a WeekdayTable,
    ) -> Self {
        Self {
            lookup,
            options,
            matcher_config,
            weekdays,
        }
    }

    /// Match, group, order and score every planner day.
    pub fn assemble(
        &self,
        response: &ScheduleResponse,
        hints: IdHints<'_>,
        start: Option<NaiveDate>,
        trip_days: Option<u32>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<ItineraryDay> {
        let matcher = ScheduleItemMatcher::new(self.lookup, self.matcher_config, &self.options.aliases, hints);
        let estimator = TravelTimeEstimator::new(self.options.speed_kmh);

        let groups = group_by_day_key(&response.schedule);
        let ordered = normalize_day_order(groups, self.weekdays, start, trip_days, diagnostics);

        let mut days = Vec::with_capacity(ordered.len());
        for planned in ordered {
            let matched = matcher.match_day(&planned.items, diagnostics);
            let mut places = group_consecutive(&matched, planned.day, self.options.day_start);
            let score = estimator.score_day(&mut places);

            let summary = self.summary_for(&response.route_summary, &planned.key);
            let mut route = route_data(summary, diagnostics);
            route.segment_routes = score.segments;

            tracing::debug!(
                day = planned.day,
                key = %planned.key,
                slots = planned.items.len(),
                stops = places.len(),
                distance_km = score.total_distance_km,
                "assembled planner day"
            );

            days.push(ItineraryDay {
                day: planned.day,
                day_of_week: planned.day_of_week,
                date: planned.date.map(date_label),
                places,
                total_distance_km: score.total_distance_km,
                interleaved_route: summary.map(|s| s.interleaved_route.clone()).unwrap_or_default(),
                route_data: route,
            });
        }

        days
    }

    /// First summary whose day label names the same weekday as `key`.
    fn summary_for<'r>(&self, summaries: &'r [RouteSummary], key: &str) -> Option<&'r RouteSummary> {
        let weekday = self.weekdays.weekday(key);
        summaries.iter().find(|summary| match weekday {
            Some(day) => self.weekdays.weekday(&summary.day) == Some(day),
            None => summary.day.trim() == key.trim(),
        })
    }
}
