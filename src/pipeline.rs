//! Itinerary build entry points.
//!
//! Two paths produce the same model: the heuristic builder works from the
//! trip's own places, and ingestion rebuilds days from a planner response.
//! When the planner fails the heuristic path runs from scratch on the same
//! inputs.

use chrono::NaiveDateTime;
use rayon::prelude::*;

use crate::assembler::ItineraryAssembler;
use crate::assigner::assign_days;
use crate::autocomplete::{auto_complete, RecommendedPool, SelectedPlace};
use crate::categorize::categorize;
use crate::config::BuildOptions;
use crate::day_order::WeekdayTable;
use crate::error::{BuildError, Diagnostic};
use crate::matcher::{IdHints, MatcherConfig};
use crate::model::{Itinerary, Place, TripWindow};
use crate::schedule::{PayloadPlace, SchedulePayload, ScheduleResponse};
use crate::traits::{MinimumRequirement, PlaceLookup, SchedulePlanner};

/// Inputs of one itinerary build.
#[derive(Debug, Clone, Default)]
pub struct TripRequest {
    /// Places the user picked.
    pub places: Vec<Place>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    /// Selection sent for this trip earlier, used as id hints.
    pub prior_selection: Vec<PayloadPlace>,
}

impl TripRequest {
    /// Trip over `start..=end` with no prior selection.
    pub fn new(places: Vec<Place>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            places,
            start: Some(start),
            end: Some(end),
            prior_selection: Vec::new(),
        }
    }

    /// Validated window; both dates are required.
    pub fn window(&self) -> Result<TripWindow, BuildError> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => TripWindow::new(start, end),
            _ => Err(BuildError::MissingDates),
        }
    }
}

/// Builds itineraries against one place store.
///
/// Options, airport handling and the weekday table default to the Jeju
/// setup and can be replaced with the `with_*` methods.
pub struct ItineraryBuilder<'a, L: PlaceLookup> {
    lookup: &'a L,
    options: BuildOptions,
    matcher_config: MatcherConfig,
    weekdays: WeekdayTable,
}

impl<'a, L: PlaceLookup> ItineraryBuilder<'a, L> {
    /// Builder with default configuration.
    pub fn new(lookup: &'a L) -> Self {
        Self {
            lookup,
            options: BuildOptions::default(),
            matcher_config: MatcherConfig::default(),
            weekdays: WeekdayTable::default(),
        }
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_matcher_config(mut self, config: MatcherConfig) -> Self {
        self.matcher_config = config;
        self
    }

    pub fn with_weekdays(mut self, weekdays: WeekdayTable) -> Self {
        self.weekdays = weekdays;
        self
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build days from the trip's places with the greedy assigner.
    pub fn build_heuristic(&self, trip: &TripRequest) -> Result<Itinerary, BuildError> {
        let window = trip.window()?;
        if trip.places.is_empty() {
            return Err(BuildError::MissingPlaces);
        }

        let buckets = categorize(&trip.places);
        let assignment = assign_days(&buckets, &window, &self.options);

        let itinerary = Itinerary {
            days: assignment.days,
            diagnostics: Vec::new(),
            unplaced: assignment.unplaced,
        };
        tracing::info!(
            days = itinerary.days.len(),
            places = itinerary.place_count(),
            unplaced = itinerary.unplaced.len(),
            "built heuristic itinerary"
        );
        Ok(itinerary)
    }

    /// Rebuild days from a planner response. Dates are optional here; without
    /// a start date days keep their label order and carry no calendar date.
    pub fn ingest(
        &self,
        trip: &TripRequest,
        payload: Option<&SchedulePayload>,
        response: &ScheduleResponse,
    ) -> Result<Itinerary, BuildError> {
        if response.schedule.is_empty() {
            return Err(BuildError::MissingPlaces);
        }

        let window = match (trip.start, trip.end) {
            (Some(_), Some(_)) => Some(trip.window()?),
            _ => None,
        };
        let start = window.map(|w| w.start.date()).or(trip.start.map(|s| s.date()));
        let trip_days = window.map(|w| w.num_days());

        let hints = IdHints {
            payload,
            prior_selection: &trip.prior_selection,
        };
        let assembler = ItineraryAssembler::new(self.lookup, &self.options, &self.matcher_config, &self.weekdays);
        let mut diagnostics = Vec::new();
        let days = assembler.assemble(response, hints, start, trip_days, &mut diagnostics);

        let itinerary = Itinerary {
            days,
            diagnostics,
            unplaced: Vec::new(),
        };
        tracing::info!(
            days = itinerary.days.len(),
            places = itinerary.place_count(),
            diagnostics = itinerary.diagnostics.len(),
            "ingested planner schedule"
        );
        Ok(itinerary)
    }

    /// User picks plus auto-completed candidates, as a planner payload.
    pub fn prepare_payload<M: MinimumRequirement + ?Sized>(
        &self,
        trip: &TripRequest,
        pool: &RecommendedPool,
        minimums: &M,
    ) -> Result<(SchedulePayload, Vec<Diagnostic>), BuildError> {
        let window = trip.window()?;
        if trip.places.is_empty() {
            return Err(BuildError::MissingPlaces);
        }

        let completion = auto_complete(&trip.places, pool, window.num_days(), minimums);
        let mut selection: Vec<SelectedPlace> = trip.places.iter().cloned().map(SelectedPlace::chosen).collect();
        selection.extend(completion.additions);

        let diagnostics = completion
            .shortfalls
            .into_iter()
            .map(Diagnostic::QuotaShortfall)
            .collect();
        Ok((SchedulePayload::from_selection(&selection, &window), diagnostics))
    }

    /// Ask the planner for a schedule and ingest it, falling back to the
    /// heuristic builder when the planner fails.
    pub fn build_with_planner<P, M>(
        &self,
        trip: &TripRequest,
        pool: &RecommendedPool,
        minimums: &M,
        planner: &P,
    ) -> Result<Itinerary, BuildError>
    where
        P: SchedulePlanner + ?Sized,
        M: MinimumRequirement + ?Sized,
    {
        let (payload, mut diagnostics) = self.prepare_payload(trip, pool, minimums)?;

        let outcome = planner
            .request_schedule(&payload)
            .map_err(|err| err.to_string())
            .and_then(|response| {
                if response.schedule.is_empty() {
                    Err("planner returned an empty schedule".to_string())
                } else {
                    Ok(response)
                }
            });

        let mut itinerary = match outcome {
            Ok(response) => self.ingest(trip, Some(&payload), &response)?,
            Err(reason) => {
                tracing::warn!(reason = %reason, "planner unavailable, building heuristic itinerary");
                let mut itinerary = self.build_heuristic(trip)?;
                itinerary.diagnostics.push(Diagnostic::PlannerUnavailable { reason });
                itinerary
            }
        };

        diagnostics.append(&mut itinerary.diagnostics);
        itinerary.diagnostics = diagnostics;
        Ok(itinerary)
    }

    /// Heuristic builds for several trips, run in parallel.
    pub fn build_many(&self, trips: &[TripRequest]) -> Vec<Result<Itinerary, BuildError>>
    where
        L: Sync,
    {
        trips.par_iter().map(|trip| self.build_heuristic(trip)).collect()
    }
}
