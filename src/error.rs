//! Error and diagnostic types.
//!
//! Only missing trip input aborts a build. Everything else degrades into a
//! [`Diagnostic`] attached to the returned itinerary.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::model::Category;

/// Conditions that abort an itinerary build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("no places supplied for the trip")]
    MissingPlaces,

    #[error("trip start and end dates are required")]
    MissingDates,

    #[error("trip ends ({end}) before it starts ({start})")]
    InvalidWindow {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Failures talking to the external schedule planner.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error("planner request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("planner returned status {0}")]
    Status(u16),

    #[error("planner response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A category the auto-complete engine could not fill to its minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    pub category: Category,
    pub missing: usize,
}

/// Non-fatal findings collected while building an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A schedule item matched nothing and was replaced by a fallback place.
    UnresolvedPlace { name: String, time_block: String },
    /// Auto-completion ran out of recommended candidates.
    QuotaShortfall(Shortfall),
    /// Blank or otherwise unusable entries were dropped from a route array.
    MalformedRoute { day_key: String, skipped: usize },
    /// The same weekday label stands for more than one trip day.
    DayKeyCollision { key: String, occurrences: usize },
    /// A day group's label disagrees with the weekday of its computed date.
    DayLabelMismatch { day: u32, label: String, actual: String },
    /// A day group's label is not in the weekday table.
    UnknownDayKey { key: String },
    /// The external planner failed and the heuristic path was used instead.
    PlannerUnavailable { reason: String },
}
