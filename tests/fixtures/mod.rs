//! Test fixtures for itinerary-planner.
//!
//! Provides real Jeju Island places (approximate coordinates from
//! OpenStreetMap) and helpers to turn them into `Place` records.

pub mod jeju_places;

pub use jeju_places::*;
