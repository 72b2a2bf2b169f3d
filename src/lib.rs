//! itinerary-planner core
//!
//! Builds multi-day trip itineraries from candidate places, or rebuilds the
//! same per-day model from a flat schedule returned by an external planner.

pub mod error;
pub mod model;
pub mod config;
pub mod traits;
pub mod store;
pub mod haversine;
pub mod polyline;
pub mod categorize;
pub mod quota;
pub mod assigner;
pub mod autocomplete;
pub mod schedule;
pub mod matcher;
pub mod grouping;
pub mod route;
pub mod day_order;
pub mod assembler;
pub mod planner;
pub mod pipeline;
