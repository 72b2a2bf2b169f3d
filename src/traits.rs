//! Collaborator traits.
//!
//! The pipeline reaches the place database, the route graph and the remote
//! planner only through these narrow interfaces. Apps implement them for
//! their own storage and transport.

use crate::error::PlannerError;
use crate::model::{Category, Coordinates, PlaceId, Place};
use crate::polyline::Polyline;
use crate::schedule::{SchedulePayload, ScheduleResponse};

/// Read-only access to the known-place store.
pub trait PlaceLookup {
    fn find_place_by_id(&self, id: &PlaceId) -> Option<Place>;

    fn find_place_by_name(&self, name: &str) -> Option<Place>;
}

impl<T: PlaceLookup + ?Sized> PlaceLookup for &T {
    fn find_place_by_id(&self, id: &PlaceId) -> Option<Place> {
        (**self).find_place_by_id(id)
    }

    fn find_place_by_name(&self, name: &str) -> Option<Place> {
        (**self).find_place_by_name(name)
    }
}

/// Resolves route graph ids for rendering.
pub trait GraphLookup {
    fn resolve_node(&self, id: &str) -> Option<Coordinates>;

    fn resolve_link(&self, id: &str) -> Option<Polyline>;
}

/// External schedule planner.
pub trait SchedulePlanner {
    fn request_schedule(&self, payload: &SchedulePayload) -> Result<ScheduleResponse, PlannerError>;
}

/// Minimum number of places a trip should carry per category.
pub trait MinimumRequirement {
    fn minimum_for(&self, trip_days: u32, category: Category) -> usize;
}

impl<F> MinimumRequirement for F
where
    F: Fn(u32, Category) -> usize,
{
    fn minimum_for(&self, trip_days: u32, category: Category) -> usize {
        self(trip_days, category)
    }
}
