//! Haversine travel time estimation.
//!
//! Uses great-circle distance and an assumed speed. Ignores roads.

use crate::config::DEFAULT_SPEED_KMH;
use crate::model::{Coordinates, ItineraryPlaceWithTime, SegmentRoute, LAST_STOP_LABEL, PENDING_LABEL};

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two points in kilometers.
pub fn haversine_km(from: Coordinates, to: Coordinates) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lng - from.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_KM * c
}

/// Render minutes as a travel label, e.g. `"25 min"` or `"1 h 5 min"`.
pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, m) => format!("{} min", m),
        (h, 0) => format!("{} h", h),
        (h, m) => format!("{} h {} min", h, m),
    }
}

/// Distance totals for one scored day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayScore {
    pub total_distance_km: f64,
    pub segments: Vec<SegmentRoute>,
}

/// Linear-speed travel time estimator.
#[derive(Debug, Clone)]
pub struct TravelTimeEstimator {
    /// Assumed average speed in km/h.
    pub speed_kmh: f64,
}

impl Default for TravelTimeEstimator {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl TravelTimeEstimator {
    /// Estimator at `speed_kmh`, or the default speed when that is not a
    /// positive finite number.
    pub fn new(speed_kmh: f64) -> Self {
        if speed_kmh.is_finite() && speed_kmh > 0.0 {
            Self { speed_kmh }
        } else {
            Self::default()
        }
    }

    /// Whole minutes to cover `km`. Any nonzero distance takes at least a minute.
    pub fn minutes_for_km(&self, km: f64) -> u32 {
        if !(km.is_finite() && km > 0.0) {
            return 0;
        }
        let minutes = (km / self.speed_kmh * 60.0).round() as u32;
        minutes.max(1)
    }

    /// Estimated minutes between two points.
    pub fn travel_minutes(&self, from: Coordinates, to: Coordinates) -> u32 {
        self.minutes_for_km(haversine_km(from, to))
    }

    /// Fill travel labels for a day's stops and total the straight-line distance.
    ///
    /// Pairs where either stop lacks coordinates keep the pending label and
    /// add nothing. The last stop always gets [`LAST_STOP_LABEL`].
    pub fn score_day(&self, places: &mut [ItineraryPlaceWithTime]) -> DayScore {
        let mut score = DayScore::default();

        for i in 0..places.len().saturating_sub(1) {
            let from = places[i].place.coordinates();
            let to = places[i + 1].place.coordinates();

            let label = match (from, to) {
                (Some(from), Some(to)) => {
                    let km = haversine_km(from, to);
                    let minutes = self.minutes_for_km(km);
                    score.total_distance_km += km;
                    score.segments.push(SegmentRoute {
                        from: places[i].place.name.clone(),
                        to: places[i + 1].place.name.clone(),
                        distance_km: km,
                        travel_minutes: minutes,
                    });
                    format_minutes(minutes)
                }
                _ => PENDING_LABEL.to_string(),
            };
            places[i].travel_time_to_next_label = label;
        }

        if let Some(last) = places.last_mut() {
            last.travel_time_to_next_label = LAST_STOP_LABEL.to_string();
        }

        score
    }
}
