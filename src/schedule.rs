//! Wire types exchanged with the external planner.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::autocomplete::SelectedPlace;
use crate::model::{PlaceId, TripWindow};

/// `{id, name}` entry of the outbound payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayloadPlace {
    pub id: PlaceId,
    pub name: String,
}

/// Request body sent to the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulePayload {
    pub selected_places: Vec<PayloadPlace>,
    pub candidate_places: Vec<PayloadPlace>,
    #[serde(with = "iso_local")]
    pub start_datetime: NaiveDateTime,
    #[serde(with = "iso_local")]
    pub end_datetime: NaiveDateTime,
}

impl SchedulePayload {
    /// Split user picks from auto-completed candidates.
    pub fn from_selection(selection: &[SelectedPlace], window: &TripWindow) -> Self {
        let entry = |s: &SelectedPlace| PayloadPlace {
            id: s.place.id.clone(),
            name: s.place.name.clone(),
        };
        Self {
            selected_places: selection.iter().filter(|s| !s.is_candidate).map(entry).collect(),
            candidate_places: selection.iter().filter(|s| s.is_candidate).map(entry).collect(),
            start_datetime: window.start,
            end_datetime: window.end,
        }
    }

    /// All entries, selected first.
    pub fn entries(&self) -> impl Iterator<Item = &PayloadPlace> {
        self.selected_places.iter().chain(self.candidate_places.iter())
    }
}

/// One flat schedule slot from the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerScheduleItem {
    #[serde(default)]
    pub id: Option<PlaceId>,
    pub place_name: String,
    #[serde(default)]
    pub place_type: String,
    pub time_block: String,
}

/// Per-day route summary from the planner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub day: String,
    #[serde(default)]
    pub places_routed: Vec<String>,
    #[serde(default, deserialize_with = "graph_ids")]
    pub interleaved_route: Vec<String>,
    #[serde(default)]
    pub total_distance_m: f64,
}

/// Response body returned by the planner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub schedule: Vec<ServerScheduleItem>,
    #[serde(default)]
    pub route_summary: Vec<RouteSummary>,
}

/// Parsed `"<DayKey>_<HHMM>"` label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeBlock {
    pub day_key: String,
    pub time: Option<NaiveTime>,
}

impl TimeBlock {
    /// Split at the last underscore. A label without one is all day key.
    /// The time part accepts `HHMM`, `HMM` and `HH:MM`.
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        match label.rsplit_once('_') {
            Some((day_key, time)) => Self {
                day_key: day_key.trim().to_string(),
                time: parse_slot_time(time.trim()),
            },
            None => Self {
                day_key: label.to_string(),
                time: None,
            },
        }
    }
}

fn parse_slot_time(raw: &str) -> Option<NaiveTime> {
    if let Ok(time) = NaiveTime::parse_from_str(raw, "%H:%M") {
        return Some(time);
    }
    if !(3..=4).contains(&raw.len()) || !raw.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let value: u32 = raw.parse().ok()?;
    NaiveTime::from_hms_opt(value / 100, value % 100, 0)
}

/// Graph ids arrive as strings or numbers; keep them as opaque strings.
fn graph_ids<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawGraphId {
        Int(i64),
        Float(f64),
        Text(String),
    }

    let raw: Option<Vec<RawGraphId>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|id| match id {
            RawGraphId::Int(value) => value.to_string(),
            RawGraphId::Float(value) => value.to_string(),
            RawGraphId::Text(value) => value,
        })
        .collect())
}

mod iso_local {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
