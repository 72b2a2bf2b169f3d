//! Canonical place and itinerary model.

use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{BuildError, Diagnostic};

/// Travel label of the last place in a day.
pub const LAST_STOP_LABEL: &str = "-";

/// Travel label before travel time has been computed.
pub const PENDING_LABEL: &str = "N/A";

// ============================================================================
// Identifiers
// ============================================================================

/// Canonical place identifier.
///
/// External systems emit ids as JSON numbers or strings. Integral values are
/// stored in their canonical decimal form, so `12`, `"12"` and `12.0` compare
/// equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaceId(String);

impl PlaceId {
    /// Trimmed id, canonicalized when it reads as an integer.
    pub fn new(raw: impl AsRef<str>) -> Self {
        let trimmed = raw.as_ref().trim();
        match parse_id(trimmed) {
            Some(value) => Self(format_id(value)),
            None => Self(trimmed.to_string()),
        }
    }

    /// Id of an integral value.
    pub fn from_int(value: i64) -> Self {
        Self(format_id(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Integer form, when the id is integral.
    pub fn as_int(&self) -> Option<i64> {
        parse_id(&self.0)
    }

    /// True for the blank id some sources send for unknown places.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parse an id string as an integer, accepting integral decimals such as
/// `"7.0"`. Exponent and fractional forms stay opaque.
pub fn parse_id(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }

    let (whole, fraction) = trimmed.split_once('.')?;
    let digits = whole.strip_prefix('-').unwrap_or(whole);
    let plain_whole = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit());
    let zero_fraction = !fraction.is_empty() && fraction.bytes().all(|b| b == b'0');
    if !(plain_whole && zero_fraction) {
        return None;
    }
    whole.parse().ok()
}

/// Canonical text form of an integral id.
pub fn format_id(value: i64) -> String {
    value.to_string()
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlaceId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for PlaceId {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<i64> for PlaceId {
    fn from(value: i64) -> Self {
        Self::from_int(value)
    }
}

impl Serialize for PlaceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_int() {
            Some(value) => serializer.serialize_i64(value),
            None => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for PlaceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Float(f64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(value) => PlaceId::from_int(value),
            RawId::Float(value) => PlaceId::new(value.to_string()),
            RawId::Text(value) => PlaceId::new(value),
        })
    }
}

// ============================================================================
// Places
// ============================================================================

/// Place category. Labels outside the known set map to [`Category::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Accommodation,
    Attraction,
    Restaurant,
    Cafe,
    Transport,
    Other,
}

impl Category {
    /// Categories the itinerary builders place into days.
    pub const PLANNED: [Category; 4] = [
        Category::Accommodation,
        Category::Attraction,
        Category::Restaurant,
        Category::Cafe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Accommodation => "accommodation",
            Category::Attraction => "attraction",
            Category::Restaurant => "restaurant",
            Category::Cafe => "cafe",
            Category::Transport => "transport",
            Category::Other => "other",
        }
    }

    /// Category of a label, case-insensitive. Unknown labels are [`Category::Other`].
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "accommodation" => Category::Accommodation,
            "attraction" => Category::Attraction,
            "restaurant" => Category::Restaurant,
            "cafe" => Category::Cafe,
            "transport" => Category::Transport,
            _ => Category::Other,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        Ok(Category::parse(&label))
    }
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A known place. `x` is longitude, `y` is latitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub x: Option<f64>,
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl Place {
    /// Place without coordinates, address or rating.
    pub fn new(id: impl Into<PlaceId>, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            x: None,
            y: None,
            address: None,
            rating: None,
        }
    }

    /// Set longitude `x` and latitude `y`.
    pub fn with_xy(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Position, if both coordinates are finite.
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some(Coordinates::new(y, x)),
            _ => None,
        }
    }
}

// ============================================================================
// Trip window
// ============================================================================

/// Validated trip start/end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TripWindow {
    /// Validate a window. The end may not precede the start.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, BuildError> {
        if end < start {
            return Err(BuildError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Calendar days touched by the trip, at least one.
    pub fn num_days(&self) -> u32 {
        let days = (self.end.date() - self.start.date()).num_days() + 1;
        days.max(1) as u32
    }

    /// Calendar date of the zero-based trip day `index`.
    pub fn date_for(&self, index: u32) -> NaiveDate {
        self.start.date() + Duration::days(i64::from(index))
    }
}

/// Three-letter English weekday label, as used in planner time blocks.
pub fn weekday_abbrev(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// `MM/DD` label of a date.
pub fn date_label(date: NaiveDate) -> String {
    format!("{:02}/{:02}", date.month(), date.day())
}

/// `HH:MM` label of a time.
pub fn time_label(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

// ============================================================================
// Itinerary output
// ============================================================================

/// One stop in a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryPlaceWithTime {
    /// `<baseId>_<day>_<index>`, unique across the itinerary.
    pub entry_id: String,
    #[serde(flatten)]
    pub place: Place,
    #[serde(with = "hhmm")]
    pub arrive_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub depart_time: NaiveTime,
    pub stay_duration_minutes: u32,
    pub travel_time_to_next_label: String,
    pub time_block: String,
    pub is_fallback: bool,
}

impl ItineraryPlaceWithTime {
    /// Stop arriving at `arrive_time` and staying `stay_duration_minutes`.
    /// The travel label starts as [`PENDING_LABEL`].
    pub fn new(
        entry_id: String,
        place: Place,
        arrive_time: NaiveTime,
        stay_duration_minutes: u32,
        time_block: String,
    ) -> Self {
        Self {
            entry_id,
            place,
            arrive_time,
            depart_time: arrive_time + Duration::minutes(i64::from(stay_duration_minutes)),
            stay_duration_minutes,
            travel_time_to_next_label: PENDING_LABEL.to_string(),
            time_block,
            is_fallback: false,
        }
    }

    /// Mark the stop as built from an unresolved schedule item.
    pub fn fallback(mut self, is_fallback: bool) -> Self {
        self.is_fallback = is_fallback;
        self
    }
}

/// Travel estimate between two consecutive stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentRoute {
    pub from: String,
    pub to: String,
    pub distance_km: f64,
    pub travel_minutes: u32,
}

/// Route graph ids for one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteData {
    pub node_ids: Vec<String>,
    pub link_ids: Vec<String>,
    pub segment_routes: Vec<SegmentRoute>,
    pub places_routed: Vec<String>,
    /// Planner graph distance; zero on the heuristic path.
    pub total_distance_km: f64,
}

/// One trip day. Each day owns its places outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItineraryDay {
    pub day: u32,
    pub day_of_week: String,
    /// `MM/DD`, when the trip start date is known.
    pub date: Option<String>,
    pub places: Vec<ItineraryPlaceWithTime>,
    /// Sum of straight-line distances between consecutive stops.
    pub total_distance_km: f64,
    pub route_data: RouteData,
    pub interleaved_route: Vec<String>,
}

impl ItineraryDay {
    /// Day with no stops and no route.
    pub fn empty(day: u32, day_of_week: impl Into<String>, date: Option<String>) -> Self {
        Self {
            day,
            day_of_week: day_of_week.into(),
            date,
            places: Vec::new(),
            total_distance_km: 0.0,
            route_data: RouteData::default(),
            interleaved_route: Vec::new(),
        }
    }
}

/// Result of a build: the days plus everything worth telling the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Itinerary {
    pub days: Vec<ItineraryDay>,
    pub diagnostics: Vec<Diagnostic>,
    /// Places the heuristic builder could not fit into any day.
    pub unplaced: Vec<PlaceId>,
}

impl Itinerary {
    /// Day by its 1-based number.
    pub fn day(&self, day: u32) -> Option<&ItineraryDay> {
        self.days.iter().find(|d| d.day == day)
    }

    /// Straight-line distance over all days.
    pub fn total_distance_km(&self) -> f64 {
        self.days.iter().map(|d| d.total_distance_km).sum()
    }

    /// Stops across all days.
    pub fn place_count(&self) -> usize {
        self.days.iter().map(|d| d.places.len()).sum()
    }
}

mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M").map_err(serde::de::Error::custom)
    }
}
