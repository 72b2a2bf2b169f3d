//! Build options and the injected category translation table.

use std::collections::HashMap;

use chrono::NaiveTime;

use crate::model::Category;

/// Average travel speed assumption for time estimation.
pub const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Length of one planner schedule slot.
pub const SLOT_MINUTES: u32 = 60;

/// Assumed stay per category, in minutes.
#[derive(Debug, Clone)]
pub struct StayDurations {
    pub accommodation: u32,
    pub attraction: u32,
    pub restaurant: u32,
    pub cafe: u32,
    pub transport: u32,
    pub other: u32,
}

impl Default for StayDurations {
    fn default() -> Self {
        Self {
            accommodation: 30,
            attraction: 60,
            restaurant: 90,
            cafe: 60,
            transport: 30,
            other: 45,
        }
    }
}

impl StayDurations {
    pub fn for_category(&self, category: Category) -> u32 {
        match category {
            Category::Accommodation => self.accommodation,
            Category::Attraction => self.attraction,
            Category::Restaurant => self.restaurant,
            Category::Cafe => self.cafe,
            Category::Transport => self.transport,
            Category::Other => self.other,
        }
    }
}

/// Label to category translation, passed to whatever needs it.
///
/// Keys are matched case-insensitively; values are canonical category names.
#[derive(Debug, Clone)]
pub struct CategoryAliases {
    aliases: HashMap<String, String>,
}

impl Default for CategoryAliases {
    fn default() -> Self {
        Self::new([
            ("관광지", "attraction"),
            ("명소", "attraction"),
            ("음식점", "restaurant"),
            ("식당", "restaurant"),
            ("맛집", "restaurant"),
            ("카페", "cafe"),
            ("café", "cafe"),
            ("숙소", "accommodation"),
            ("숙박", "accommodation"),
            ("hotel", "accommodation"),
            ("lodging", "accommodation"),
            ("공항", "transport"),
        ])
    }
}

impl CategoryAliases {
    pub fn new<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let aliases = entries
            .into_iter()
            .map(|(label, canonical)| (label.into().to_lowercase(), canonical.into()))
            .collect();
        Self { aliases }
    }

    pub fn empty() -> Self {
        Self {
            aliases: HashMap::new(),
        }
    }

    pub fn insert(&mut self, label: impl Into<String>, canonical: impl Into<String>) {
        self.aliases.insert(label.into().to_lowercase(), canonical.into());
    }

    /// Resolve a raw label, falling back to the canonical names themselves.
    pub fn resolve(&self, label: &str) -> Category {
        let key = label.trim().to_lowercase();
        match self.aliases.get(&key) {
            Some(canonical) => Category::parse(canonical),
            None => Category::parse(&key),
        }
    }
}

/// Options shared by both itinerary paths.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Assumed average travel speed in km/h.
    pub speed_kmh: f64,
    /// Start of every day after the first; day one starts at the trip start.
    pub day_start: NaiveTime,
    pub stay: StayDurations,
    pub aliases: CategoryAliases,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
            day_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            stay: StayDurations::default(),
            aliases: CategoryAliases::default(),
        }
    }
}
