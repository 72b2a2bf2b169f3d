//! Real Jeju Island places for realistic fixtures.

use itinerary_planner::model::{Category, Place};

/// A named spot with coordinates.
#[derive(Debug, Clone)]
pub struct Spot {
    pub id: i64,
    pub name: &'static str,
    pub category: Category,
    pub lat: f64,
    pub lng: f64,
}

impl Spot {
    pub const fn new(id: i64, name: &'static str, category: Category, lat: f64, lng: f64) -> Self {
        Self {
            id,
            name,
            category,
            lat,
            lng,
        }
    }

    pub fn place(&self) -> Place {
        Place::new(self.id, self.name, self.category).with_xy(self.lng, self.lat)
    }
}

// ============================================================================
// Hotels
// ============================================================================

pub const HOTELS: &[Spot] = &[
    Spot::new(100, "Maison Glad Jeju", Category::Accommodation, 33.4858, 126.4889),
    Spot::new(101, "Lotte Hotel Jeju", Category::Accommodation, 33.2479, 126.4102),
];

// ============================================================================
// Attractions
// ============================================================================

pub const ATTRACTIONS: &[Spot] = &[
    Spot::new(200, "Yongduam Rock", Category::Attraction, 33.5163, 126.5119),
    Spot::new(201, "Manjanggul Cave", Category::Attraction, 33.5284, 126.7714),
    Spot::new(202, "Seongsan Ilchulbong", Category::Attraction, 33.4581, 126.9425),
    Spot::new(203, "Hyeopjae Beach", Category::Attraction, 33.3940, 126.2397),
    Spot::new(204, "Cheonjiyeon Falls", Category::Attraction, 33.2447, 126.5594),
    Spot::new(205, "Seongpanak Trailhead", Category::Attraction, 33.3849, 126.6200),
];

// ============================================================================
// Restaurants
// ============================================================================

pub const RESTAURANTS: &[Spot] = &[
    Spot::new(300, "Dongmun Market", Category::Restaurant, 33.5118, 126.5284),
    Spot::new(301, "Seogwipo Olle Market", Category::Restaurant, 33.2497, 126.5636),
    Spot::new(302, "Jamae Guksu", Category::Restaurant, 33.5040, 126.5330),
    Spot::new(303, "Hallim Black Pork Street", Category::Restaurant, 33.4110, 126.2650),
];

// ============================================================================
// Cafes
// ============================================================================

pub const CAFES: &[Spot] = &[
    Spot::new(400, "Cafe Bomnal", Category::Cafe, 33.4628, 126.3096),
    Spot::new(401, "Woljeongri Beach Cafe", Category::Cafe, 33.5565, 126.7958),
    Spot::new(402, "Seongsan Ocean View Cafe", Category::Cafe, 33.4620, 126.9350),
];

/// Every fixture spot as a `Place`.
pub fn all_places() -> Vec<Place> {
    HOTELS
        .iter()
        .chain(ATTRACTIONS)
        .chain(RESTAURANTS)
        .chain(CAFES)
        .map(Spot::place)
        .collect()
}
