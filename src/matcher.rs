//! Resolves planner schedule items to known places.
//!
//! Resolution order: own id, exact name, id hints from the payload and the
//! prior selection, then a fallback place built from the item itself.
//! Airports at either end of a day always resolve to a fixed record.

use chrono::NaiveTime;

use crate::config::CategoryAliases;
use crate::error::Diagnostic;
use crate::model::{Category, Place, PlaceId};
use crate::schedule::{PayloadPlace, SchedulePayload, ServerScheduleItem, TimeBlock};
use crate::traits::PlaceLookup;

/// Airport detection and the record airports resolve to.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Case-insensitive substrings that mark a place name as an airport.
    pub airport_keywords: Vec<String>,
    pub airport: Place,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            airport_keywords: vec!["공항".to_string(), "airport".to_string()],
            airport: Place::new("airport", "제주국제공항", Category::Transport)
                .with_xy(126.4914, 33.5104)
                .with_address("제주특별자치도 제주시 공항로 2"),
        }
    }
}

impl MatcherConfig {
    pub fn is_airport_name(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.airport_keywords
            .iter()
            .any(|keyword| !keyword.is_empty() && name.contains(&keyword.to_lowercase()))
    }
}

/// How a schedule item was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    ById,
    ByName,
    ByHint,
    Airport,
    Fallback,
}

/// Schedule item after resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedItem {
    pub place: Place,
    pub time_block: String,
    pub time: Option<NaiveTime>,
    pub resolution: Resolution,
}

impl MatchedItem {
    pub fn is_fallback(&self) -> bool {
        self.resolution == Resolution::Fallback
    }
}

/// Earlier id/name pairs that may recover an item the store can't find directly.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdHints<'a> {
    pub payload: Option<&'a SchedulePayload>,
    pub prior_selection: &'a [PayloadPlace],
}

impl<'a> IdHints<'a> {
    fn find(&self, item: &ServerScheduleItem) -> Option<&'a PayloadPlace> {
        let name = item.place_name.trim();
        let matches = |entry: &&PayloadPlace| {
            let same_id = item
                .id
                .as_ref()
                .is_some_and(|id| !id.is_empty() && *id == entry.id);
            same_id || (!name.is_empty() && entry.name.trim() == name)
        };

        self.payload
            .into_iter()
            .flat_map(|payload| payload.entries())
            .chain(self.prior_selection.iter())
            .find(matches)
    }
}

/// Resolves schedule items against a place store.
pub struct ScheduleItemMatcher<'a, L: PlaceLookup> {
    lookup: &'a L,
    config: &'a MatcherConfig,
    aliases: &'a CategoryAliases,
    hints: IdHints<'a>,
}

impl<'a, L: PlaceLookup> ScheduleItemMatcher<'a, L> {
    pub fn new(
        lookup: &'a L,
        config: &'a MatcherConfig,
        aliases: &'a CategoryAliases,
        hints: IdHints<'a>,
    ) -> Self {
        Self {
            lookup,
            config,
            aliases,
            hints,
        }
    }

    /// Resolve one item without positional rules.
    pub fn resolve(&self, item: &ServerScheduleItem) -> (Place, Resolution) {
        if let Some(place) = self.by_own_id(item) {
            return (place, Resolution::ById);
        }

        let name = item.place_name.trim();
        if !name.is_empty() {
            if let Some(place) = self.lookup.find_place_by_name(name) {
                return (place, Resolution::ByName);
            }
        }

        if let Some(hint) = self.hints.find(item) {
            if let Some(place) = self.lookup.find_place_by_id(&hint.id) {
                return (place, Resolution::ByHint);
            }
        }

        (self.fallback_place(item), Resolution::Fallback)
    }

    /// Resolve a day's items in time-block order. Fallbacks keep their slot.
    pub fn match_day(
        &self,
        items: &[&ServerScheduleItem],
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Vec<MatchedItem> {
        let last = items.len().saturating_sub(1);

        items
            .iter()
            .enumerate()
            .map(|(position, item)| {
                let (place, resolution) = self.resolve(item);
                let at_edge = position == 0 || position == last;
                let airport = at_edge
                    && (self.config.is_airport_name(&item.place_name)
                        || self.config.is_airport_name(&place.name));

                let (place, resolution) = if airport {
                    (self.config.airport.clone(), Resolution::Airport)
                } else {
                    if resolution == Resolution::Fallback {
                        tracing::warn!(
                            name = %item.place_name,
                            time_block = %item.time_block,
                            place_type = %item.place_type,
                            "schedule item matched no known place, using fallback"
                        );
                        diagnostics.push(Diagnostic::UnresolvedPlace {
                            name: item.place_name.clone(),
                            time_block: item.time_block.clone(),
                        });
                    }
                    (place, resolution)
                };

                MatchedItem {
                    place,
                    time_block: item.time_block.clone(),
                    time: TimeBlock::parse(&item.time_block).time,
                    resolution,
                }
            })
            .collect()
    }

    fn by_own_id(&self, item: &ServerScheduleItem) -> Option<Place> {
        let id = item.id.as_ref().filter(|id| !id.is_empty())?;
        self.lookup.find_place_by_id(id)
    }

    fn fallback_place(&self, item: &ServerScheduleItem) -> Place {
        let name = item.place_name.trim();
        let id = match &item.id {
            Some(id) if !id.is_empty() => id.clone(),
            _ => PlaceId::new(format!("fallback-{}", name)),
        };
        Place::new(id, name, self.aliases.resolve(&item.place_type)).with_rating(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PlaceStore;

    fn item(id: Option<i64>, name: &str, place_type: &str, block: &str) -> ServerScheduleItem {
        ServerScheduleItem {
            id: id.map(PlaceId::from_int),
            place_name: name.to_string(),
            place_type: place_type.to_string(),
            time_block: block.to_string(),
        }
    }

    fn store() -> PlaceStore {
        vec![
            Place::new(1, "Seongsan Ilchulbong", Category::Attraction).with_xy(126.9425, 33.4581),
            Place::new(2, "Dongmun Market", Category::Restaurant).with_xy(126.5284, 33.5118),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_resolves_by_id_then_name() {
        let store = store();
        let config = MatcherConfig::default();
        let aliases = CategoryAliases::default();
        let matcher = ScheduleItemMatcher::new(&store, &config, &aliases, IdHints::default());

        let (place, how) = matcher.resolve(&item(Some(2), "wrong name", "restaurant", "Mon_1200"));
        assert_eq!(place.name, "Dongmun Market");
        assert_eq!(how, Resolution::ById);

        let (place, how) = matcher.resolve(&item(Some(99), "Seongsan Ilchulbong", "attraction", "Mon_0900"));
        assert_eq!(place.id, PlaceId::from_int(1));
        assert_eq!(how, Resolution::ByName);
    }

    #[test]
    fn test_resolves_through_hints() {
        let store = store();
        let config = MatcherConfig::default();
        let aliases = CategoryAliases::default();
        let prior = vec![PayloadPlace {
            id: PlaceId::from_int(1),
            name: "성산일출봉".to_string(),
        }];
        let hints = IdHints {
            payload: None,
            prior_selection: &prior,
        };
        let matcher = ScheduleItemMatcher::new(&store, &config, &aliases, hints);

        let (place, how) = matcher.resolve(&item(None, "성산일출봉", "attraction", "Mon_0900"));
        assert_eq!(place.name, "Seongsan Ilchulbong");
        assert_eq!(how, Resolution::ByHint);
    }

    #[test]
    fn test_fallback_keeps_slot_and_reports() {
        let store = store();
        let config = MatcherConfig::default();
        let aliases = CategoryAliases::default();
        let matcher = ScheduleItemMatcher::new(&store, &config, &aliases, IdHints::default());
        let items = [
            item(Some(1), "Seongsan Ilchulbong", "attraction", "Mon_0900"),
            item(None, "Hidden Noodle Bar", "음식점", "Mon_1000"),
            item(Some(2), "Dongmun Market", "restaurant", "Mon_1100"),
        ];
        let refs: Vec<&ServerScheduleItem> = items.iter().collect();
        let mut diagnostics = Vec::new();

        let matched = matcher.match_day(&refs, &mut diagnostics);

        assert_eq!(matched.len(), 3);
        assert!(matched[1].is_fallback());
        assert_eq!(matched[1].place.category, Category::Restaurant);
        assert_eq!(matched[1].place.rating, Some(0.0));
        assert!(matched[1].place.coordinates().is_none());
        assert_eq!(matched[1].time, NaiveTime::from_hms_opt(10, 0, 0));
        assert_eq!(diagnostics.len(), 1);
    }

    #[test]
    fn test_airport_only_at_day_edges() {
        let store = PlaceStore::new();
        let config = MatcherConfig::default();
        let aliases = CategoryAliases::default();
        let matcher = ScheduleItemMatcher::new(&store, &config, &aliases, IdHints::default());
        let items = [
            item(None, "제주국제공항", "etc", "Mon_0900"),
            item(None, "Gimpo Airport shuttle", "etc", "Mon_1000"),
            item(None, "Jeju International Airport", "etc", "Mon_1100"),
        ];
        let refs: Vec<&ServerScheduleItem> = items.iter().collect();
        let mut diagnostics = Vec::new();

        let matched = matcher.match_day(&refs, &mut diagnostics);

        assert_eq!(matched[0].resolution, Resolution::Airport);
        assert_eq!(matched[0].place.category, Category::Transport);
        assert_eq!(matched[1].resolution, Resolution::Fallback);
        assert_eq!(matched[2].resolution, Resolution::Airport);
        assert_eq!(diagnostics.len(), 1);
    }
}
