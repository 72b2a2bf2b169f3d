//! Merges runs of consecutive slots at the same place into one stay.

use chrono::NaiveTime;

use crate::config::SLOT_MINUTES;
use crate::matcher::MatchedItem;
use crate::model::ItineraryPlaceWithTime;

/// Same place for grouping: numeric ids when both sides resolved normally,
/// otherwise trimmed names.
fn same_place(a: &MatchedItem, b: &MatchedItem) -> bool {
    if !a.is_fallback() && !b.is_fallback() {
        if let (Some(left), Some(right)) = (a.place.id.as_int(), b.place.id.as_int()) {
            return left == right;
        }
    }
    a.place.name.trim() == b.place.name.trim()
}

/// Group a day's matched items, already in time-block order.
///
/// Each group becomes one stop of `SLOT_MINUTES * len` minutes starting at
/// the first slot's time. A group without a parseable time starts where the
/// previous group ended, or at `day_start` for the first group.
pub fn group_consecutive(
    items: &[MatchedItem],
    day: u32,
    day_start: NaiveTime,
) -> Vec<ItineraryPlaceWithTime> {
    let mut grouped: Vec<ItineraryPlaceWithTime> = Vec::new();
    let mut start = 0;

    while start < items.len() {
        let first = &items[start];
        let mut end = start + 1;
        while end < items.len() && same_place(first, &items[end]) {
            end += 1;
        }

        let slots = (end - start) as u32;
        let arrive = first.time.unwrap_or_else(|| {
            grouped
                .last()
                .map(|prev| prev.depart_time)
                .unwrap_or(day_start)
        });

        let entry = ItineraryPlaceWithTime::new(
            format!("{}_{}_{}", first.place.id, day, start),
            first.place.clone(),
            arrive,
            SLOT_MINUTES * slots,
            first.time_block.clone(),
        )
        .fallback(first.is_fallback());
        grouped.push(entry);

        start = end;
    }

    grouped
}
