//! Maps weekday-labelled planner days onto trip days `1..N`.
//!
//! Labels are first sorted by the weekday table. When the trip start date is
//! known, the order is then overridden chronologically: trip day `i` takes
//! the group whose label matches the weekday of `start + i`, and its date and
//! weekday are recomputed from that offset.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};

use crate::error::Diagnostic;
use crate::model::weekday_abbrev;
use crate::schedule::{ServerScheduleItem, TimeBlock};

/// Weekday labels in sort order.
#[derive(Debug, Clone)]
pub struct WeekdayTable {
    entries: Vec<(String, Weekday)>,
}

impl Default for WeekdayTable {
    fn default() -> Self {
        let week = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ];
        Self::new(week.into_iter().map(|day| (weekday_abbrev(day).to_string(), day)))
    }
}

impl WeekdayTable {
    /// Table in the given sort order.
    pub fn new(entries: impl IntoIterator<Item = (String, Weekday)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Weekday of a label: table labels first, then English names.
    pub fn weekday(&self, label: &str) -> Option<Weekday> {
        let label = label.trim();
        self.entries
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(label))
            .map(|(_, day)| *day)
            .or_else(|| Weekday::from_str(label).ok())
    }

    /// Sort rank of a label; unknown labels sort last.
    pub fn rank(&self, label: &str) -> usize {
        self.weekday(label)
            .and_then(|day| self.entries.iter().position(|(_, known)| *known == day))
            .unwrap_or(usize::MAX)
    }
}

/// Items sharing one day label, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup<T> {
    pub key: String,
    pub items: Vec<T>,
}

/// A group placed on a trip day.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedDay<T> {
    pub day: u32,
    pub key: String,
    pub day_of_week: String,
    pub date: Option<NaiveDate>,
    pub items: Vec<T>,
}

/// Group schedule items by the day key of their time block.
///
/// Each group comes back in time-block order. Items without a parseable time
/// keep their position; timed items are stably sorted around them.
pub fn group_by_day_key(schedule: &[ServerScheduleItem]) -> Vec<DayGroup<&ServerScheduleItem>> {
    let mut groups: Vec<DayGroup<&ServerScheduleItem>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in schedule {
        let key = TimeBlock::parse(&item.time_block).day_key;
        match index.get(&key) {
            Some(&position) => groups[position].items.push(item),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(DayGroup {
                    key,
                    items: vec![item],
                });
            }
        }
    }

    for group in &mut groups {
        sort_by_time_block(&mut group.items);
    }
    groups
}

fn sort_by_time_block(items: &mut [&ServerScheduleItem]) {
    let timed: Vec<(usize, NaiveTime)> = items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| TimeBlock::parse(&item.time_block).time.map(|time| (index, time)))
        .collect();

    let mut sorted: Vec<(usize, NaiveTime)> = timed.clone();
    sorted.sort_by_key(|&(_, time)| time);
    if sorted == timed {
        return;
    }

    let original: Vec<&ServerScheduleItem> = items.to_vec();
    for ((slot, _), (from, _)) in timed.iter().zip(&sorted) {
        items[*slot] = original[*from];
    }
}

/// Order day groups and number them `1..N`.
///
/// `trip_days` widens the chronological sequence when the trip is longer
/// than the number of groups; it only matters with a start date.
pub fn normalize_day_order<T>(
    mut groups: Vec<DayGroup<T>>,
    table: &WeekdayTable,
    start: Option<NaiveDate>,
    trip_days: Option<u32>,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<OrderedDay<T>> {
    for group in &groups {
        if table.weekday(&group.key).is_none() {
            tracing::warn!(key = %group.key, "day label not in weekday table");
            diagnostics.push(Diagnostic::UnknownDayKey {
                key: group.key.clone(),
            });
        }
    }
    groups.sort_by_key(|group| table.rank(&group.key));

    let Some(start) = start else {
        return groups
            .into_iter()
            .enumerate()
            .map(|(index, group)| OrderedDay {
                day: index as u32 + 1,
                day_of_week: group.key.clone(),
                key: group.key,
                date: None,
                items: group.items,
            })
            .collect();
    };

    let span = groups.len().max(trip_days.unwrap_or(0) as usize);
    let expected: Vec<Weekday> = (0..span)
        .map(|offset| (start + Duration::days(offset as i64)).weekday())
        .collect();
    report_collisions(&groups, &expected, table, diagnostics);

    let mut remaining: Vec<Option<DayGroup<T>>> = groups.into_iter().map(Some).collect();
    let mut ordered: Vec<DayGroup<T>> = Vec::with_capacity(remaining.len());
    for weekday in &expected {
        let slot = remaining.iter_mut().find(|slot| {
            matches!(**slot, Some(ref group) if table.weekday(&group.key) == Some(*weekday))
        });
        if let Some(group) = slot.and_then(Option::take) {
            ordered.push(group);
        }
    }
    ordered.extend(remaining.into_iter().flatten());

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, group)| {
            let date = start + Duration::days(index as i64);
            let actual = weekday_abbrev(date.weekday()).to_string();
            let day = index as u32 + 1;
            if table.weekday(&group.key) != Some(date.weekday()) {
                tracing::warn!(day, label = %group.key, actual = %actual, "day label disagrees with trip date");
                diagnostics.push(Diagnostic::DayLabelMismatch {
                    day,
                    label: group.key.clone(),
                    actual: actual.clone(),
                });
            }
            OrderedDay {
                day,
                key: group.key,
                day_of_week: actual,
                date: Some(date),
                items: group.items,
            }
        })
        .collect()
}

/// Flag labels that stand for more than one trip day.
fn report_collisions<T>(
    groups: &[DayGroup<T>],
    expected: &[Weekday],
    table: &WeekdayTable,
    diagnostics: &mut Vec<Diagnostic>,
) {
    for group in groups {
        let Some(weekday) = table.weekday(&group.key) else {
            continue;
        };
        let occurrences = expected.iter().filter(|day| **day == weekday).count();
        if occurrences > 1 {
            tracing::warn!(key = %group.key, occurrences, "day label is ambiguous across trip weeks");
            diagnostics.push(Diagnostic::DayKeyCollision {
                key: group.key.clone(),
                occurrences,
            });
        }
    }
}
