//! Interval grouping.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::types::{Event, Interval};

/// Reduce one sailor's events to the fewest intervals per ship.
///
/// **Algorithm**:
/// 1. Partition dates by ship
/// 2. Sort and de-duplicate each ship's dates
/// 3. Extend the running interval while the gap to the next date is at most
///    `merge_gap` days, otherwise start a new one
///
/// Output is ordered by start date, then ship name. Intervals for different
/// ships are never merged, even when they overlap.
pub fn group(events: &[Event], merge_gap: u32) -> Vec<Interval> {
    let mut by_ship: BTreeMap<&str, Vec<NaiveDate>> = BTreeMap::new();
    for event in events {
        by_ship.entry(event.ship.as_str()).or_default().push(event.date);
    }

    let mut intervals = Vec::new();
    for (ship, mut dates) in by_ship {
        dates.sort_unstable();
        dates.dedup();
        intervals.extend(merge_dates(ship, &dates, merge_gap));
    }

    intervals.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.ship.cmp(&b.ship)));
    intervals
}

/// Merge sorted, distinct dates of a single ship.
fn merge_dates(ship: &str, dates: &[NaiveDate], merge_gap: u32) -> Vec<Interval> {
    let Some((&first, rest)) = dates.split_first() else {
        return Vec::new();
    };

    let mut intervals = Vec::new();
    let (mut start, mut end) = (first, first);
    for &date in rest {
        if (date - end).num_days() <= i64::from(merge_gap) {
            end = date;
        } else {
            intervals.push(Interval::new(ship, start, end));
            start = date;
            end = date;
        }
    }
    intervals.push(Interval::new(ship, start, end));
    intervals
}
