//! Weekday sets for repeating blocks.
//!
//! Day numbers run 0..=6 with Sunday = 0. Every weekly-cost computation goes
//! through [`count_unique_days`]; `1 + repeat_days.len()` double-counts when
//! `repeat_days` repeats the primary day.

use chrono::Weekday;
use std::collections::BTreeSet;

use super::TimeBlock;

/// The deduplicated set of weekdays a block occupies.
pub fn unique_days(day_of_week: u8, repeat_days: Option<&[u8]>) -> BTreeSet<u8> {
    let mut days = BTreeSet::new();
    days.insert(day_of_week);
    if let Some(repeat_days) = repeat_days {
        days.extend(repeat_days.iter().copied());
    }
    days
}

/// Cardinality of `{day_of_week} ∪ repeat_days`.
///
/// Range checking is the validator's job; any value is accepted here.
pub fn count_unique_days(day_of_week: u8, repeat_days: Option<&[u8]>) -> usize {
    unique_days(day_of_week, repeat_days).len()
}

/// Whether `block` has an occurrence on `day`.
pub fn occurs_on(block: &TimeBlock, day: u8) -> bool {
    block.day_of_week == day
        || block
            .repeat_days
            .as_ref()
            .is_some_and(|repeat| repeat.contains(&day))
}

/// Minutes the block charges against its category each week.
pub fn weekly_cost_minutes(block: &TimeBlock) -> u64 {
    u64::from(block.duration_minutes) * block.unique_day_count() as u64
}

fn to_weekday(day: u8) -> Option<Weekday> {
    match day {
        0 => Some(Weekday::Sun),
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        _ => None,
    }
}

/// English weekday name, `None` when `day` is out of range.
pub fn weekday_name(day: u8) -> Option<&'static str> {
    let name = match to_weekday(day)? {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    };
    Some(name)
}

/// Parse a day given as a number (`0`..`6`) or a weekday name (`sun`, `Monday`).
pub fn parse_weekday(input: &str) -> Option<u8> {
    let trimmed = input.trim();
    if let Ok(n) = trimmed.parse::<u8>() {
        return (n <= 6).then_some(n);
    }
    trimmed
        .parse::<Weekday>()
        .ok()
        .map(|weekday| weekday.num_days_from_sunday() as u8)
}
