use chrono::{Duration, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Fixed length of one bookable slot, in minutes.
pub const SLOT_MINUTES: i64 = 60;

/// Canonical weekday order used everywhere in the engine: Sunday first,
/// Saturday last. Allocation visits days in exactly this order.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Full English weekday name, matching the keys the surrounding system
/// stores ("Sunday" .. "Saturday").
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Parse a full weekday name, case-insensitively.
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    WEEKDAYS
        .into_iter()
        .find(|day| weekday_name(*day).eq_ignore_ascii_case(name.trim()))
}

/// Serde adapter so weekday fields round-trip as full names instead of
/// chrono's short forms. Use with `#[serde(with = "crate::slots::weekday_str")]`.
pub mod weekday_str {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(super::weekday_name(*day))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let name = String::deserialize(deserializer)?;
        super::weekday_from_name(&name)
            .ok_or_else(|| D::Error::custom(format!("unknown weekday name '{name}'")))
    }
}

/// One bookable 1-hour unit of declared free time.
///
/// Slots are produced only by [`parse_day`], never mutated, and consumed
/// exactly once by the allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    #[serde(with = "weekday_str")]
    pub day: Weekday,
    pub start: NaiveTime,
}

impl Slot {
    pub fn new(day: Weekday, start: NaiveTime) -> Self {
        Self { day, start }
    }

    pub fn end(&self) -> NaiveTime {
        self.start + Duration::minutes(SLOT_MINUTES)
    }
}

/// Parse one weekday's free-time description into bookable slots.
///
/// The input is zero or more comma-separated `"HH:MM-HH:MM"` ranges. A range
/// that fails to parse, ends at or before its start, or spans less than a
/// full hour is dropped silently; the remaining valid ranges still produce
/// slots. Each accepted range emits consecutive 1-hour slots while a whole
/// hour still fits; a partial trailing hour is not emitted.
///
/// The returned slots are sorted ascending by start time. Garbage input
/// yields an empty vec, never an error.
pub fn parse_day(day: Weekday, raw: &str) -> Vec<Slot> {
    let mut slots = Vec::new();
    for range in raw.split(',') {
        let range = range.trim();
        if range.is_empty() {
            continue;
        }
        let Some((start_s, end_s)) = range.split_once('-') else {
            continue;
        };
        let (Ok(start), Ok(end)) = (
            NaiveTime::parse_from_str(start_s.trim(), "%H:%M"),
            NaiveTime::parse_from_str(end_s.trim(), "%H:%M"),
        ) else {
            continue;
        };
        if end <= start || (end - start).num_minutes() < SLOT_MINUTES {
            continue;
        }

        // NaiveTime addition wraps at midnight, so count whole hours up front
        // instead of advancing a cursor past `end`.
        let whole_hours = (end - start).num_minutes() / SLOT_MINUTES;
        for hour in 0..whole_hours {
            slots.push(Slot::new(day, start + Duration::minutes(hour * SLOT_MINUTES)));
        }
    }
    slots.sort_by_key(|slot| slot.start);
    slots
}
