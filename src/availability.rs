use crate::slots::{Slot, WEEKDAYS, parse_day, weekday_name};
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// The seven raw per-day free-time strings a user has stored, e.g.
/// `"09:00-12:00, 14:00-16:00"`. An empty or absent field means no free
/// time that day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityConfig {
    #[serde(default)]
    pub sunday: String,
    #[serde(default)]
    pub monday: String,
    #[serde(default)]
    pub tuesday: String,
    #[serde(default)]
    pub wednesday: String,
    #[serde(default)]
    pub thursday: String,
    #[serde(default)]
    pub friday: String,
    #[serde(default)]
    pub saturday: String,
}

impl AvailabilityConfig {
    pub fn raw_for(&self, day: Weekday) -> &str {
        match day {
            Weekday::Sun => &self.sunday,
            Weekday::Mon => &self.monday,
            Weekday::Tue => &self.tuesday,
            Weekday::Wed => &self.wednesday,
            Weekday::Thu => &self.thursday,
            Weekday::Fri => &self.friday,
            Weekday::Sat => &self.saturday,
        }
    }

    pub fn set_raw(&mut self, day: Weekday, raw: impl Into<String>) {
        let field = match day {
            Weekday::Sun => &mut self.sunday,
            Weekday::Mon => &mut self.monday,
            Weekday::Tue => &mut self.tuesday,
            Weekday::Wed => &mut self.wednesday,
            Weekday::Thu => &mut self.thursday,
            Weekday::Fri => &mut self.friday,
            Weekday::Sat => &mut self.saturday,
        };
        *field = raw.into();
    }
}

/// One week's pool of bookable slots, keyed by weekday.
///
/// Built fresh from an [`AvailabilityConfig`] at the start of an allocation
/// call, consumed destructively by the allocator, and discarded once the
/// call returns. Within a day the slots stay ordered ascending by start
/// time; no cross-day ordering is implied.
#[derive(Debug, Clone)]
pub struct WeeklyAvailability {
    days: HashMap<Weekday, VecDeque<Slot>>,
}

impl WeeklyAvailability {
    pub fn from_config(config: &AvailabilityConfig) -> Self {
        let mut days = HashMap::with_capacity(WEEKDAYS.len());
        for day in WEEKDAYS {
            let slots = parse_day(day, config.raw_for(day));
            days.insert(day, VecDeque::from(slots));
        }
        Self { days }
    }

    pub fn empty() -> Self {
        Self::from_config(&AvailabilityConfig::default())
    }

    /// Remove and return the earliest remaining slot for `day`.
    pub fn pop_earliest(&mut self, day: Weekday) -> Option<Slot> {
        self.days.get_mut(&day).and_then(VecDeque::pop_front)
    }

    pub fn remaining(&self, day: Weekday) -> usize {
        self.days.get(&day).map_or(0, VecDeque::len)
    }

    pub fn total_slots(&self) -> usize {
        WEEKDAYS.iter().map(|day| self.remaining(*day)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_slots() == 0
    }

    /// Summary line used by the CLI, e.g. `Sunday: 2, Monday: 0, ...`.
    pub fn describe(&self) -> String {
        WEEKDAYS
            .iter()
            .map(|day| format!("{}: {}", weekday_name(*day), self.remaining(*day)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
