use crate::slots::SLOT_MINUTES;
use serde::{Deserialize, Serialize};

/// A member's persisted weekly schedule: for each weekday, the list of
/// committed slot labels (e.g. `"Sunday 09:00"`). Only the slot counts
/// matter here; the labels themselves are opaque.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSchedule {
    #[serde(default)]
    pub sunday: Vec<String>,
    #[serde(default)]
    pub monday: Vec<String>,
    #[serde(default)]
    pub tuesday: Vec<String>,
    #[serde(default)]
    pub wednesday: Vec<String>,
    #[serde(default)]
    pub thursday: Vec<String>,
    #[serde(default)]
    pub friday: Vec<String>,
    #[serde(default)]
    pub saturday: Vec<String>,
}

impl SavedSchedule {
    /// Total free minutes over the week: each stored slot counts for one
    /// fixed-length slot's worth of minutes.
    pub fn total_minutes(&self) -> i64 {
        let slots = self.sunday.len()
            + self.monday.len()
            + self.tuesday.len()
            + self.wednesday.len()
            + self.thursday.len()
            + self.friday.len()
            + self.saturday.len();
        slots as i64 * SLOT_MINUTES
    }
}

/// A member's free-time budget for the week. Derived and ephemeral:
/// recomputed for every distribution call, and used only as a fairness
/// signal when ordering candidates — never as a capacity constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberWeight {
    pub member_id: i32,
    pub free_minutes: i64,
}

impl MemberWeight {
    pub fn new(member_id: i32, free_minutes: i64) -> Self {
        Self {
            member_id,
            free_minutes,
        }
    }

    /// Weight for a member from their stored schedule; a member with no
    /// stored schedule weighs 0.
    pub fn from_schedule(member_id: i32, schedule: Option<&SavedSchedule>) -> Self {
        let free_minutes = schedule.map_or(0, SavedSchedule::total_minutes);
        Self::new(member_id, free_minutes)
    }

    /// Weight from the raw persisted JSON blob. An unreadable blob counts
    /// the same as no schedule at all.
    pub fn from_json_blob(member_id: i32, raw: &str) -> Self {
        let schedule: Option<SavedSchedule> = serde_json::from_str(raw).ok();
        Self::from_schedule(member_id, schedule.as_ref())
    }
}
