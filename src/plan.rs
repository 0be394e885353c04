use crate::slots::{Slot, WEEKDAYS, weekday_str};
use crate::task::SchedulableTask;
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// One scheduled 1-hour chunk: a task bound to a specific slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAssignment {
    pub task_id: i32,
    pub title: String,
    pub priority: u8,
    #[serde(with = "weekday_str")]
    pub day: Weekday,
    pub start: NaiveTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
}

impl DailyAssignment {
    pub(crate) fn bind(task: &SchedulableTask, slot: Slot) -> Self {
        Self {
            task_id: task.id,
            title: task.title.clone(),
            priority: task.priority,
            day: slot.day,
            start: slot.start,
            group_name: task.group_name.clone(),
        }
    }
}

/// All assignments landing on one weekday, in the order they were made
/// (task-iteration order, then slot time).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPlan {
    #[serde(with = "weekday_str")]
    pub day: Weekday,
    #[serde(default)]
    pub assignments: Vec<DailyAssignment>,
}

/// The weekly plan produced by one allocation call: seven [`DayPlan`]s in
/// canonical order, Sunday through Saturday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub days: Vec<DayPlan>,
}

impl Default for WeeklyPlan {
    fn default() -> Self {
        Self::new()
    }
}

impl WeeklyPlan {
    pub fn new() -> Self {
        let days = WEEKDAYS
            .into_iter()
            .map(|day| DayPlan {
                day,
                assignments: Vec::new(),
            })
            .collect();
        Self { days }
    }

    pub(crate) fn push(&mut self, assignment: DailyAssignment) {
        // `days` always holds the seven canonical weekdays.
        if let Some(day_plan) = self.days.iter_mut().find(|d| d.day == assignment.day) {
            day_plan.assignments.push(assignment);
        }
    }

    pub fn day(&self, day: Weekday) -> &[DailyAssignment] {
        self.days
            .iter()
            .find(|d| d.day == day)
            .map(|d| d.assignments.as_slice())
            .unwrap_or(&[])
    }

    pub fn total_assignments(&self) -> usize {
        self.days.iter().map(|d| d.assignments.len()).sum()
    }

    /// Total chunks scheduled for one task across the week.
    pub fn hours_for_task(&self, task_id: i32) -> usize {
        self.days
            .iter()
            .flat_map(|d| d.assignments.iter())
            .filter(|a| a.task_id == task_id)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.total_assignments() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = &DailyAssignment> {
        self.days.iter().flat_map(|d| d.assignments.iter())
    }
}
