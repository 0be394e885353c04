use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Lower bound the caller applies to predicted task minutes.
pub const MIN_PREDICTED_MINUTES: f64 = 10.0;
/// Upper bound the caller applies to predicted task minutes.
pub const MAX_PREDICTED_MINUTES: f64 = 480.0;

/// Lifecycle status of a task, matching the string values the surrounding
/// system stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Done")]
    Done,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::InProgress
    }
}

impl TaskStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }
}

/// A personal or group task as the engine sees it: a read-only view the
/// caller builds from its persisted records. The engine never mutates task
/// records; it returns scheduling decisions for the caller to persist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulableTask {
    pub id: i32,
    pub title: String,
    /// 1 = most urgent .. 4 = least urgent.
    pub priority: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDateTime>,
    /// Whole hours of work, rounded from the external predictor's estimate.
    #[serde(default)]
    pub required_hours: i64,
    /// Group label for display; `None` for personal tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    /// Members already assigned to this task. The distributor never adds a
    /// member twice; it only appends ids not present here.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assignees: Vec<i32>,
}

impl SchedulableTask {
    pub fn new(id: i32, title: impl Into<String>, priority: u8, required_hours: i64) -> Self {
        Self {
            id,
            title: title.into(),
            priority,
            due_date: None,
            required_hours,
            group_name: None,
            status: TaskStatus::default(),
            assignees: Vec::new(),
        }
    }
}

/// Compare two tasks in the canonical allocation order: priority ascending
/// (1 before 4), then due date ascending with missing due dates last.
pub fn allocation_order(a: &SchedulableTask, b: &SchedulableTask) -> Ordering {
    a.priority.cmp(&b.priority).then_with(|| match (a.due_date, b.due_date) {
        (Some(da), Some(db)) => da.cmp(&db),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    })
}

/// Sort tasks into the canonical allocation order the allocator expects.
pub fn sort_for_allocation(tasks: &mut [SchedulableTask]) {
    tasks.sort_by(allocation_order);
}

/// Convert an externally predicted duration in minutes into the whole-hour
/// requirement the allocator consumes: clamp to
/// [`MIN_PREDICTED_MINUTES`, `MAX_PREDICTED_MINUTES`], then round to whole
/// hours. A result of 0 hours means the task is skipped by allocation.
pub fn required_hours_from_minutes(minutes: f64) -> i64 {
    if !minutes.is_finite() {
        return 0;
    }
    let clamped = minutes.clamp(MIN_PREDICTED_MINUTES, MAX_PREDICTED_MINUTES);
    (clamped / 60.0).round() as i64
}
