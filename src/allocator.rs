use crate::availability::WeeklyAvailability;
use crate::plan::{DailyAssignment, WeeklyPlan};
use crate::slots::WEEKDAYS;
use crate::task::SchedulableTask;
use serde::{Deserialize, Serialize};

/// Result of one allocation call: the weekly plan plus the titles of tasks
/// that could not be fully scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationOutcome {
    pub plan: WeeklyPlan,
    /// Titles of tasks whose required hours did not all fit. A listed task
    /// keeps whatever partial chunks it did receive.
    pub unassigned: Vec<String>,
}

impl AllocationOutcome {
    pub fn fully_scheduled(&self) -> bool {
        self.unassigned.is_empty()
    }
}

/// Greedily allocate tasks into the week's free slots.
///
/// `tasks` must already be in the canonical order (see
/// [`crate::task::sort_for_allocation`]): priority ascending, then due date
/// ascending with undated tasks last. The pass is a single greedy sweep
/// with no backtracking:
///
/// - each task consumes the earliest remaining slot of each day, Sunday
///   through Saturday, until its `required_hours` are met or the week runs
///   out;
/// - consumed slots are gone for good, so no two tasks ever share a slot;
/// - a task still short after Saturday lands in `unassigned` but keeps its
///   partial chunks;
/// - tasks with `required_hours <= 0` are skipped outright and are not
///   reported as unassigned.
///
/// Deterministic for a fixed task order and availability. The availability
/// pool is consumed destructively; build a fresh one per call.
pub fn allocate(tasks: &[SchedulableTask], availability: &mut WeeklyAvailability) -> AllocationOutcome {
    let mut plan = WeeklyPlan::new();
    let mut unassigned = Vec::new();

    for task in tasks {
        if task.required_hours <= 0 {
            continue;
        }
        let mut remaining = task.required_hours;

        'week: for day in WEEKDAYS {
            while remaining > 0 {
                let Some(slot) = availability.pop_earliest(day) else {
                    continue 'week;
                };
                plan.push(DailyAssignment::bind(task, slot));
                remaining -= 1;
            }
            break;
        }

        if remaining > 0 {
            unassigned.push(task.title.clone());
        }
    }

    AllocationOutcome { plan, unassigned }
}
