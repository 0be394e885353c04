use crate::task::SchedulableTask;
use crate::weights::MemberWeight;
use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// A priority-1 task with a deadline inside this window counts as urgent.
pub const URGENT_WINDOW_DAYS: i64 = 2;

/// How many assignees a task gets, by urgency tier. The defaults preserve
/// the long-standing policy: 3 for urgent tasks, 2 for priority-1 tasks
/// that are not yet urgent, 1 otherwise. Counts are always clamped to the
/// number of distinct eligible members.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssigneePolicy {
    pub urgent: usize,
    pub high_priority: usize,
    pub standard: usize,
}

impl Default for AssigneePolicy {
    fn default() -> Self {
        Self {
            urgent: 3,
            high_priority: 2,
            standard: 1,
        }
    }
}

impl AssigneePolicy {
    fn required_for(&self, task: &SchedulableTask, now: NaiveDateTime) -> usize {
        if is_urgent(task, now) {
            self.urgent
        } else if task.priority == 1 {
            self.high_priority
        } else {
            self.standard
        }
    }
}

/// A task is urgent when it carries priority 1 and its deadline falls
/// within [`URGENT_WINDOW_DAYS`] of `now`.
pub fn is_urgent(task: &SchedulableTask, now: NaiveDateTime) -> bool {
    task.priority == 1
        && task
            .due_date
            .is_some_and(|due| due <= now + Duration::days(URGENT_WINDOW_DAYS))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistributionError {
    /// The filtered member set was empty. Callers must pass the current,
    /// validated group membership; this is the one hard failure and is
    /// surfaced to the client as a 4xx-equivalent response.
    NoEligibleMembers,
}

impl fmt::Display for DistributionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistributionError::NoEligibleMembers => {
                write!(f, "no eligible members to distribute tasks to")
            }
        }
    }
}

impl std::error::Error for DistributionError {}

/// Task id mapped to the member ids newly assigned by one distribution call.
pub type DistributionResult = HashMap<i32, Vec<i32>>;

/// Distribute group tasks across members with the default policy and a
/// thread-local RNG. See [`distribute_with`].
pub fn distribute(
    tasks: &[SchedulableTask],
    members: &[MemberWeight],
    now: NaiveDateTime,
) -> Result<DistributionResult, DistributionError> {
    distribute_with(tasks, members, now, AssigneePolicy::default(), &mut rand::thread_rng())
}

/// Distribute with the default policy but a caller-supplied RNG, so tests
/// can seed a `SmallRng` and replay a run.
pub fn distribute_with_rng<R: Rng + ?Sized>(
    tasks: &[SchedulableTask],
    members: &[MemberWeight],
    now: NaiveDateTime,
    rng: &mut R,
) -> Result<DistributionResult, DistributionError> {
    distribute_with(tasks, members, now, AssigneePolicy::default(), rng)
}

/// Assign each pending group task to one or more members.
///
/// The free-time weights steer fairness two ways: members are replicated
/// into a shuffled candidate pool proportionally to their share of the
/// total weight (everyone appears at least once, so a zero-weight member is
/// never starved completely), and weight breaks ties between members
/// carrying the same number of assignments so far. Tasks are handled most
/// urgent first, and urgency raises the assignee count per `policy`.
///
/// Members already present in a task's `assignees` are skipped, never
/// re-added: the result holds only the ids newly assigned by this call.
/// Tasks whose status is done are ignored.
pub fn distribute_with<R: Rng + ?Sized>(
    tasks: &[SchedulableTask],
    members: &[MemberWeight],
    now: NaiveDateTime,
    policy: AssigneePolicy,
    rng: &mut R,
) -> Result<DistributionResult, DistributionError> {
    if members.is_empty() {
        return Err(DistributionError::NoEligibleMembers);
    }

    let total_weight = members.iter().map(|m| m.free_minutes).sum::<i64>().max(1);
    let weight_of: HashMap<i32, i64> = members
        .iter()
        .map(|m| (m.member_id, m.free_minutes))
        .collect();

    // Replicated pool: each member's share of 100 entries, at least one.
    let mut pool: Vec<i32> = Vec::new();
    for member in members {
        let share = (member.free_minutes as f64 / total_weight as f64 * 100.0).round() as i64;
        for _ in 0..share.max(1) {
            pool.push(member.member_id);
        }
    }
    pool.shuffle(rng);

    // Distinct members in pool first-occurrence order; the shuffle decides
    // how full ties break later.
    let mut seen = HashSet::new();
    let distinct: Vec<i32> = pool
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();

    let mut pending: Vec<&SchedulableTask> =
        tasks.iter().filter(|task| !task.status.is_done()).collect();
    pending.sort_by(|a, b| {
        let urgency = |t: &SchedulableTask| if is_urgent(t, now) { 0u8 } else { 1 };
        urgency(a)
            .cmp(&urgency(b))
            .then(a.priority.cmp(&b.priority))
            .then_with(|| match (a.due_date, b.due_date) {
                (Some(da), Some(db)) => da.cmp(&db),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
    });

    let mut assigned_count: HashMap<i32, usize> =
        distinct.iter().map(|id| (*id, 0)).collect();
    let mut result = DistributionResult::new();

    for task in pending {
        let required = policy.required_for(task, now).min(distinct.len());

        let mut candidates = distinct.clone();
        candidates.sort_by(|a, b| {
            assigned_count[a]
                .cmp(&assigned_count[b])
                .then(weight_of[b].cmp(&weight_of[a]))
        });

        let mut new_assignees = Vec::new();
        for member_id in candidates {
            if new_assignees.len() >= required {
                break;
            }
            if task.assignees.contains(&member_id) {
                continue;
            }
            new_assignees.push(member_id);
            *assigned_count.entry(member_id).or_insert(0) += 1;
        }

        result.insert(task.id, new_assignees);
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn noon(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn urgency_requires_priority_one_and_close_deadline() {
        let now = noon(10);
        let mut task = SchedulableTask::new(1, "t", 1, 1);
        assert!(!is_urgent(&task, now), "no deadline, not urgent");
        task.due_date = Some(noon(11));
        assert!(is_urgent(&task, now));
        task.due_date = Some(noon(20));
        assert!(!is_urgent(&task, now), "deadline too far out");
        task.priority = 2;
        task.due_date = Some(noon(11));
        assert!(!is_urgent(&task, now), "priority 2 is never urgent");
    }

    #[test]
    fn empty_member_set_is_a_hard_error() {
        let tasks = vec![SchedulableTask::new(1, "t", 2, 1)];
        let err = distribute_with_rng(&tasks, &[], noon(1), &mut SmallRng::seed_from_u64(0))
            .unwrap_err();
        assert_eq!(err, DistributionError::NoEligibleMembers);
    }

    #[test]
    fn members_already_assigned_are_not_re_added() {
        let mut task = SchedulableTask::new(1, "t", 1, 1);
        task.due_date = Some(noon(2));
        task.assignees = vec![10, 11];
        let members = vec![
            MemberWeight::new(10, 120),
            MemberWeight::new(11, 60),
            MemberWeight::new(12, 60),
        ];
        let result =
            distribute_with_rng(&[task], &members, noon(1), &mut SmallRng::seed_from_u64(1))
                .unwrap();
        // Urgent task wants 3 assignees; 10 and 11 are already on it.
        assert_eq!(result[&1], vec![12]);
    }
}
