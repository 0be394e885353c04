use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::{HashMap, HashSet};
use weekplan::{
    AssigneePolicy, DistributionError, MemberWeight, SchedulableTask, TaskStatus, distribute_with,
    distribute_with_rng,
};

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 10)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn urgent_task(id: i32) -> SchedulableTask {
    let mut task = SchedulableTask::new(id, format!("task-{id}"), 1, 1);
    task.due_date = Some(now() + Duration::days(1));
    task
}

fn equal_members(count: i32) -> Vec<MemberWeight> {
    (1..=count).map(|id| MemberWeight::new(id, 120)).collect()
}

#[test]
fn empty_member_set_fails_explicitly() {
    let tasks = vec![urgent_task(1)];
    let mut rng = SmallRng::seed_from_u64(7);
    assert_eq!(
        distribute_with_rng(&tasks, &[], now(), &mut rng).unwrap_err(),
        DistributionError::NoEligibleMembers
    );
}

#[test]
fn no_member_is_assigned_twice_to_the_same_task() {
    let tasks: Vec<SchedulableTask> = (1..=10).map(urgent_task).collect();
    let members = equal_members(4);
    for seed in 0..20 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let result = distribute_with_rng(&tasks, &members, now(), &mut rng).unwrap();
        for (task_id, assignees) in &result {
            let distinct: HashSet<i32> = assignees.iter().copied().collect();
            assert_eq!(
                distinct.len(),
                assignees.len(),
                "task {task_id} got a duplicate assignee (seed {seed})"
            );
        }
    }
}

#[test]
fn urgent_task_with_two_members_gets_both() {
    // Required count is min(3, 2) = 2.
    let tasks = vec![urgent_task(1)];
    let members = equal_members(2);
    let mut rng = SmallRng::seed_from_u64(42);
    let result = distribute_with_rng(&tasks, &members, now(), &mut rng).unwrap();
    let assignees: HashSet<i32> = result[&1].iter().copied().collect();
    assert_eq!(assignees, HashSet::from([1, 2]));
}

#[test]
fn priority_one_but_distant_deadline_gets_two_assignees() {
    let mut task = SchedulableTask::new(1, "big launch", 1, 1);
    task.due_date = Some(now() + Duration::days(30));
    let members = equal_members(5);
    let mut rng = SmallRng::seed_from_u64(3);
    let result = distribute_with_rng(&[task], &members, now(), &mut rng).unwrap();
    assert_eq!(result[&1].len(), 2);
}

#[test]
fn routine_task_gets_a_single_assignee() {
    let task = SchedulableTask::new(1, "laundry", 4, 1);
    let members = equal_members(5);
    let mut rng = SmallRng::seed_from_u64(3);
    let result = distribute_with_rng(&[task], &members, now(), &mut rng).unwrap();
    assert_eq!(result[&1].len(), 1);
}

#[test]
fn done_tasks_are_skipped() {
    let mut done = urgent_task(1);
    done.status = TaskStatus::Done;
    let open = SchedulableTask::new(2, "open", 3, 1);
    let members = equal_members(2);
    let mut rng = SmallRng::seed_from_u64(5);
    let result = distribute_with_rng(&[done, open], &members, now(), &mut rng).unwrap();
    assert!(!result.contains_key(&1));
    assert!(result.contains_key(&2));
}

#[test]
fn heavy_member_outweighs_idle_members_over_repeated_runs() {
    // Weights [100, 0, 0, 0, 0]: the weighted pool plus the weight tie-break
    // should hand the single-assignee task to member 1 at least as often as
    // to any idle member.
    let members = vec![
        MemberWeight::new(1, 100),
        MemberWeight::new(2, 0),
        MemberWeight::new(3, 0),
        MemberWeight::new(4, 0),
        MemberWeight::new(5, 0),
    ];
    let task = SchedulableTask::new(1, "solo", 4, 1);

    let mut wins: HashMap<i32, usize> = HashMap::new();
    for seed in 0..200 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let result = distribute_with_rng(
            &[task.clone()],
            &members,
            now(),
            &mut rng,
        )
        .unwrap();
        *wins.entry(result[&1][0]).or_insert(0) += 1;
    }

    let heavy = wins.get(&1).copied().unwrap_or(0);
    for idle in 2..=5 {
        let idle_wins = wins.get(&idle).copied().unwrap_or(0);
        assert!(
            heavy >= idle_wins,
            "member 1 won {heavy} times but idle member {idle} won {idle_wins}"
        );
    }
    assert!(heavy > 150, "expected the weighted member to dominate, got {heavy}/200");
}

#[test]
fn equal_weight_members_end_up_balanced() {
    let members = equal_members(4);
    let tasks: Vec<SchedulableTask> = (1..=13)
        .map(|id| SchedulableTask::new(id, format!("t{id}"), 3, 1))
        .collect();

    for seed in 0..10 {
        let mut rng = SmallRng::seed_from_u64(seed);
        let result = distribute_with_rng(&tasks, &members, now(), &mut rng).unwrap();

        let mut counts: HashMap<i32, usize> = members.iter().map(|m| (m.member_id, 0)).collect();
        for assignees in result.values() {
            for id in assignees {
                *counts.get_mut(id).unwrap() += 1;
            }
        }
        let max = counts.values().copied().max().unwrap();
        let min = counts.values().copied().min().unwrap();
        assert!(
            max - min <= 1,
            "unbalanced distribution (seed {seed}): {counts:?}"
        );
    }
}

#[test]
fn custom_policy_overrides_the_default_counts() {
    let policy = AssigneePolicy {
        urgent: 4,
        high_priority: 3,
        standard: 2,
    };
    let tasks = vec![urgent_task(1)];
    let members = equal_members(6);
    let mut rng = SmallRng::seed_from_u64(11);
    let result = distribute_with(&tasks, &members, now(), policy, &mut rng).unwrap();
    assert_eq!(result[&1].len(), 4);
}

#[test]
fn rerunning_distribution_only_appends_new_members() {
    let mut task = urgent_task(1);
    task.assignees = vec![1];
    let members = equal_members(3);
    let mut rng = SmallRng::seed_from_u64(9);
    let result = distribute_with_rng(&[task], &members, now(), &mut rng).unwrap();
    assert!(!result[&1].contains(&1), "existing assignee must not be re-added");
}
