use tempfile::NamedTempFile;
use weekplan::{
    AvailabilityConfig, PersistenceError, SchedulableTask, WeeklyAvailability, WeeklyPlan,
    allocate, load_plan_from_csv, load_plan_from_json, save_plan_to_csv, save_plan_to_json,
};

fn build_sample_plan() -> WeeklyPlan {
    let mut config = AvailabilityConfig::default();
    config.sunday = "09:00-12:00".into();
    config.wednesday = "18:00-20:00".into();
    let mut availability = WeeklyAvailability::from_config(&config);

    let mut report = SchedulableTask::new(1, "quarterly report", 1, 3);
    report.group_name = Some("ops".into());
    let review = SchedulableTask::new(2, "code review", 2, 2);

    let outcome = allocate(&[report, review], &mut availability);
    assert!(outcome.fully_scheduled());
    outcome.plan
}

#[test]
fn json_round_trip_preserves_plan() {
    let plan = build_sample_plan();
    let file = NamedTempFile::new().unwrap();

    save_plan_to_json(&plan, file.path()).unwrap();
    let loaded = load_plan_from_json(file.path()).unwrap();

    assert_eq!(loaded, plan);
}

#[test]
fn csv_round_trip_preserves_every_assignment() {
    let plan = build_sample_plan();
    let file = NamedTempFile::new().unwrap();

    save_plan_to_csv(&plan, file.path()).unwrap();
    let loaded = load_plan_from_csv(file.path()).unwrap();

    assert_eq!(loaded.total_assignments(), plan.total_assignments());
    let original: Vec<_> = plan.iter().collect();
    let restored: Vec<_> = loaded.iter().collect();
    assert_eq!(restored, original);
}

#[test]
fn csv_round_trip_keeps_optional_group_names() {
    let plan = build_sample_plan();
    let file = NamedTempFile::new().unwrap();

    save_plan_to_csv(&plan, file.path()).unwrap();
    let loaded = load_plan_from_csv(file.path()).unwrap();

    let groups: Vec<_> = loaded.iter().map(|a| a.group_name.clone()).collect();
    assert!(groups.contains(&Some("ops".into())));
    assert!(groups.contains(&None));
}

#[test]
fn empty_plan_survives_json_round_trip() {
    let plan = WeeklyPlan::new();
    let file = NamedTempFile::new().unwrap();

    save_plan_to_json(&plan, file.path()).unwrap();
    let loaded = load_plan_from_json(file.path()).unwrap();

    assert!(loaded.is_empty());
    assert_eq!(loaded.days.len(), 7);
}

#[test]
fn loading_a_missing_file_is_an_io_error() {
    let result = load_plan_from_json("definitely/not/here.json");
    match result {
        Ok(_) => panic!("expected a missing file to fail"),
        Err(PersistenceError::Io(_)) => {}
        Err(other) => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn csv_load_rejects_unknown_weekday() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(
        file.path(),
        "day,start,task_id,title,priority,group_name\nSmonday,09:00,1,t,1,\n",
    )
    .unwrap();

    let result = load_plan_from_csv(file.path());
    match result {
        Ok(_) => panic!("expected an unknown weekday to be rejected"),
        Err(PersistenceError::InvalidData(msg)) => {
            assert!(msg.contains("unknown weekday"), "unexpected message: {msg}")
        }
        Err(other) => panic!("expected InvalidData error, got {other:?}"),
    }
}

#[test]
fn csv_load_rejects_malformed_start_time() {
    let file = NamedTempFile::new().unwrap();
    std::fs::write(
        file.path(),
        "day,start,task_id,title,priority,group_name\nMonday,9am,1,t,1,\n",
    )
    .unwrap();

    let result = load_plan_from_csv(file.path());
    match result {
        Ok(_) => panic!("expected a malformed start time to be rejected"),
        Err(PersistenceError::InvalidData(msg)) => {
            assert!(msg.contains("invalid slot start time"), "unexpected message: {msg}")
        }
        Err(other) => panic!("expected InvalidData error, got {other:?}"),
    }
}
