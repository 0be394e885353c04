use super::{PersistenceError, PersistenceResult};
use crate::plan::{DailyAssignment, WeeklyPlan};
use crate::slots::{weekday_from_name, weekday_name};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

pub fn save_plan_to_json<P: AsRef<Path>>(plan: &WeeklyPlan, path: P) -> PersistenceResult<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, plan)?;
    Ok(())
}

pub fn load_plan_from_json<P: AsRef<Path>>(path: P) -> PersistenceResult<WeeklyPlan> {
    let file = File::open(path)?;
    let plan: WeeklyPlan = serde_json::from_reader(file)?;
    Ok(plan)
}

/// One CSV row per scheduled chunk.
#[derive(Default, Serialize, Deserialize)]
struct AssignmentCsvRecord {
    day: String,
    start: String,
    task_id: i32,
    title: String,
    priority: u8,
    group_name: String,
}

impl AssignmentCsvRecord {
    fn from_assignment(assignment: &DailyAssignment) -> Self {
        Self {
            day: weekday_name(assignment.day).to_string(),
            start: assignment.start.format("%H:%M").to_string(),
            task_id: assignment.task_id,
            title: assignment.title.clone(),
            priority: assignment.priority,
            group_name: assignment.group_name.clone().unwrap_or_default(),
        }
    }

    fn into_assignment(self) -> PersistenceResult<DailyAssignment> {
        let day = weekday_from_name(&self.day)
            .ok_or_else(|| PersistenceError::InvalidData(format!("unknown weekday '{}'", self.day)))?;
        let start = NaiveTime::parse_from_str(&self.start, "%H:%M").map_err(|_| {
            PersistenceError::InvalidData(format!("invalid slot start time '{}'", self.start))
        })?;
        Ok(DailyAssignment {
            task_id: self.task_id,
            title: self.title,
            priority: self.priority,
            day,
            start,
            group_name: if self.group_name.is_empty() {
                None
            } else {
                Some(self.group_name)
            },
        })
    }
}

pub fn save_plan_to_csv<P: AsRef<Path>>(plan: &WeeklyPlan, path: P) -> PersistenceResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for assignment in plan.iter() {
        writer.serialize(AssignmentCsvRecord::from_assignment(assignment))?;
    }
    writer.flush().map_err(PersistenceError::Io)?;
    Ok(())
}

pub fn load_plan_from_csv<P: AsRef<Path>>(path: P) -> PersistenceResult<WeeklyPlan> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut plan = WeeklyPlan::new();
    for record in reader.deserialize() {
        let record: AssignmentCsvRecord = record?;
        plan.push(record.into_assignment()?);
    }
    Ok(plan)
}
