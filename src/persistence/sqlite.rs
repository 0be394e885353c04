use super::{PersistenceResult, PlanStore};
use crate::availability::AvailabilityConfig;
use crate::plan::WeeklyPlan;
use rusqlite::{Connection, OptionalExtension, params};
use std::sync::Mutex;

/// SQLite-backed [`PlanStore`]: one JSON blob per user for the latest
/// generated plan and one for the stored availability strings.
pub struct SqlitePlanStore {
    connection: Mutex<Connection>,
}

impl SqlitePlanStore {
    pub fn new<P: AsRef<std::path::Path>>(path: P) -> PersistenceResult<Self> {
        let connection = Connection::open(path)?;
        Self::initialize_schema(&connection)?;
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    fn initialize_schema(connection: &Connection) -> PersistenceResult<()> {
        let ddl = r#"
            CREATE TABLE IF NOT EXISTS plans (
                user_id INTEGER PRIMARY KEY,
                plan_json TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS availability (
                user_id INTEGER PRIMARY KEY,
                config_json TEXT NOT NULL
            );
        "#;
        connection.execute_batch(ddl)?;
        Ok(())
    }

    fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.connection.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PlanStore for SqlitePlanStore {
    fn save_plan(&self, user_id: i32, plan: &WeeklyPlan) -> PersistenceResult<()> {
        let json = serde_json::to_string(plan)?;
        let conn = self.connection();
        conn.execute(
            "INSERT INTO plans (user_id, plan_json) VALUES (?1, ?2)
             ON CONFLICT(user_id) DO UPDATE SET plan_json = excluded.plan_json",
            params![user_id, json],
        )?;
        Ok(())
    }

    fn load_plan(&self, user_id: i32) -> PersistenceResult<Option<WeeklyPlan>> {
        let conn = self.connection();
        let json: Option<String> = conn
            .query_row(
                "SELECT plan_json FROM plans WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;
        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn save_availability(&self, user_id: i32, config: &AvailabilityConfig) -> PersistenceResult<()> {
        let json = serde_json::to_string(config)?;
        let conn = self.connection();
        conn.execute(
            "INSERT INTO availability (user_id, config_json) VALUES (?1, ?2)
             ON CONFLICT(user_id) DO UPDATE SET config_json = excluded.config_json",
            params![user_id, json],
        )?;
        Ok(())
    }

    fn load_availability(&self, user_id: i32) -> PersistenceResult<Option<AvailabilityConfig>> {
        let conn = self.connection();
        let json: Option<String> = conn
            .query_row(
                "SELECT config_json FROM availability WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;
        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}
