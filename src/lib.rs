pub mod allocator;
pub mod availability;
pub mod distribution;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod persistence;
pub mod plan;
pub mod slots;
pub mod task;
pub mod weights;

pub use allocator::{AllocationOutcome, allocate};
pub use availability::{AvailabilityConfig, WeeklyAvailability};
pub use distribution::{
    AssigneePolicy, DistributionError, DistributionResult, URGENT_WINDOW_DAYS, distribute,
    distribute_with, distribute_with_rng, is_urgent,
};
#[cfg(feature = "sqlite")]
pub use persistence::sqlite::SqlitePlanStore;
pub use persistence::{
    PersistenceError, PlanStore, load_plan_from_csv, load_plan_from_json, save_plan_to_csv,
    save_plan_to_json,
};
pub use plan::{DailyAssignment, DayPlan, WeeklyPlan};
pub use slots::{SLOT_MINUTES, Slot, WEEKDAYS, parse_day, weekday_from_name, weekday_name};
pub use task::{
    SchedulableTask, TaskStatus, required_hours_from_minutes, sort_for_allocation,
};
pub use weights::{MemberWeight, SavedSchedule};
