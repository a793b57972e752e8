//! Core domain logic for Cadence.
//! This crate is the single source of truth for recurrence invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod schedule;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::activity::{Activity, ActivityId, ActivityValidationError, Frequency};
pub use repo::activity_repo::{
    ActivityListQuery, ActivityRepository, RepoError, RepoResult, SqliteActivityRepository,
};
pub use repo::completion_repo::{CompletionRepository, SqliteCompletionRepository};
pub use schedule::occurrence::{occurrences_in_range, occurs_on};
pub use schedule::week::{week_plan, DayPlan, WeekPlan};
pub use service::activity_service::{ActivityService, CreateActivityRequest};
pub use service::schedule_service::{ChecklistEntry, ScheduleService, ScheduleServiceError};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
