//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Parse boundary text (dates, IDs) and keep error semantics simple for
//!   UI integration.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Calendar dates cross the boundary as ISO `YYYY-MM-DD` strings.
//! - Malformed boundary input returns a failure envelope, never an abort.

use cadence_core::db::open_db;
use cadence_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ActivityId, ActivityService, CreateActivityRequest, Frequency, ScheduleService,
    ScheduleServiceError, SqliteActivityRepository, SqliteCompletionRepository,
};
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const ENTRY_DB_FILE_NAME: &str = "cadence_entry.sqlite3";
static ENTRY_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - UI-thread safe for current implementation.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - UI-thread safe for current implementation.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Reconfiguration attempts with different level or directory return error.
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope for entry command flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Optional affected activity ID.
    pub activity_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl EntryActionResponse {
    fn success(message: impl Into<String>, activity_id: String) -> Self {
        Self {
            ok: true,
            activity_id: Some(activity_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            activity_id: None,
            message: message.into(),
        }
    }
}

/// One day slot in the weekly plan response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDayPlan {
    /// ISO `YYYY-MM-DD` date of this slot.
    pub date: String,
    /// IDs of activities occurring on `date`.
    pub activity_ids: Vec<String>,
}

/// Weekly plan response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryWeekResponse {
    /// Monday through Sunday slots; empty on failure.
    pub days: Vec<EntryDayPlan>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// One checklist line in the daily tracker response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryChecklistItem {
    pub activity_id: String,
    pub title: String,
    pub done: bool,
}

/// Daily checklist response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryChecklistResponse {
    /// Entries for activities occurring on the requested date.
    pub items: Vec<EntryChecklistItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Occurrence listing response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryOccurrencesResponse {
    /// ISO `YYYY-MM-DD` occurrence dates, ascending; empty on failure.
    pub dates: Vec<String>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Creates a recurring activity from entry command flow.
///
/// `frequency` accepts the stored tag set case-insensitively; unknown tags
/// are stored as-is and simply never schedule.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns operation result and created activity ID on success.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_create_activity(
    title: String,
    category: Option<String>,
    start_date: String,
    frequency: String,
) -> EntryActionResponse {
    let start_date = match parse_iso_date("start_date", &start_date) {
        Ok(date) => date,
        Err(message) => return EntryActionResponse::failure(message),
    };

    let request = CreateActivityRequest {
        title: title.trim().to_string(),
        category,
        start_date,
        frequency: Frequency::parse(&frequency),
    };

    match with_activity_service(|service| service.create_activity(&request)) {
        Ok(activity_id) => {
            EntryActionResponse::success("Activity created.", activity_id.to_string())
        }
        Err(err) => EntryActionResponse::failure(format!("entry_create_activity failed: {err}")),
    }
}

/// Soft-deletes an activity from entry command flow.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_delete_activity(activity_id: String) -> EntryActionResponse {
    let id = match parse_activity_id(&activity_id) {
        Ok(id) => id,
        Err(message) => return EntryActionResponse::failure(message),
    };

    match with_activity_service(|service| service.soft_delete_activity(id).map(|()| id)) {
        Ok(id) => EntryActionResponse::success("Activity deleted.", id.to_string()),
        Err(err) => EntryActionResponse::failure(format!("entry_delete_activity failed: {err}")),
    }
}

/// Returns the weekly plan for the week containing `reference_date`.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Returns 7 slots (Monday first) on success, empty slots on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_week_plan(reference_date: String) -> EntryWeekResponse {
    let reference_date = match parse_iso_date("reference_date", &reference_date) {
        Ok(date) => date,
        Err(message) => {
            return EntryWeekResponse {
                days: Vec::new(),
                message,
            };
        }
    };

    match with_schedule_service(|service| service.week_plan(reference_date)) {
        Ok(plan) => EntryWeekResponse {
            days: plan
                .days
                .into_iter()
                .map(|day| EntryDayPlan {
                    date: day.date.to_string(),
                    activity_ids: day
                        .activity_ids
                        .iter()
                        .map(ActivityId::to_string)
                        .collect(),
                })
                .collect(),
            message: "Week plan derived.".to_string(),
        },
        Err(err) => EntryWeekResponse {
            days: Vec::new(),
            message: format!("entry_week_plan failed: {err}"),
        },
    }
}

/// Returns the daily checklist (occurring activities + done flags) for a
/// date.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_day_checklist(reference_date: String) -> EntryChecklistResponse {
    let reference_date = match parse_iso_date("reference_date", &reference_date) {
        Ok(date) => date,
        Err(message) => {
            return EntryChecklistResponse {
                items: Vec::new(),
                message,
            };
        }
    };

    match with_schedule_service(|service| service.day_checklist(reference_date)) {
        Ok(entries) => {
            let items = entries
                .into_iter()
                .map(|entry| EntryChecklistItem {
                    activity_id: entry.activity_id.to_string(),
                    title: entry.title,
                    done: entry.done,
                })
                .collect::<Vec<_>>();
            let message = if items.is_empty() {
                "Nothing scheduled.".to_string()
            } else {
                format!("{} item(s) scheduled.", items.len())
            };
            EntryChecklistResponse { items, message }
        }
        Err(err) => EntryChecklistResponse {
            items: Vec::new(),
            message: format!("entry_day_checklist failed: {err}"),
        },
    }
}

/// Lists occurrence dates of one activity within an inclusive range.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - A reversed range returns an empty, successful listing.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_occurrences(
    activity_id: String,
    range_start: String,
    range_end: String,
) -> EntryOccurrencesResponse {
    let parsed = parse_activity_id(&activity_id).and_then(|id| {
        let start = parse_iso_date("range_start", &range_start)?;
        let end = parse_iso_date("range_end", &range_end)?;
        Ok((id, start, end))
    });
    let (id, start, end) = match parsed {
        Ok(values) => values,
        Err(message) => {
            return EntryOccurrencesResponse {
                dates: Vec::new(),
                message,
            };
        }
    };

    match with_schedule_service(|service| service.occurrences_between(id, start, end)) {
        Ok(dates) => EntryOccurrencesResponse {
            dates: dates.iter().map(NaiveDate::to_string).collect(),
            message: format!("{} occurrence(s).", dates.len()),
        },
        Err(err) => EntryOccurrencesResponse {
            dates: Vec::new(),
            message: format!("entry_occurrences failed: {err}"),
        },
    }
}

/// Marks an activity done on a date. Idempotent.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_mark_done(activity_id: String, done_on: String) -> EntryActionResponse {
    run_done_mutation(activity_id, done_on, "Marked done.", |service, id, date| {
        service.mark_done(id, date)
    })
}

/// Clears a done mark for a date. Idempotent.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_clear_done(activity_id: String, done_on: String) -> EntryActionResponse {
    run_done_mutation(activity_id, done_on, "Done mark cleared.", |service, id, date| {
        service.clear_done(id, date)
    })
}

type EntryScheduleService<'conn> =
    ScheduleService<SqliteActivityRepository<'conn>, SqliteCompletionRepository<'conn>>;

fn run_done_mutation(
    activity_id: String,
    done_on: String,
    success_message: &str,
    f: impl FnOnce(
        &EntryScheduleService<'_>,
        ActivityId,
        NaiveDate,
    ) -> Result<(), ScheduleServiceError>,
) -> EntryActionResponse {
    let id = match parse_activity_id(&activity_id) {
        Ok(id) => id,
        Err(message) => return EntryActionResponse::failure(message),
    };
    let done_on = match parse_iso_date("done_on", &done_on) {
        Ok(date) => date,
        Err(message) => return EntryActionResponse::failure(message),
    };

    match with_schedule_service(|service| f(service, id, done_on)) {
        Ok(()) => EntryActionResponse::success(success_message, id.to_string()),
        Err(err) => EntryActionResponse::failure(format!("done mutation failed: {err}")),
    }
}

fn parse_iso_date(field: &str, value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("invalid {field} `{value}`; expected YYYY-MM-DD"))
}

fn parse_activity_id(value: &str) -> Result<ActivityId, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid activity_id `{value}`"))
}

fn resolve_entry_db_path() -> PathBuf {
    ENTRY_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("CADENCE_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(ENTRY_DB_FILE_NAME)
        })
        .clone()
}

fn with_activity_service<T>(
    f: impl FnOnce(&ActivityService<SqliteActivityRepository<'_>>) -> cadence_core::RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_entry_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("entry DB open failed: {err}"))?;
    let repo = SqliteActivityRepository::try_new(&conn)
        .map_err(|err| format!("entry repo init failed: {err}"))?;
    let service = ActivityService::new(repo);
    f(&service).map_err(|err| err.to_string())
}

fn with_schedule_service<T>(
    f: impl FnOnce(&EntryScheduleService<'_>) -> Result<T, ScheduleServiceError>,
) -> Result<T, String> {
    let db_path = resolve_entry_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("entry DB open failed: {err}"))?;
    let activities = SqliteActivityRepository::try_new(&conn)
        .map_err(|err| format!("entry repo init failed: {err}"))?;
    let completions = SqliteCompletionRepository::try_new(&conn)
        .map_err(|err| format!("entry repo init failed: {err}"))?;
    let service = ScheduleService::new(activities, completions);
    f(&service).map_err(|err| err.to_string())
}
