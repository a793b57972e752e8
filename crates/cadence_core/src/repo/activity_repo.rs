//! Activity repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `activities` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Activity::validate()` before SQL mutations.
//! - Read paths must reject malformed persisted state, except frequency
//!   tags: unknown tags decode permissively and emit a data-quality warning.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::activity::{Activity, ActivityId, ActivityValidationError, Frequency};
use chrono::NaiveDate;
use log::warn;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ACTIVITY_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    category,
    start_date,
    frequency,
    is_deleted
FROM activities";

const ACTIVITY_REQUIRED_COLUMNS: &[&str] = &[
    "uuid",
    "title",
    "category",
    "start_date",
    "frequency",
    "is_deleted",
    "updated_at",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for activity persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ActivityValidationError),
    Db(DbError),
    NotFound(ActivityId),
    InvalidData(String),
    /// Connection has not been migrated to the schema this binary expects.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "activity not found: {id}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted activity data: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is behind expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ActivityValidationError> for RepoError {
    fn from(value: ActivityValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing activities.
#[derive(Debug, Clone, Default)]
pub struct ActivityListQuery {
    /// Optional exact category filter.
    pub category: Option<String>,
    pub include_deleted: bool,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for activity CRUD operations.
pub trait ActivityRepository {
    fn create_activity(&self, activity: &Activity) -> RepoResult<ActivityId>;
    fn update_activity(&self, activity: &Activity) -> RepoResult<()>;
    fn get_activity(&self, id: ActivityId, include_deleted: bool) -> RepoResult<Option<Activity>>;
    fn list_activities(&self, query: &ActivityListQuery) -> RepoResult<Vec<Activity>>;
    fn soft_delete_activity(&self, id: ActivityId) -> RepoResult<()>;
}

/// SQLite-backed activity repository.
pub struct SqliteActivityRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteActivityRepository<'conn> {
    /// Wraps a connection after verifying schema readiness.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not run.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   does not carry the shape this binary was built against.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, "activities", ACTIVITY_REQUIRED_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl ActivityRepository for SqliteActivityRepository<'_> {
    fn create_activity(&self, activity: &Activity) -> RepoResult<ActivityId> {
        activity.validate()?;

        self.conn.execute(
            "INSERT INTO activities (
                uuid,
                title,
                category,
                start_date,
                frequency,
                is_deleted
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                activity.uuid.to_string(),
                activity.title.as_str(),
                activity.category.as_deref(),
                date_to_db(activity.start_date),
                activity.frequency.label(),
                bool_to_int(activity.is_deleted),
            ],
        )?;

        Ok(activity.uuid)
    }

    fn update_activity(&self, activity: &Activity) -> RepoResult<()> {
        activity.validate()?;

        let changed = self.conn.execute(
            "UPDATE activities
             SET
                title = ?1,
                category = ?2,
                start_date = ?3,
                frequency = ?4,
                is_deleted = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?6;",
            params![
                activity.title.as_str(),
                activity.category.as_deref(),
                date_to_db(activity.start_date),
                activity.frequency.label(),
                bool_to_int(activity.is_deleted),
                activity.uuid.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(activity.uuid));
        }

        Ok(())
    }

    fn get_activity(&self, id: ActivityId, include_deleted: bool) -> RepoResult<Option<Activity>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ACTIVITY_SELECT_SQL}
             WHERE uuid = ?1
               AND (?2 = 1 OR is_deleted = 0);"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), bool_to_int(include_deleted)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_activity_row(row)?));
        }

        Ok(None)
    }

    fn list_activities(&self, query: &ActivityListQuery) -> RepoResult<Vec<Activity>> {
        let mut sql = format!("{ACTIVITY_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_deleted {
            sql.push_str(" AND is_deleted = 0");
        }

        if let Some(category) = &query.category {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.clone()));
        }

        sql.push_str(" ORDER BY start_date ASC, uuid ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut activities = Vec::new();

        while let Some(row) = rows.next()? {
            activities.push(parse_activity_row(row)?);
        }

        Ok(activities)
    }

    fn soft_delete_activity(&self, id: ActivityId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE activities
             SET
                is_deleted = 1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

/// Verifies that a connection carries the migrated schema a repository
/// needs before any query runs against it.
pub(crate) fn ensure_schema_ready(
    conn: &Connection,
    table: &'static str,
    required_columns: &[&'static str],
) -> RepoResult<()> {
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected_version = latest_version();
    if actual_version < expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(RepoError::MissingRequiredTable(table));
    }

    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut present = Vec::new();
    while let Some(row) = rows.next()? {
        present.push(row.get::<_, String>("name")?);
    }

    for column in required_columns {
        if !present.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn { table, column });
        }
    }

    Ok(())
}

fn parse_activity_row(row: &Row<'_>) -> RepoResult<Activity> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in activities.uuid"))
    })?;

    let start_date_text: String = row.get("start_date")?;
    let start_date = parse_db_date(&start_date_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid date value `{start_date_text}` in activities.start_date"
        ))
    })?;

    let frequency_text: String = row.get("frequency")?;
    let frequency = Frequency::parse(&frequency_text);
    if !frequency.is_recognized() {
        warn!(
            "event=activity_decode module=repo status=warn reason=unrecognized_frequency uuid={uuid} frequency={frequency_text}"
        );
    }

    let is_deleted = match row.get::<_, i64>("is_deleted")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_deleted value `{other}` in activities.is_deleted"
            )));
        }
    };

    let activity = Activity {
        uuid,
        title: row.get("title")?,
        category: row.get("category")?,
        start_date,
        frequency,
        is_deleted,
    };
    activity.validate()?;
    Ok(activity)
}

pub(crate) fn date_to_db(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub(crate) fn parse_db_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
