//! Completion-log repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist which dates an activity was marked done on.
//! - Keep completion writes idempotent per `(activity, date)` pair.
//!
//! # Invariants
//! - Completions only attach to existing, non-deleted activities.
//! - `mark_completed` and `clear_completed` are idempotent.
//! - Ranged listings are ascending by date and bounded inclusively.

use crate::model::activity::ActivityId;
use crate::repo::activity_repo::{
    date_to_db, ensure_schema_ready, parse_db_date, RepoError, RepoResult,
};
use chrono::NaiveDate;
use rusqlite::{params, Connection};

const COMPLETION_REQUIRED_COLUMNS: &[&str] = &["activity_uuid", "done_on"];

/// Repository interface for the activity completion log.
pub trait CompletionRepository {
    fn mark_completed(&self, id: ActivityId, done_on: NaiveDate) -> RepoResult<()>;
    fn clear_completed(&self, id: ActivityId, done_on: NaiveDate) -> RepoResult<()>;
    fn is_completed(&self, id: ActivityId, done_on: NaiveDate) -> RepoResult<bool>;
    fn list_completions(
        &self,
        id: ActivityId,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> RepoResult<Vec<NaiveDate>>;
}

/// SQLite-backed completion log repository.
pub struct SqliteCompletionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCompletionRepository<'conn> {
    /// Wraps a connection after verifying schema readiness.
    ///
    /// # Errors
    /// - Same readiness errors as the activity repository; completions need
    ///   both the `activity_completions` table and its parent `activities`.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_schema_ready(conn, "activities", &["uuid", "is_deleted"])?;
        ensure_schema_ready(conn, "activity_completions", COMPLETION_REQUIRED_COLUMNS)?;
        Ok(Self { conn })
    }

    fn require_active_activity(&self, id: ActivityId) -> RepoResult<()> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM activities WHERE uuid = ?1 AND is_deleted = 0
            );",
            [id.to_string()],
            |row| row.get(0),
        )?;
        if exists == 0 {
            return Err(RepoError::NotFound(id));
        }
        Ok(())
    }
}

impl CompletionRepository for SqliteCompletionRepository<'_> {
    fn mark_completed(&self, id: ActivityId, done_on: NaiveDate) -> RepoResult<()> {
        self.require_active_activity(id)?;

        self.conn.execute(
            "INSERT OR IGNORE INTO activity_completions (activity_uuid, done_on)
             VALUES (?1, ?2);",
            params![id.to_string(), date_to_db(done_on)],
        )?;

        Ok(())
    }

    fn clear_completed(&self, id: ActivityId, done_on: NaiveDate) -> RepoResult<()> {
        self.require_active_activity(id)?;

        self.conn.execute(
            "DELETE FROM activity_completions
             WHERE activity_uuid = ?1 AND done_on = ?2;",
            params![id.to_string(), date_to_db(done_on)],
        )?;

        Ok(())
    }

    fn is_completed(&self, id: ActivityId, done_on: NaiveDate) -> RepoResult<bool> {
        let found: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM activity_completions
                WHERE activity_uuid = ?1 AND done_on = ?2
            );",
            params![id.to_string(), date_to_db(done_on)],
            |row| row.get(0),
        )?;
        Ok(found == 1)
    }

    fn list_completions(
        &self,
        id: ActivityId,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> RepoResult<Vec<NaiveDate>> {
        let mut stmt = self.conn.prepare(
            "SELECT done_on FROM activity_completions
             WHERE activity_uuid = ?1
               AND done_on >= ?2
               AND done_on <= ?3
             ORDER BY done_on ASC;",
        )?;

        let mut rows = stmt.query(params![
            id.to_string(),
            date_to_db(range_start),
            date_to_db(range_end)
        ])?;
        let mut dates = Vec::new();

        while let Some(row) = rows.next()? {
            let done_on_text: String = row.get("done_on")?;
            let done_on = parse_db_date(&done_on_text).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "invalid date value `{done_on_text}` in activity_completions.done_on"
                ))
            })?;
            dates.push(done_on);
        }

        Ok(dates)
    }
}
