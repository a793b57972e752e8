//! Recurring activity domain model.
//!
//! # Responsibility
//! - Define the canonical activity record consumed by the scheduler.
//! - Provide lifecycle helpers for soft-delete semantics.
//! - Parse and print frequency tags without losing stored data.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another activity.
//! - `is_deleted` is the source of truth for tombstone state.
//! - An unrecognized frequency tag keeps its raw text and never schedules.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every recurring activity.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ActivityId = Uuid;

/// Recurrence rule tag governing which dates are occurrences.
///
/// Stored data uses lower-case text tags. Parsing is case-insensitive and
/// total: anything outside the closed set becomes [`Frequency::Unrecognized`]
/// with the raw tag preserved, so a typo in stored data degrades to "never
/// occurs" instead of failing a read or being rewritten on the next save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    /// Every day from the start date on.
    Daily,
    /// Every 7th day counted from the start date.
    Weekly,
    /// Every 14th day counted from the start date.
    BiWeekly,
    /// Same day-of-month as the start date.
    Monthly,
    /// Monday through Friday.
    Weekdays,
    /// Saturday and Sunday.
    Weekends,
    /// Tag outside the closed set; never schedules.
    Unrecognized(String),
}

impl Frequency {
    /// Parses a stored frequency tag.
    ///
    /// Matching is case-insensitive and whitespace-trimmed. Unknown tags are
    /// preserved verbatim (post-trim) inside `Unrecognized`.
    pub fn parse(raw: &str) -> Self {
        let tag = raw.trim();
        match tag.to_ascii_lowercase().as_str() {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            "bi-weekly" => Self::BiWeekly,
            "monthly" => Self::Monthly,
            "weekdays" => Self::Weekdays,
            "weekends" => Self::Weekends,
            _ => Self::Unrecognized(tag.to_string()),
        }
    }

    /// Returns the canonical stored tag for this frequency.
    ///
    /// Unrecognized values return their original raw tag.
    pub fn label(&self) -> &str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::BiWeekly => "bi-weekly",
            Self::Monthly => "monthly",
            Self::Weekdays => "weekdays",
            Self::Weekends => "weekends",
            Self::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Returns whether this tag belongs to the closed recurrence set.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }
}

impl From<String> for Frequency {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Frequency> for String {
    fn from(value: Frequency) -> Self {
        value.label().to_string()
    }
}

impl Display for Frequency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Validation failures for activity construction and updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityValidationError {
    /// Nil UUID would break identity guarantees.
    NilUuid,
    /// Title is empty after trimming.
    BlankTitle,
    /// Category was provided but is empty after trimming.
    BlankCategory,
}

impl Display for ActivityValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "activity uuid must not be nil"),
            Self::BlankTitle => write!(f, "activity title must not be blank"),
            Self::BlankCategory => {
                write!(f, "activity category must not be blank when present")
            }
        }
    }
}

impl Error for ActivityValidationError {}

/// Canonical record for one recurring activity.
///
/// Title and category are opaque payload as far as occurrence logic is
/// concerned; the scheduler only reads `start_date` and `frequency`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawActivity")]
pub struct Activity {
    /// Stable global ID used for linking and auditing.
    pub uuid: ActivityId,
    /// Display title shown by tracker and calendar views.
    pub title: String,
    /// Optional grouping label (e.g. `health`, `social`).
    pub category: Option<String>,
    /// First calendar date the activity can occur on.
    pub start_date: NaiveDate,
    /// Recurrence rule tag.
    pub frequency: Frequency,
    /// Soft delete tombstone to preserve history.
    pub is_deleted: bool,
}

impl Activity {
    /// Creates a new activity with a generated stable ID.
    ///
    /// # Invariants
    /// - `category` starts as `None`.
    /// - `is_deleted` starts as `false`.
    pub fn new(title: impl Into<String>, start_date: NaiveDate, frequency: Frequency) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            title: title.into(),
            category: None,
            start_date,
            frequency,
            is_deleted: false,
        }
    }

    /// Creates a new activity with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    ///
    /// # Errors
    /// - Rejects nil UUIDs; all other fields are validated like [`validate`].
    ///
    /// [`validate`]: Activity::validate
    pub fn with_id(
        uuid: ActivityId,
        title: impl Into<String>,
        start_date: NaiveDate,
        frequency: Frequency,
    ) -> Result<Self, ActivityValidationError> {
        let activity = Self {
            uuid,
            title: title.into(),
            category: None,
            start_date,
            frequency,
            is_deleted: false,
        };
        activity.validate()?;
        Ok(activity)
    }

    /// Checks field-level invariants shared by write paths.
    ///
    /// # Errors
    /// - `NilUuid` when `uuid` is all zeros.
    /// - `BlankTitle` when `title` trims to empty.
    /// - `BlankCategory` when `category` is `Some` but trims to empty.
    pub fn validate(&self) -> Result<(), ActivityValidationError> {
        if self.uuid.is_nil() {
            return Err(ActivityValidationError::NilUuid);
        }
        if self.title.trim().is_empty() {
            return Err(ActivityValidationError::BlankTitle);
        }
        if let Some(category) = &self.category {
            if category.trim().is_empty() {
                return Err(ActivityValidationError::BlankCategory);
            }
        }
        Ok(())
    }

    /// Marks this activity as softly deleted (tombstoned).
    pub fn soft_delete(&mut self) {
        self.is_deleted = true;
    }

    /// Clears soft delete flag.
    pub fn restore(&mut self) {
        self.is_deleted = false;
    }

    /// Returns whether this activity should be considered visible/active.
    pub fn is_active(&self) -> bool {
        !self.is_deleted
    }
}

/// Wire shape for deserialization; converted through validation.
#[derive(Deserialize)]
struct RawActivity {
    uuid: ActivityId,
    title: String,
    #[serde(default)]
    category: Option<String>,
    start_date: NaiveDate,
    frequency: Frequency,
    #[serde(default)]
    is_deleted: bool,
}

impl TryFrom<RawActivity> for Activity {
    type Error = ActivityValidationError;

    fn try_from(raw: RawActivity) -> Result<Self, Self::Error> {
        let activity = Self {
            uuid: raw.uuid,
            title: raw.title,
            category: raw.category,
            start_date: raw.start_date,
            frequency: raw.frequency,
            is_deleted: raw.is_deleted,
        };
        activity.validate()?;
        Ok(activity)
    }
}
