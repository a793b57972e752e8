//! Schedule use-case service.
//!
//! # Responsibility
//! - Load persisted activities and evaluate occurrence queries over them.
//! - Overlay the completion log onto daily checklists.
//!
//! # Invariants
//! - The occurrence calculator stays pure; all storage access happens here.
//! - "The present" is always an explicit `reference_date` argument.
//! - Soft-deleted activities never contribute occurrences.

use crate::model::activity::{Activity, ActivityId};
use crate::repo::activity_repo::{ActivityListQuery, ActivityRepository, RepoError};
use crate::repo::completion_repo::CompletionRepository;
use crate::schedule::occurrence::{occurrences_in_range, occurs_on};
use crate::schedule::week::{week_plan, WeekPlan};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from schedule use-case operations.
#[derive(Debug)]
pub enum ScheduleServiceError {
    /// Target activity does not exist or is tombstoned.
    ActivityNotFound(ActivityId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ScheduleServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ActivityNotFound(id) => write!(f, "activity not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ScheduleServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ActivityNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for ScheduleServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// One checklist line for a daily tracker view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChecklistEntry {
    pub activity_id: ActivityId,
    pub title: String,
    /// Whether the activity was marked done on the checklist date.
    pub done: bool,
}

/// Use-case service evaluating schedules over persisted activities.
pub struct ScheduleService<A: ActivityRepository, C: CompletionRepository> {
    activities: A,
    completions: C,
}

impl<A: ActivityRepository, C: CompletionRepository> ScheduleService<A, C> {
    /// Creates a service over activity and completion repositories.
    pub fn new(activities: A, completions: C) -> Self {
        Self {
            activities,
            completions,
        }
    }

    /// Lists every occurrence of one activity within an inclusive range.
    ///
    /// # Errors
    /// - `ActivityNotFound` when the ID is unknown or tombstoned.
    pub fn occurrences_between(
        &self,
        id: ActivityId,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> Result<Vec<NaiveDate>, ScheduleServiceError> {
        let activity = self.require_activity(id)?;
        Ok(occurrences_in_range(&activity, range_start, range_end))
    }

    /// Derives the weekly plan for the week containing `reference_date`
    /// from all active activities.
    pub fn week_plan(&self, reference_date: NaiveDate) -> Result<WeekPlan, ScheduleServiceError> {
        let activities = self.active_activities()?;
        Ok(week_plan(&activities, reference_date))
    }

    /// Builds the daily checklist for `reference_date`: every active
    /// activity occurring that day, with its completion flag.
    pub fn day_checklist(
        &self,
        reference_date: NaiveDate,
    ) -> Result<Vec<ChecklistEntry>, ScheduleServiceError> {
        let activities = self.active_activities()?;
        let mut entries = Vec::new();

        for activity in activities {
            if !occurs_on(&activity, reference_date) {
                continue;
            }
            let done = self.completions.is_completed(activity.uuid, reference_date)?;
            entries.push(ChecklistEntry {
                activity_id: activity.uuid,
                title: activity.title,
                done,
            });
        }

        Ok(entries)
    }

    /// Marks an activity done on a date. Idempotent.
    pub fn mark_done(&self, id: ActivityId, done_on: NaiveDate) -> Result<(), ScheduleServiceError> {
        self.completions
            .mark_completed(id, done_on)
            .map_err(map_not_found)
    }

    /// Clears a done mark for a date. Idempotent.
    pub fn clear_done(
        &self,
        id: ActivityId,
        done_on: NaiveDate,
    ) -> Result<(), ScheduleServiceError> {
        self.completions
            .clear_completed(id, done_on)
            .map_err(map_not_found)
    }

    /// Lists the dates an activity was marked done within a range.
    pub fn completions_between(
        &self,
        id: ActivityId,
        range_start: NaiveDate,
        range_end: NaiveDate,
    ) -> Result<Vec<NaiveDate>, ScheduleServiceError> {
        self.require_activity(id)?;
        Ok(self
            .completions
            .list_completions(id, range_start, range_end)?)
    }

    fn require_activity(&self, id: ActivityId) -> Result<Activity, ScheduleServiceError> {
        self.activities
            .get_activity(id, false)?
            .ok_or(ScheduleServiceError::ActivityNotFound(id))
    }

    fn active_activities(&self) -> Result<Vec<Activity>, ScheduleServiceError> {
        Ok(self
            .activities
            .list_activities(&ActivityListQuery::default())?)
    }
}

fn map_not_found(err: RepoError) -> ScheduleServiceError {
    match err {
        RepoError::NotFound(id) => ScheduleServiceError::ActivityNotFound(id),
        other => ScheduleServiceError::Repo(other),
    }
}
