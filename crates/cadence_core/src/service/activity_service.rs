//! Activity use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::activity::{Activity, ActivityId, Frequency};
use crate::repo::activity_repo::{ActivityListQuery, ActivityRepository, RepoResult};
use chrono::NaiveDate;

/// Use-case service wrapper for activity CRUD operations.
pub struct ActivityService<R: ActivityRepository> {
    repo: R,
}

/// Request model for creating a recurring activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateActivityRequest {
    /// Display title stored in `title`.
    pub title: String,
    /// Optional grouping label.
    pub category: Option<String>,
    /// First calendar date the activity can occur on.
    pub start_date: NaiveDate,
    /// Recurrence rule tag.
    pub frequency: Frequency,
}

impl<R: ActivityRepository> ActivityService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a new activity from a typed request.
    ///
    /// # Contract
    /// - Title is stored trimmed.
    /// - Returns the created stable activity ID.
    pub fn create_activity(&self, request: &CreateActivityRequest) -> RepoResult<ActivityId> {
        let mut activity = Activity::new(
            request.title.trim().to_string(),
            request.start_date,
            request.frequency.clone(),
        );
        activity.category = request.category.as_ref().map(|value| value.trim().to_string());
        self.repo.create_activity(&activity)
    }

    /// Updates an existing activity by stable ID.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_activity(&self, activity: &Activity) -> RepoResult<()> {
        self.repo.update_activity(activity)
    }

    /// Gets one activity by ID with optional deleted-row visibility.
    pub fn get_activity(&self, id: ActivityId, include_deleted: bool) -> RepoResult<Option<Activity>> {
        self.repo.get_activity(id, include_deleted)
    }

    /// Lists activities using filter and pagination options.
    pub fn list_activities(&self, query: &ActivityListQuery) -> RepoResult<Vec<Activity>> {
        self.repo.list_activities(query)
    }

    /// Soft-deletes an activity by ID.
    pub fn soft_delete_activity(&self, id: ActivityId) -> RepoResult<()> {
        self.repo.soft_delete_activity(id)
    }
}
