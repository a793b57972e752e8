//! Weekly plan view-model derivation.
//!
//! # Responsibility
//! - Project a set of activities onto the Monday-based week containing an
//!   explicit reference date.
//!
//! # Invariants
//! - The plan always spans exactly 7 consecutive days, Monday first.
//! - Tombstoned activities never appear in a plan.
//! - Per-day ID order follows the input activity order.

use crate::model::activity::{Activity, ActivityId};
use crate::schedule::occurrence::occurs_on;
use chrono::{Days, NaiveDate, Weekday};

/// Activities occurring on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlan {
    /// The calendar day this slot describes.
    pub date: NaiveDate,
    /// IDs of activities occurring on `date`, in input order.
    pub activity_ids: Vec<ActivityId>,
}

/// One rendered week of activity occurrences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekPlan {
    /// The date the plan was derived for; always inside `days`.
    pub reference_date: NaiveDate,
    /// Monday through Sunday of the containing week.
    pub days: Vec<DayPlan>,
}

impl WeekPlan {
    /// Returns the plan slot for `date`, if it falls inside this week.
    pub fn day(&self, date: NaiveDate) -> Option<&DayPlan> {
        self.days.iter().find(|day| day.date == date)
    }
}

/// Derives the weekly occurrence plan for the week containing
/// `reference_date`.
///
/// `reference_date` is an explicit input: the caller decides what "the
/// present" is, which keeps this derivation deterministic under test.
pub fn week_plan(activities: &[Activity], reference_date: NaiveDate) -> WeekPlan {
    let monday = reference_date.week(Weekday::Mon).first_day();

    let days = (0..7u64)
        .map(|offset| {
            let date = monday + Days::new(offset);
            let activity_ids = activities
                .iter()
                .filter(|activity| activity.is_active() && occurs_on(activity, date))
                .map(|activity| activity.uuid)
                .collect();
            DayPlan { date, activity_ids }
        })
        .collect();

    WeekPlan {
        reference_date,
        days,
    }
}
