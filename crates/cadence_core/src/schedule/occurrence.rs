//! Occurrence predicate and range enumeration.
//!
//! # Responsibility
//! - Implement the per-frequency occurrence rules.
//! - Enumerate occurrence dates over an inclusive calendar range.
//!
//! # Invariants
//! - No date earlier than `start_date` is ever an occurrence.
//! - Unrecognized frequency tags never occur; they do not error.
//! - `occurrences_in_range` is exactly the filter of the range by
//!   [`occurs_on`], in ascending order.

use crate::model::activity::{Activity, Frequency};
use chrono::{Datelike, NaiveDate, Weekday};

/// Returns whether `date` is an occurrence of `activity`.
///
/// Day-precision dates make the days-since-start arithmetic exact; there is
/// no time-of-day component to normalize away.
///
/// Monthly recurrence uses strict day-of-month equality: an activity started
/// on the 31st simply has no occurrence in shorter months. Do not clamp to
/// the last day of the month.
pub fn occurs_on(activity: &Activity, date: NaiveDate) -> bool {
    if date < activity.start_date {
        return false;
    }

    let days_since_start = (date - activity.start_date).num_days();
    match &activity.frequency {
        Frequency::Daily => true,
        Frequency::Weekly => days_since_start % 7 == 0,
        Frequency::BiWeekly => days_since_start % 14 == 0,
        Frequency::Monthly => date.day() == activity.start_date.day(),
        Frequency::Weekdays => !is_weekend(date.weekday()),
        Frequency::Weekends => is_weekend(date.weekday()),
        Frequency::Unrecognized(_) => false,
    }
}

/// Lists every occurrence of `activity` in `[range_start, range_end]`,
/// ascending.
///
/// The range is inclusive on both ends. A reversed range denotes the empty
/// interval and yields no dates. Evaluation walks the range day by day; the
/// ranges this serves are a week or a month, and the result must stay
/// exactly the filter of the range by [`occurs_on`].
pub fn occurrences_in_range(
    activity: &Activity,
    range_start: NaiveDate,
    range_end: NaiveDate,
) -> Vec<NaiveDate> {
    let mut occurrences = Vec::new();
    let mut cursor = range_start;
    while cursor <= range_end {
        if occurs_on(activity, cursor) {
            occurrences.push(cursor);
        }
        match cursor.succ_opt() {
            Some(next) => cursor = next,
            None => break,
        }
    }
    occurrences
}

fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}
