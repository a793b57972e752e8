//! Occurrence calculation over recurring activities.
//!
//! # Responsibility
//! - Decide membership of calendar dates in an activity's occurrence set.
//! - Derive the weekly view-model consumed by tracker/calendar rendering.
//!
//! # Invariants
//! - Every function here is pure: no clock reads, no I/O, no shared state.
//! - Callers supply explicit reference dates; "today" never comes from the
//!   environment.

pub mod occurrence;
pub mod week;
