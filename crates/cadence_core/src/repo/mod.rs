//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Activity::validate()` before
//!   persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Read paths reject malformed persisted state instead of masking it,
//!   with one deliberate exception: unrecognized frequency tags decode to
//!   `Frequency::Unrecognized` and are logged, never errored.

pub mod activity_repo;
pub mod completion_repo;
