//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep UI/FFI layers decoupled from storage details.
//! - Host the seam where persisted rows are fetched and handed to the pure
//!   occurrence calculator.

pub mod activity_service;
pub mod schedule_service;
