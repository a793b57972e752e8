//! FFI surface crate for the Cadence core.
//!
//! Exposes use-case level entry points to the UI shell via
//! `flutter_rust_bridge`. All business invariants live in `cadence_core`;
//! this crate only adapts signatures and error envelopes.

pub mod api;
