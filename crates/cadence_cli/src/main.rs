//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `cadence_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    // Tiny probe that validates core crate wiring independently from the
    // Flutter/FFI runtime setup.
    println!("cadence_core ping={}", cadence_core::ping());
    println!("cadence_core version={}", cadence_core::core_version());
}
