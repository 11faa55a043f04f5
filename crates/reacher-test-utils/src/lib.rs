//! Shared test fixtures and utilities for reacher crates.
//!
//! Provides deterministic RNG setup, a ready-made kinematic world, and a
//! scripted world whose part poses are set directly by the test.

pub mod mocks;
pub mod rng;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use mocks::{ScriptedWorld, kinematic_world};
pub use rng::{deterministic_vec, seeded_rng};
