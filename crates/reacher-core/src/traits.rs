use nalgebra::Vector3;

use crate::error::SimError;

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

/// Opaque handle to a joint in a [`RobotWorld`] registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointHandle(pub usize);

/// Opaque handle to a rigid-body part in a [`RobotWorld`] registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartHandle(pub usize);

// ---------------------------------------------------------------------------
// RobotWorld
// ---------------------------------------------------------------------------

/// Contract a physics engine exposes for one loaded robot model.
///
/// Joints and parts are looked up by their model names once and then
/// addressed by handle. Position writes are teleports: the next pose query
/// must already reflect them, without an intervening [`step`](Self::step).
pub trait RobotWorld {
    /// Resolve a joint by model name.
    fn joint(&self, name: &str) -> Result<JointHandle, SimError>;

    /// Resolve a part by model name.
    fn part(&self, name: &str) -> Result<PartHandle, SimError>;

    /// Teleport a joint to `position` with `velocity`.
    fn reset_current_position(&mut self, joint: JointHandle, position: f64, velocity: f64);

    /// Raw `(position, velocity)` of a joint.
    fn current_position(&self, joint: JointHandle) -> (f64, f64);

    /// `(position, velocity)` in the engine's normalized joint convention.
    fn current_relative_position(&self, joint: JointHandle) -> (f64, f64);

    /// Command a motor torque, applied on the next [`step`](Self::step).
    fn set_motor_torque(&mut self, joint: JointHandle, torque: f64);

    /// World-space position of a part.
    fn part_xyz(&self, part: PartHandle) -> Vector3<f64>;

    /// Advance the world by `dt` seconds.
    fn step(&mut self, dt: f64);
}

// ---------------------------------------------------------------------------
// RandomSource
// ---------------------------------------------------------------------------

/// Seeded random source used for episode resets.
pub trait RandomSource {
    /// Uniform integer in `[low, high)`.
    fn uniform_int(&mut self, low: usize, high: usize) -> usize;

    /// Uniform float in `[low, high)`.
    fn uniform_float(&mut self, low: f64, high: f64) -> f64;
}

impl<R: rand::Rng + ?Sized> RandomSource for R {
    fn uniform_int(&mut self, low: usize, high: usize) -> usize {
        self.gen_range(low..high)
    }

    fn uniform_float(&mut self, low: f64, high: f64) -> f64 {
        self.gen_range(low..high)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
