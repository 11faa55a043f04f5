//! World implementations for tests.

use std::collections::HashMap;

use nalgebra::Vector3;
use reacher_core::config::WorldConfig;
use reacher_core::error::SimError;
use reacher_core::traits::{JointHandle, PartHandle, RobotWorld};
use reacher_sim::KinematicWorld;

/// Kinematic world with default parameters.
pub fn kinematic_world() -> KinematicWorld {
    KinematicWorld::new(&WorldConfig::default())
}

// ---------------------------------------------------------------------------
// ScriptedWorld
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default)]
struct ScriptedJoint {
    position: f64,
    velocity: f64,
    relative: Option<(f64, f64)>,
    torque: Option<f64>,
}

/// World whose part poses and joint readings are set by the test.
///
/// Part positions do not depend on joint positions, and `step` only counts.
/// Relative joint readings default to the raw ones unless overridden with
/// [`set_relative`](Self::set_relative).
#[derive(Debug, Clone, Default)]
pub struct ScriptedWorld {
    joint_names: Vec<String>,
    part_names: Vec<String>,
    joints: Vec<ScriptedJoint>,
    parts: Vec<Vector3<f64>>,
    steps: u64,
}

impl ScriptedWorld {
    /// Empty registry: every lookup fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with every joint and part the reacher model declares.
    pub fn reacher() -> Self {
        let mut world = Self::default();
        for joint in ["joint0", "joint1", "target_x", "target_y"] {
            world = world.with_joint(joint);
        }
        for part in ["body0", "body1", "fingertip", "target"] {
            world = world.with_part(part, Vector3::zeros());
        }
        world
    }

    #[must_use]
    pub fn with_joint(mut self, name: &str) -> Self {
        self.joint_names.push(name.to_string());
        self.joints.push(ScriptedJoint::default());
        self
    }

    #[must_use]
    pub fn with_part(mut self, name: &str, xyz: Vector3<f64>) -> Self {
        self.part_names.push(name.to_string());
        self.parts.push(xyz);
        self
    }

    /// Place a part. Panics if the name is not registered.
    pub fn set_part(&mut self, name: &str, xyz: Vector3<f64>) {
        let handle = self.part(name).expect("part registered");
        self.parts[handle.0] = xyz;
    }

    /// Override the normalized reading of a joint.
    pub fn set_relative(&mut self, name: &str, position: f64, velocity: f64) {
        let handle = self.joint(name).expect("joint registered");
        self.joints[handle.0].relative = Some((position, velocity));
    }

    /// Torque commanded on a joint, `None` if never commanded.
    pub fn torque(&self, name: &str) -> Option<f64> {
        let handle = self.joint(name).expect("joint registered");
        self.joints[handle.0].torque
    }

    /// Every commanded torque by joint name.
    pub fn torques(&self) -> HashMap<String, f64> {
        self.joint_names
            .iter()
            .zip(self.joints.iter())
            .filter_map(|(name, joint)| joint.torque.map(|t| (name.clone(), t)))
            .collect()
    }

    pub const fn steps(&self) -> u64 {
        self.steps
    }
}

impl RobotWorld for ScriptedWorld {
    fn joint(&self, name: &str) -> Result<JointHandle, SimError> {
        self.joint_names
            .iter()
            .position(|n| n == name)
            .map(JointHandle)
            .ok_or_else(|| SimError::EntityNotFound(name.to_string()))
    }

    fn part(&self, name: &str) -> Result<PartHandle, SimError> {
        self.part_names
            .iter()
            .position(|n| n == name)
            .map(PartHandle)
            .ok_or_else(|| SimError::EntityNotFound(name.to_string()))
    }

    fn reset_current_position(&mut self, joint: JointHandle, position: f64, velocity: f64) {
        let state = &mut self.joints[joint.0];
        state.position = position;
        state.velocity = velocity;
        state.relative = None;
    }

    fn current_position(&self, joint: JointHandle) -> (f64, f64) {
        let state = self.joints[joint.0];
        (state.position, state.velocity)
    }

    fn current_relative_position(&self, joint: JointHandle) -> (f64, f64) {
        let state = self.joints[joint.0];
        state.relative.unwrap_or((state.position, state.velocity))
    }

    fn set_motor_torque(&mut self, joint: JointHandle, torque: f64) {
        self.joints[joint.0].torque = Some(torque);
    }

    fn part_xyz(&self, part: PartHandle) -> Vector3<f64> {
        self.parts[part.0]
    }

    fn step(&mut self, _dt: f64) {
        self.steps += 1;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
