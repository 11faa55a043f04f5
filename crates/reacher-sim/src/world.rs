//! [`KinematicWorld`]: the reacher model as a [`RobotWorld`].

use nalgebra::Vector3;
use reacher_core::config::WorldConfig;
use reacher_core::error::SimError;
use reacher_core::traits::{JointHandle, PartHandle, RobotWorld};
use tracing::trace;

use crate::geometry::{PLANE_HEIGHT, elbow_position, fingertip_position};

// ---------------------------------------------------------------------------
// Model layout
// ---------------------------------------------------------------------------

const CENTRAL: usize = 0;
const ELBOW: usize = 1;
const TARGET_X: usize = 2;
const TARGET_Y: usize = 3;

const BODY0: usize = 0;
const BODY1: usize = 1;
const FINGERTIP: usize = 2;
const TARGET: usize = 3;

const PART_NAMES: [&str; 4] = ["body0", "body1", "fingertip", "target"];

/// Velocity scale of the normalized joint convention.
const RELATIVE_VELOCITY_SCALE: f64 = 0.1;

#[derive(Debug, Clone, Copy)]
struct JointSpec {
    name: &'static str,
    limits: Option<(f64, f64)>,
}

const JOINTS: [JointSpec; 4] = [
    JointSpec {
        name: "joint0",
        limits: None,
    },
    JointSpec {
        name: "joint1",
        limits: Some((-3.0, 3.0)),
    },
    JointSpec {
        name: "target_x",
        limits: Some((-0.27, 0.27)),
    },
    JointSpec {
        name: "target_y",
        limits: Some((-0.27, 0.27)),
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct JointState {
    position: f64,
    velocity: f64,
    torque: f64,
}

// ---------------------------------------------------------------------------
// KinematicWorld
// ---------------------------------------------------------------------------

/// Planar two-link reacher with a slider-mounted target.
///
/// Joint writes are teleports and part poses are recomputed on every query,
/// so the reset rejection loop sees each new pose immediately. [`step`]
/// integrates each joint independently:
///
/// ```text
/// velocity += torque * dt / inertia
/// position += velocity * dt
/// ```
///
/// Limited joints are clamped to their range with velocity zeroed on
/// contact. Motor torques persist until overwritten.
///
/// [`step`]: RobotWorld::step
#[derive(Debug, Clone)]
pub struct KinematicWorld {
    joints: [JointState; 4],
    inertia: f64,
    elapsed: f64,
    steps: u64,
}

impl KinematicWorld {
    #[must_use]
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            joints: [JointState::default(); 4],
            inertia: config.joint_inertia,
            elapsed: 0.0,
            steps: 0,
        }
    }

    /// Last torque commanded on `joint`.
    #[must_use]
    pub fn motor_torque(&self, joint: JointHandle) -> f64 {
        self.joints[joint.0].torque
    }

    /// Simulated time since construction.
    #[must_use]
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of completed [`RobotWorld::step`] calls.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    fn target_position(&self) -> Vector3<f64> {
        Vector3::new(
            self.joints[TARGET_X].position,
            self.joints[TARGET_Y].position,
            PLANE_HEIGHT,
        )
    }
}

impl Default for KinematicWorld {
    fn default() -> Self {
        Self::new(&WorldConfig::default())
    }
}

impl RobotWorld for KinematicWorld {
    fn joint(&self, name: &str) -> Result<JointHandle, SimError> {
        JOINTS
            .iter()
            .position(|spec| spec.name == name)
            .map(JointHandle)
            .ok_or_else(|| SimError::EntityNotFound(name.to_string()))
    }

    fn part(&self, name: &str) -> Result<PartHandle, SimError> {
        PART_NAMES
            .iter()
            .position(|&part| part == name)
            .map(PartHandle)
            .ok_or_else(|| SimError::EntityNotFound(name.to_string()))
    }

    fn reset_current_position(&mut self, joint: JointHandle, position: f64, velocity: f64) {
        let state = &mut self.joints[joint.0];
        state.position = position;
        state.velocity = velocity;
    }

    fn current_position(&self, joint: JointHandle) -> (f64, f64) {
        let state = self.joints[joint.0];
        (state.position, state.velocity)
    }

    fn current_relative_position(&self, joint: JointHandle) -> (f64, f64) {
        let state = self.joints[joint.0];
        let velocity = RELATIVE_VELOCITY_SCALE * state.velocity;
        match JOINTS[joint.0].limits {
            Some((lower, upper)) => {
                let mid = 0.5 * (lower + upper);
                (2.0 * (state.position - mid) / (upper - lower), velocity)
            }
            None => (state.position, velocity),
        }
    }

    fn set_motor_torque(&mut self, joint: JointHandle, torque: f64) {
        self.joints[joint.0].torque = torque;
    }

    fn part_xyz(&self, part: PartHandle) -> Vector3<f64> {
        let theta = self.joints[CENTRAL].position;
        let gamma = self.joints[ELBOW].position;
        match part.0 {
            BODY0 => Vector3::new(0.0, 0.0, PLANE_HEIGHT),
            BODY1 => elbow_position(theta),
            FINGERTIP => fingertip_position(theta, gamma),
            TARGET => self.target_position(),
            other => unreachable!("part handle {other} was not issued by this world"),
        }
    }

    fn step(&mut self, dt: f64) {
        for (state, spec) in self.joints.iter_mut().zip(JOINTS.iter()) {
            state.velocity += state.torque * dt / self.inertia;
            state.position += state.velocity * dt;
            if let Some((lower, upper)) = spec.limits {
                if state.position < lower || state.position > upper {
                    state.position = state.position.clamp(lower, upper);
                    state.velocity = 0.0;
                }
            }
        }
        self.elapsed += dt;
        self.steps += 1;
        trace!(
            step = self.steps,
            theta = self.joints[CENTRAL].position,
            gamma = self.joints[ELBOW].position,
            "kinematic step"
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
