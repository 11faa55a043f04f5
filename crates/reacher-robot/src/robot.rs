//! The reacher policy adapter.

use nalgebra::Vector3;
use reacher_core::error::SimError;
use reacher_core::traits::{JointHandle, PartHandle, RandomSource, RobotWorld};
use tracing::{debug, trace};

use crate::goal::{GOAL_POSITIONS, GoalQuadrant};

/// Number of actuated joints.
pub const ACTION_DIM: usize = 2;

/// Length of the observation vector.
pub const OBS_DIM: usize = 9;

/// Torque per unit of clipped action.
pub const TORQUE_SCALE: f64 = 0.05;

/// Half-width of the range arm joints are drawn from on reset.
#[allow(clippy::approx_constant)]
pub const POSE_LIMIT: f64 = 3.14;

/// Potential per metre of fingertip-to-target distance.
pub const POTENTIAL_SCALE: f64 = 100.0;

/// Observation vector:
/// `[target_x, target_y, dx, dy, cos(theta), sin(theta), theta_dot, gamma, gamma_dot]`.
pub type State = [f64; OBS_DIM];

// ---------------------------------------------------------------------------
// RobotDescriptor
// ---------------------------------------------------------------------------

/// What the engine needs to load the model this adapter drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RobotDescriptor {
    pub model_file: &'static str,
    pub root_part: &'static str,
    pub action_dim: usize,
    pub obs_dim: usize,
    /// Whether parts may collide with the robot's own body.
    pub parent_collision: bool,
}

const DESCRIPTOR: RobotDescriptor = RobotDescriptor {
    model_file: "reacher.xml",
    root_part: "body0",
    action_dim: ACTION_DIM,
    obs_dim: OBS_DIM,
    parent_collision: false,
};

// ---------------------------------------------------------------------------
// TargetDelta
// ---------------------------------------------------------------------------

/// Per-step values derived alongside an observation.
///
/// Returned by [`ReacherSequentialConstrained::calc_state`] and consumed by
/// [`ReacherSequentialConstrained::calc_potential`] and the reward terms of
/// the episode driver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetDelta {
    /// Fingertip minus target, world frame.
    pub to_target_vec: Vector3<f64>,
    pub theta: f64,
    pub theta_dot: f64,
    pub gamma: f64,
    pub gamma_dot: f64,
}

impl TargetDelta {
    /// Planar fingertip-to-target distance.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.to_target_vec.xy().norm()
    }
}

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Handles {
    fingertip: PartHandle,
    target: PartHandle,
    central_joint: JointHandle,
    elbow_joint: JointHandle,
    target_x: JointHandle,
    target_y: JointHandle,
}

impl Handles {
    fn resolve<W: RobotWorld + ?Sized>(world: &W) -> Result<Self, SimError> {
        Ok(Self {
            fingertip: world.part("fingertip")?,
            target: world.part("target")?,
            central_joint: world.joint("joint0")?,
            elbow_joint: world.joint("joint1")?,
            target_x: world.joint("target_x")?,
            target_y: world.joint("target_y")?,
        })
    }
}

// ---------------------------------------------------------------------------
// ReacherSequentialConstrained
// ---------------------------------------------------------------------------

/// Reacher whose arm is spawned in the target's quadrant.
///
/// Lifecycle, driven externally:
///
/// ```text
/// reset ──► { apply_action ──► (world step) ──► calc_state ──► calc_potential }*
/// ```
#[derive(Debug, Clone)]
pub struct ReacherSequentialConstrained {
    handles: Handles,
    goal: Option<GoalQuadrant>,
    last_delta: Option<TargetDelta>,
}

impl ReacherSequentialConstrained {
    /// Bind to a loaded reacher model.
    ///
    /// # Errors
    ///
    /// [`SimError::EntityNotFound`] if the world lacks any of the parts
    /// `fingertip`, `target` or the joints `joint0`, `joint1`, `target_x`,
    /// `target_y`.
    pub fn new<W: RobotWorld + ?Sized>(world: &W) -> Result<Self, SimError> {
        Ok(Self {
            handles: Handles::resolve(world)?,
            goal: None,
            last_delta: None,
        })
    }

    #[must_use]
    pub const fn descriptor() -> RobotDescriptor {
        DESCRIPTOR
    }

    /// Goal chosen by the last reset.
    #[must_use]
    pub const fn goal(&self) -> Option<GoalQuadrant> {
        self.goal
    }

    /// Start an episode.
    ///
    /// Picks a goal quadrant, places the target on it, then draws arm poses
    /// until the fingertip lies in the target's quadrant. The redraw loop has
    /// no cap.
    ///
    /// # Errors
    ///
    /// [`SimError::EntityNotFound`] if the model's registry no longer holds
    /// the reacher's parts and joints. [`SimError::ResetFailed`] if the random
    /// source returns a goal index outside `0..4`.
    pub fn reset<W, R>(&mut self, world: &mut W, rng: &mut R) -> Result<GoalQuadrant, SimError>
    where
        W: RobotWorld + ?Sized,
        R: RandomSource + ?Sized,
    {
        let index = rng.uniform_int(0, GOAL_POSITIONS.len());
        let goal = GoalQuadrant::from_index(index)
            .ok_or_else(|| SimError::ResetFailed(format!("goal index {index} out of range")))?;
        let [goal_x, goal_y] = goal.position();

        self.handles = Handles::resolve(world)?;
        let h = self.handles;
        world.reset_current_position(h.target_x, goal_x, 0.0);
        world.reset_current_position(h.target_y, goal_y, 0.0);

        let mut draws: u64 = 0;
        loop {
            draws += 1;
            world.reset_current_position(
                h.central_joint,
                rng.uniform_float(-POSE_LIMIT, POSE_LIMIT),
                0.0,
            );
            world.reset_current_position(
                h.elbow_joint,
                rng.uniform_float(-POSE_LIMIT, POSE_LIMIT),
                0.0,
            );
            if !self.crosses_quadrant(world) {
                break;
            }
        }

        debug!(?goal, draws, "reacher reset");
        self.goal = Some(goal);
        self.last_delta = None;
        Ok(goal)
    }

    /// True when fingertip and target lie on opposite sides of any axis.
    fn crosses_quadrant<W: RobotWorld + ?Sized>(&self, world: &W) -> bool {
        let product = world
            .part_xyz(self.handles.fingertip)
            .component_mul(&world.part_xyz(self.handles.target));
        product.iter().any(|&c| c < 0.0)
    }

    /// Command joint torques from a policy action.
    ///
    /// Each component is clipped to `[-1, 1]` and scaled by
    /// [`TORQUE_SCALE`]; `action[0]` drives the central joint and
    /// `action[1]` the elbow.
    ///
    /// # Panics
    ///
    /// If `action` does not have [`ACTION_DIM`] elements or any element is
    /// not finite. Nothing is written to the world in that case.
    pub fn apply_action<W: RobotWorld + ?Sized>(&self, world: &mut W, action: &[f64]) {
        assert_eq!(
            action.len(),
            ACTION_DIM,
            "reacher action must have {ACTION_DIM} elements"
        );
        assert!(
            action.iter().all(|a| a.is_finite()),
            "reacher action must be finite, got {action:?}"
        );

        let central = TORQUE_SCALE * action[0].clamp(-1.0, 1.0);
        let elbow = TORQUE_SCALE * action[1].clamp(-1.0, 1.0);
        world.set_motor_torque(self.handles.central_joint, central);
        world.set_motor_torque(self.handles.elbow_joint, elbow);
        trace!(central, elbow, "reacher torques");
    }

    /// Read the observation and the values derived with it.
    ///
    /// Reads only; calling twice without a world step yields the same
    /// result. The returned [`TargetDelta`] is also kept for
    /// [`potential`](Self::potential).
    pub fn calc_state<W: RobotWorld + ?Sized>(&mut self, world: &W) -> (State, TargetDelta) {
        let h = self.handles;
        let (theta, theta_dot) = world.current_relative_position(h.central_joint);
        let (gamma, gamma_dot) = world.current_relative_position(h.elbow_joint);
        let (target_x, _) = world.current_position(h.target_x);
        let (target_y, _) = world.current_position(h.target_y);
        let to_target_vec = world.part_xyz(h.fingertip) - world.part_xyz(h.target);

        let state = [
            target_x,
            target_y,
            to_target_vec.x,
            to_target_vec.y,
            theta.cos(),
            theta.sin(),
            theta_dot,
            gamma,
            gamma_dot,
        ];
        let delta = TargetDelta {
            to_target_vec,
            theta,
            theta_dot,
            gamma,
            gamma_dot,
        };
        self.last_delta = Some(delta);
        (state, delta)
    }

    /// Shaping potential: `-100` times the planar distance to the target.
    #[must_use]
    pub fn calc_potential(delta: &TargetDelta) -> f64 {
        -POTENTIAL_SCALE * delta.distance()
    }

    /// Potential of the most recent [`calc_state`](Self::calc_state) this
    /// episode, `None` before the first one.
    #[must_use]
    pub fn potential(&self) -> Option<f64> {
        self.last_delta.as_ref().map(Self::calc_potential)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
