//! Two-joint planar reacher whose target sits in one of four fixed quadrants.
//!
//! [`ReacherSequentialConstrained`] is the glue between a [`RobotWorld`]
//! (the physics engine's view of the loaded `reacher.xml` model) and an
//! episode driver. It owns no physics state: every call reads or writes the
//! world it is handed.
//!
//! [`RobotWorld`]: reacher_core::traits::RobotWorld

pub mod goal;
pub mod robot;

pub use goal::{GOAL_POSITIONS, GoalQuadrant, TARG_LIMIT};
pub use robot::{
    ACTION_DIM, OBS_DIM, ReacherSequentialConstrained, RobotDescriptor, State, TargetDelta,
};
