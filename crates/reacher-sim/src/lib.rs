// reacher-sim: Kinematic stand-in for the physics engine behind the reacher.
//
// `KinematicWorld` reproduces the geometry of the reacher model (two planar
// links, a fingertip, and a target on two slider joints) and integrates joint
// torque per joint. There is no contact, coupling or gravity. It exists so the
// robot adapter and episode driver can run headless and under test.

pub mod geometry;
pub mod world;

pub use geometry::{FINGERTIP_OFFSET, PLANE_HEIGHT, UPPER_LINK_LENGTH, fingertip_position};
pub use world::KinematicWorld;
