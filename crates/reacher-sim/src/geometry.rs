//! Forward kinematics of the planar reacher arm.

use nalgebra::Vector3;

/// Shoulder-to-elbow distance.
pub const UPPER_LINK_LENGTH: f64 = 0.1;

/// Elbow-to-fingertip distance.
pub const FINGERTIP_OFFSET: f64 = 0.11;

/// Height of the arm plane. Fingertip and target both sit on it.
pub const PLANE_HEIGHT: f64 = 0.01;

/// Elbow position for shoulder angle `theta`.
#[must_use]
pub fn elbow_position(theta: f64) -> Vector3<f64> {
    Vector3::new(
        UPPER_LINK_LENGTH * theta.cos(),
        UPPER_LINK_LENGTH * theta.sin(),
        PLANE_HEIGHT,
    )
}

/// Fingertip position for shoulder angle `theta` and elbow angle `gamma`.
///
/// `gamma` is relative to the upper link.
#[must_use]
pub fn fingertip_position(theta: f64, gamma: f64) -> Vector3<f64> {
    let phi = theta + gamma;
    elbow_position(theta)
        + Vector3::new(FINGERTIP_OFFSET * phi.cos(), FINGERTIP_OFFSET * phi.sin(), 0.0)
}
