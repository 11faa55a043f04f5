//! Per-step reward terms.

use reacher_core::config::RewardConfig;
use reacher_robot::{ACTION_DIM, TargetDelta};

/// Distance from the normalized elbow limit under which the joint counts as stuck.
const STUCK_JOINT_BAND: f64 = 0.01;

/// The three terms that sum to a step's reward.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RewardTerms {
    /// Change in potential since the previous observation.
    pub progress: f64,
    /// Control-effort cost, `<= 0`.
    pub electricity: f64,
    /// Elbow-at-limit cost, `<= 0`.
    pub stuck_joint: f64,
}

impl RewardTerms {
    /// Evaluate the terms for one step.
    ///
    /// `action` is the raw policy output, before the adapter clips it.
    pub fn compute(
        config: &RewardConfig,
        potential_old: f64,
        potential: f64,
        action: &[f64; ACTION_DIM],
        delta: &TargetDelta,
    ) -> Self {
        let [a0, a1] = *action;
        let electricity = config.electricity_cost
            * ((a0 * delta.theta_dot).abs() + (a1 * delta.gamma_dot).abs())
            + config.stall_torque_cost * (a0.abs() + a1.abs());
        let stuck_joint = if (delta.gamma.abs() - 1.0).abs() < STUCK_JOINT_BAND {
            config.stuck_joint_cost
        } else {
            0.0
        };
        Self {
            progress: potential - potential_old,
            electricity,
            stuck_joint,
        }
    }

    pub fn total(&self) -> f64 {
        self.progress + self.electricity + self.stuck_joint
    }

    /// `(name, value)` pairs in a fixed order.
    pub fn breakdown(&self) -> [(&'static str, f64); 3] {
        [
            ("progress", self.progress),
            ("electricity", self.electricity),
            ("stuck_joint", self.stuck_joint),
        ]
    }
}
