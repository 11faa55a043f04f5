use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_control_dt() -> f64 {
    0.0165
}
const fn default_max_episode_steps() -> u32 {
    150
}
const fn default_electricity_cost() -> f64 {
    -0.10
}
const fn default_stall_torque_cost() -> f64 {
    -0.01
}
const fn default_stuck_joint_cost() -> f64 {
    -0.1
}
const fn default_joint_inertia() -> f64 {
    0.01
}

// ---------------------------------------------------------------------------
// SimConfig
// ---------------------------------------------------------------------------

/// Episode timing and seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Control timestep in seconds (default: 0.0165, one physics frame per action).
    #[serde(default = "default_control_dt")]
    pub control_dt: f64,

    /// Maximum steps per episode before truncation (default: 150).
    #[serde(default = "default_max_episode_steps")]
    pub max_episode_steps: u32,

    /// Master random seed.
    #[serde(default)]
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            control_dt: default_control_dt(),
            max_episode_steps: default_max_episode_steps(),
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.control_dt.is_nan() || self.control_dt <= 0.0 {
            return Err(ConfigError::InvalidControlDt(self.control_dt));
        }
        if self.max_episode_steps == 0 {
            return Err(ConfigError::ZeroEpisodeSteps);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// RewardConfig
// ---------------------------------------------------------------------------

/// Weights of the shaping terms added to the potential progress each step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Weight on `|a0 * theta_dot| + |a1 * gamma_dot|`.
    #[serde(default = "default_electricity_cost")]
    pub electricity_cost: f64,

    /// Weight on `|a0| + |a1|`.
    #[serde(default = "default_stall_torque_cost")]
    pub stall_torque_cost: f64,

    /// Penalty while the elbow sits at its normalized limit.
    #[serde(default = "default_stuck_joint_cost")]
    pub stuck_joint_cost: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            electricity_cost: default_electricity_cost(),
            stall_torque_cost: default_stall_torque_cost(),
            stuck_joint_cost: default_stuck_joint_cost(),
        }
    }
}

impl RewardConfig {
    /// Cost weights must be finite and non-positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weights = [
            ("electricity_cost", self.electricity_cost),
            ("stall_torque_cost", self.stall_torque_cost),
            ("stuck_joint_cost", self.stuck_joint_cost),
        ];
        for (field, value) in weights {
            if !value.is_finite() || value > 0.0 {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    message: format!("must be finite and <= 0, got {value}"),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// WorldConfig
// ---------------------------------------------------------------------------

/// Parameters of the kinematic stand-in world.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Rotational inertia used to turn joint torque into acceleration.
    #[serde(default = "default_joint_inertia")]
    pub joint_inertia: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            joint_inertia: default_joint_inertia(),
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.joint_inertia.is_finite() || self.joint_inertia <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "joint_inertia".into(),
                message: format!("must be positive, got {}", self.joint_inertia),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ReacherConfig
// ---------------------------------------------------------------------------

/// Top-level configuration, one table per concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReacherConfig {
    #[serde(default)]
    pub sim: SimConfig,
    #[serde(default)]
    pub reward: RewardConfig,
    #[serde(default)]
    pub world: WorldConfig,
}

impl ReacherConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sim.validate()?;
        self.reward.validate()?;
        self.world.validate()
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let config = ReacherConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sim.max_episode_steps, 150);
        assert!((config.sim.control_dt - 0.0165).abs() < f64::EPSILON);
        assert!((config.reward.electricity_cost + 0.10).abs() < f64::EPSILON);
        assert!((config.reward.stall_torque_cost + 0.01).abs() < f64::EPSILON);
        assert!((config.reward.stuck_joint_cost + 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_document_is_all_defaults() {
        let config = ReacherConfig::from_toml_str("").unwrap();
        assert_eq!(config, ReacherConfig::default());
    }

    #[test]
    fn partial_document_fills_defaults() {
        let config = ReacherConfig::from_toml_str(
            r"
            [sim]
            seed = 7
            max_episode_steps = 50

            [world]
            joint_inertia = 0.5
            ",
        )
        .unwrap();
        assert_eq!(config.sim.seed, 7);
        assert_eq!(config.sim.max_episode_steps, 50);
        assert!((config.sim.control_dt - 0.0165).abs() < f64::EPSILON);
        assert!((config.world.joint_inertia - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.reward, RewardConfig::default());
    }

    #[test]
    fn rejects_non_positive_control_dt() {
        let err = ReacherConfig::from_toml_str("[sim]\ncontrol_dt = 0.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidControlDt(_)));
    }

    #[test]
    fn rejects_zero_episode_steps() {
        let err = ReacherConfig::from_toml_str("[sim]\nmax_episode_steps = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroEpisodeSteps));
    }

    #[test]
    fn rejects_positive_cost_weight() {
        let err = ReacherConfig::from_toml_str("[reward]\nstuck_joint_cost = 0.5\n").unwrap_err();
        match err {
            ConfigError::InvalidValue { field, .. } => assert_eq!(field, "stuck_joint_cost"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_non_positive_inertia() {
        let err = ReacherConfig::from_toml_str("[world]\njoint_inertia = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = ReacherConfig::from_toml_str("[sim\nseed = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn from_file_missing_path_is_io_error() {
        let err = ReacherConfig::from_file("/nonexistent/reacher.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = ReacherConfig::default();
        config.sim.seed = 99;
        let text = toml::to_string(&config).unwrap();
        let parsed = ReacherConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
