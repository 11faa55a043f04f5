//! Gymnasium-style driver for one reacher in one world.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use reacher_core::config::ReacherConfig;
use reacher_core::error::{ReacherError, SimError};
use reacher_core::seed::SeedHierarchy;
use reacher_core::traits::RobotWorld;
use reacher_core::types::{
    Action, ActionSpace, Observation, ObservationSpace, ResetInfo, ResetResult, StepInfo,
    StepResult,
};
use reacher_robot::{ACTION_DIM, OBS_DIM, ReacherSequentialConstrained};

use crate::episode::Episode;
use crate::reward::RewardTerms;

// ---------------------------------------------------------------------------
// ReacherEnv
// ---------------------------------------------------------------------------

/// Episode driver owning the world and the robot adapter.
///
/// Each [`step`](Self::step) runs, in order: action validation,
/// `apply_action`, one world step of `control_dt`, `calc_state`, and the
/// reward terms computed from the potential before and after.
///
/// # Example
///
/// ```
/// use reacher_core::config::ReacherConfig;
/// use reacher_core::types::Action;
/// use reacher_env::env::ReacherEnv;
/// use reacher_sim::KinematicWorld;
///
/// let mut env = ReacherEnv::new(KinematicWorld::default(), ReacherConfig::default()).unwrap();
/// let reset = env.reset(Some(7)).unwrap();
/// assert_eq!(reset.observation.len(), 9);
/// let step = env.step(&Action::new(vec![0.5, -0.5])).unwrap();
/// assert!(!step.terminated);
/// ```
pub struct ReacherEnv<W> {
    world: W,
    robot: ReacherSequentialConstrained,
    config: ReacherConfig,
    seeds: SeedHierarchy,
    episode: Episode,
    potential: f64,
    obs_space: ObservationSpace,
    act_space: ActionSpace,
}

impl<W: RobotWorld> ReacherEnv<W> {
    /// Bind a robot to `world`.
    ///
    /// # Errors
    ///
    /// [`ReacherError::Config`] if `config` does not validate,
    /// [`ReacherError::Simulation`] if the world lacks a reacher part or joint.
    pub fn new(world: W, config: ReacherConfig) -> Result<Self, ReacherError> {
        config.validate()?;
        let robot = ReacherSequentialConstrained::new(&world)?;
        let seeds = SeedHierarchy::new(config.sim.seed);
        Ok(Self {
            world,
            robot,
            seeds,
            config,
            episode: Episode::default(),
            potential: 0.0,
            obs_space: ObservationSpace::uniform(OBS_DIM, f32::NEG_INFINITY, f32::INFINITY),
            act_space: ActionSpace::uniform(ACTION_DIM, -1.0, 1.0),
        })
    }

    #[must_use]
    pub const fn observation_space(&self) -> &ObservationSpace {
        &self.obs_space
    }

    #[must_use]
    pub const fn action_space(&self) -> &ActionSpace {
        &self.act_space
    }

    /// Start a new episode.
    ///
    /// With `seed`, the episode's random draws come from that seed. Without,
    /// the seed is derived from the run seed and the episode number, so a run
    /// of unseeded resets replays from the config alone.
    ///
    /// # Errors
    ///
    /// Propagates [`SimError`] from the adapter's reset.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<ResetResult, ReacherError> {
        let episode_seed =
            seed.unwrap_or_else(|| self.seeds.episode_seed(self.episode.episode_number));
        let mut rng = ChaCha8Rng::seed_from_u64(episode_seed);

        let goal = self.robot.reset(&mut self.world, &mut rng)?;
        let (state, delta) = self.robot.calc_state(&self.world);
        self.potential = ReacherSequentialConstrained::calc_potential(&delta);
        self.episode.reset(Some(episode_seed));
        debug!(
            episode = self.episode.episode_number,
            seed = episode_seed,
            ?goal,
            potential = self.potential,
            "episode reset"
        );

        let mut info = ResetInfo {
            seed: Some(episode_seed),
            ..Default::default()
        };
        #[allow(clippy::cast_precision_loss)]
        info.custom.insert("goal_index".into(), goal.index() as f32);
        #[allow(clippy::cast_possible_truncation)]
        info.custom.insert("potential".into(), self.potential as f32);

        Ok(ResetResult {
            observation: Observation::from_f64(&state),
            info,
        })
    }

    /// Advance one control step.
    ///
    /// # Errors
    ///
    /// [`ReacherError::Validation`] if `action` has the wrong length or a
    /// non-finite value; nothing reaches the world in that case.
    /// [`SimError::StepFailed`] if no episode is running.
    #[allow(clippy::cast_possible_truncation)]
    pub fn step(&mut self, action: &Action) -> Result<StepResult, ReacherError> {
        if !self.episode.is_running() {
            return Err(SimError::StepFailed(format!(
                "episode is {:?}; call reset first",
                self.episode.state
            ))
            .into());
        }
        action.validate(ACTION_DIM)?;
        let wide = action.to_f64();
        let action: [f64; ACTION_DIM] = [wide[0], wide[1]];

        self.robot.apply_action(&mut self.world, &action);
        self.world.step(self.config.sim.control_dt);
        let (state, delta) = self.robot.calc_state(&self.world);

        let potential_old = self.potential;
        self.potential = ReacherSequentialConstrained::calc_potential(&delta);
        let terms = RewardTerms::compute(
            &self.config.reward,
            potential_old,
            self.potential,
            &action,
            &delta,
        );
        let reward = terms.total() as f32;

        self.episode.advance(reward);
        let truncated = self
            .episode
            .check_truncation(self.config.sim.max_episode_steps);
        if truncated {
            info!(
                episode = self.episode.episode_number,
                steps = self.episode.step_count,
                episode_return = self.episode.total_reward,
                distance = delta.distance(),
                "episode truncated"
            );
        }

        Ok(StepResult {
            observation: Observation::from_f64(&state),
            reward,
            terminated: false,
            truncated,
            info: StepInfo {
                episode_length: self.episode.step_count,
                episode_reward: self.episode.total_reward,
                custom: terms
                    .breakdown()
                    .iter()
                    .map(|&(name, value)| (name.to_string(), value as f32))
                    .collect(),
            },
        })
    }

    /// Potential after the last reset or step.
    #[must_use]
    pub const fn potential(&self) -> f64 {
        self.potential
    }

    #[must_use]
    pub const fn episode(&self) -> &Episode {
        &self.episode
    }

    #[must_use]
    pub const fn robot(&self) -> &ReacherSequentialConstrained {
        &self.robot
    }

    #[must_use]
    pub const fn config(&self) -> &ReacherConfig {
        &self.config
    }

    #[must_use]
    pub const fn world(&self) -> &W {
        &self.world
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use reacher_core::error::ValidationError;
    use reacher_test_utils::{ScriptedWorld, kinematic_world};

    fn env() -> ReacherEnv<reacher_sim::KinematicWorld> {
        ReacherEnv::new(kinematic_world(), ReacherConfig::default()).unwrap()
    }

    #[test]
    fn spaces() {
        let env = env();
        assert_eq!(env.observation_space().dim(), 9);
        assert_eq!(env.action_space().dim(), 2);
        assert!(env.action_space().contains(&[1.0, -1.0]));
        assert!(!env.action_space().contains(&[1.5, 0.0]));
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut config = ReacherConfig::default();
        config.sim.control_dt = -1.0;
        let err = ReacherEnv::new(kinematic_world(), config).err().unwrap();
        assert!(matches!(err, ReacherError::Config(_)));
    }

    #[test]
    fn new_rejects_world_without_reacher() {
        let err = ReacherEnv::new(ScriptedWorld::empty(), ReacherConfig::default())
            .err()
            .unwrap();
        assert!(matches!(err, ReacherError::Simulation(SimError::EntityNotFound(_))));
    }

    #[test]
    fn step_before_reset_fails() {
        let mut env = env();
        let err = env.step(&Action::zeros(2)).unwrap_err();
        assert!(matches!(err, ReacherError::Simulation(SimError::StepFailed(_))));
    }

    #[test]
    fn reset_reports_seed_goal_and_potential() {
        let mut env = env();
        let reset = env.reset(Some(12)).unwrap();
        assert_eq!(reset.info.seed, Some(12));
        let goal = env.robot().goal().unwrap();
        #[allow(clippy::cast_precision_loss)]
        let expected = goal.index() as f32;
        assert!((reset.info.custom["goal_index"] - expected).abs() < f32::EPSILON);
        assert!(env.potential() <= 0.0);
        assert!(env.episode().is_running());
    }

    #[test]
    fn reset_observation_carries_goal() {
        let mut env = env();
        let reset = env.reset(Some(3)).unwrap();
        let [gx, gy] = env.robot().goal().unwrap().position();
        #[allow(clippy::cast_possible_truncation)]
        let (gx, gy) = (gx as f32, gy as f32);
        assert!((reset.observation[0] - gx).abs() < f32::EPSILON);
        assert!((reset.observation[1] - gy).abs() < f32::EPSILON);
    }

    #[test]
    fn nan_action_is_rejected_before_the_world() {
        let mut env = env();
        env.reset(Some(1)).unwrap();
        let err = env.step(&Action::new(vec![f32::NAN, 0.0])).unwrap_err();
        assert!(matches!(
            err,
            ReacherError::Validation(ValidationError::ActionContainsNan)
        ));
        assert_eq!(env.world().steps(), 0);
        assert_eq!(env.episode().step_count, 0);
    }

    #[test]
    fn infinite_action_is_rejected_before_the_world() {
        let mut env = env();
        env.reset(Some(1)).unwrap();
        let err = env
            .step(&Action::new(vec![0.0, f32::INFINITY]))
            .unwrap_err();
        assert!(matches!(
            err,
            ReacherError::Validation(ValidationError::ActionContainsInf)
        ));
        assert_eq!(env.world().steps(), 0);
        assert_eq!(env.episode().step_count, 0);
        let central = env.world().joint("joint0").unwrap();
        assert!(env.world().motor_torque(central).abs() < f64::EPSILON);
    }

    #[test]
    fn wrong_action_length_is_rejected() {
        let mut env = env();
        env.reset(Some(1)).unwrap();
        let err = env.step(&Action::zeros(3)).unwrap_err();
        assert!(matches!(
            err,
            ReacherError::Validation(ValidationError::ActionDimMismatch { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn step_reward_is_sum_of_terms() {
        let mut env = env();
        env.reset(Some(5)).unwrap();
        let result = env.step(&Action::new(vec![0.8, -0.3])).unwrap();
        let sum: f32 = result.info.custom.values().sum();
        assert_eq!(result.info.custom.len(), 3);
        assert!((result.reward - sum).abs() < 1e-5);
        assert!(result.info.custom["electricity"] <= 0.0);
        assert_eq!(result.info.episode_length, 1);
    }

    #[test]
    fn step_issues_scaled_torque() {
        let mut env = env();
        env.reset(Some(5)).unwrap();
        env.step(&Action::new(vec![2.0, -2.0])).unwrap();
        let world = env.world();
        let central = world.joint("joint0").unwrap();
        let elbow = world.joint("joint1").unwrap();
        assert!((world.motor_torque(central) - 0.05).abs() < 1e-12);
        assert!((world.motor_torque(elbow) + 0.05).abs() < 1e-12);
    }

    #[test]
    fn zero_action_keeps_potential() {
        let mut env = env();
        env.reset(Some(9)).unwrap();
        let before = env.potential();
        let result = env.step(&Action::zeros(2)).unwrap();
        assert!((env.potential() - before).abs() < 1e-12);
        assert!(result.reward.abs() < 1e-6 || result.info.custom["stuck_joint"] < 0.0);
    }
}
