//! Integration test: full episodes against the kinematic world.
//!
//! Checks that:
//! 1. Episodes truncate exactly at `max_episode_steps` and never terminate
//! 2. Identical seeds replay identical rollouts
//! 3. Progress terms telescope to the change in potential over the episode
//! 4. Unseeded resets are reproducible from the run seed

use reacher_core::config::ReacherConfig;
use reacher_core::error::{ReacherError, SimError};
use reacher_core::types::{Action, StepResult};
use reacher_env::prelude::*;
use reacher_sim::KinematicWorld;
use reacher_test_utils::{deterministic_vec, kinematic_world};

fn config(max_steps: u32, seed: u64) -> ReacherConfig {
    let mut config = ReacherConfig::default();
    config.sim.max_episode_steps = max_steps;
    config.sim.seed = seed;
    config
}

fn action(step: u64) -> Action {
    Action::new(deterministic_vec(2, step))
}

fn rollout(env: &mut ReacherEnv<KinematicWorld>, seed: Option<u64>) -> Vec<StepResult> {
    env.reset(seed).unwrap();
    let mut results = Vec::new();
    for step in 0.. {
        let result = env.step(&action(step)).unwrap();
        let done = result.truncated || result.terminated;
        results.push(result);
        if done {
            break;
        }
    }
    results
}

#[test]
fn truncates_at_max_steps() {
    let mut env = ReacherEnv::new(kinematic_world(), config(150, 0)).unwrap();
    let results = rollout(&mut env, Some(1));
    assert_eq!(results.len(), 150);
    assert!(results.iter().all(|r| !r.terminated));
    assert!(results[..149].iter().all(|r| !r.truncated));
    assert!(results[149].truncated);
    assert_eq!(results[149].info.episode_length, 150);
    assert!(env.episode().is_done());
}

#[test]
fn step_after_truncation_fails() {
    let mut env = ReacherEnv::new(kinematic_world(), config(3, 0)).unwrap();
    rollout(&mut env, Some(2));
    let err = env.step(&Action::zeros(2)).unwrap_err();
    assert!(matches!(err, ReacherError::Simulation(SimError::StepFailed(_))));
}

#[test]
fn same_seed_same_rollout() {
    let mut a = ReacherEnv::new(kinematic_world(), config(40, 0)).unwrap();
    let mut b = ReacherEnv::new(kinematic_world(), config(40, 0)).unwrap();
    let ra = rollout(&mut a, Some(123));
    let rb = rollout(&mut b, Some(123));
    for (x, y) in ra.iter().zip(rb.iter()) {
        assert_eq!(x.observation, y.observation);
        assert_eq!(x.reward.to_bits(), y.reward.to_bits());
    }
}

#[test]
fn different_seeds_differ() {
    let mut env = ReacherEnv::new(kinematic_world(), config(5, 0)).unwrap();
    let first = env.reset(Some(1)).unwrap().observation;
    let second = env.reset(Some(2)).unwrap().observation;
    assert_ne!(first, second);
}

#[test]
fn progress_telescopes_to_potential_change() {
    let mut env = ReacherEnv::new(kinematic_world(), config(60, 0)).unwrap();
    env.reset(Some(8)).unwrap();
    let start = env.potential();
    let mut progress = 0.0_f64;
    for step in 0..60 {
        let result = env.step(&action(step)).unwrap();
        progress += f64::from(result.info.custom["progress"]);
    }
    assert!((progress - (env.potential() - start)).abs() < 1e-4);
}

#[test]
fn episode_return_matches_reward_sum() {
    let mut env = ReacherEnv::new(kinematic_world(), config(25, 0)).unwrap();
    let results = rollout(&mut env, Some(4));
    let sum: f32 = results.iter().map(|r| r.reward).sum();
    let last = results.last().unwrap();
    assert!((last.info.episode_reward - sum).abs() < 1e-4);
    assert!((env.episode().total_reward - sum).abs() < 1e-4);
}

#[test]
fn unseeded_resets_replay_from_run_seed() {
    let mut a = ReacherEnv::new(kinematic_world(), config(5, 77)).unwrap();
    let mut b = ReacherEnv::new(kinematic_world(), config(5, 77)).unwrap();
    for _ in 0..4 {
        let ra = a.reset(None).unwrap();
        let rb = b.reset(None).unwrap();
        assert_eq!(ra.info.seed, rb.info.seed);
        assert_eq!(ra.observation, rb.observation);
    }
}

#[test]
fn unseeded_resets_vary_between_episodes() {
    let mut env = ReacherEnv::new(kinematic_world(), config(5, 77)).unwrap();
    let seeds: Vec<_> = (0..4).map(|_| env.reset(None).unwrap().info.seed).collect();
    for (i, s) in seeds.iter().enumerate() {
        assert!(seeds[i + 1..].iter().all(|other| other != s));
    }
}

#[test]
fn stats_over_several_episodes() {
    let mut env = ReacherEnv::new(kinematic_world(), config(10, 3)).unwrap();
    let mut stats = EpisodeStats::new();
    for _ in 0..3 {
        rollout(&mut env, None);
        assert!(stats.record(env.episode()));
    }
    assert_eq!(stats.episodes_completed, 3);
    assert_eq!(stats.total_steps, 30);
    assert!((stats.mean_episode_length().unwrap() - 10.0).abs() < f32::EPSILON);
}

#[test]
fn observation_serializes() {
    let mut env = ReacherEnv::new(kinematic_world(), config(5, 0)).unwrap();
    let reset = env.reset(Some(1)).unwrap();
    let json = serde_json::to_string(&reset.observation).unwrap();
    let back: reacher_core::types::Observation = serde_json::from_str(&json).unwrap();
    assert_eq!(back, reset.observation);
}
