use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Observation
// ---------------------------------------------------------------------------

/// Flat f32 vector representing environment state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    data: Vec<f32>,
}

impl Observation {
    pub const fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    /// Narrow an `f64` state vector coming from the physics side.
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_f64(values: &[f64]) -> Self {
        Self {
            data: values.iter().map(|&v| v as f32).collect(),
        }
    }

    pub const fn len(&self) -> usize {
        self.data.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

impl std::ops::Index<usize> for Observation {
    type Output = f32;
    fn index(&self, i: usize) -> &f32 {
        &self.data[i]
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// Continuous control command, normalized to [-1, 1] per joint by convention.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    data: Vec<f32>,
}

impl Action {
    pub const fn new(data: Vec<f32>) -> Self {
        Self { data }
    }

    pub fn zeros(len: usize) -> Self {
        Self {
            data: vec![0.0; len],
        }
    }

    pub const fn len(&self) -> usize {
        self.data.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Widen to the `f64` values the physics side consumes.
    pub fn to_f64(&self) -> Vec<f64> {
        self.data.iter().map(|&v| f64::from(v)).collect()
    }

    /// Validate dimension and finiteness.
    pub fn validate(&self, expected_dim: usize) -> Result<(), ValidationError> {
        if self.data.len() != expected_dim {
            return Err(ValidationError::ActionDimMismatch {
                expected: expected_dim,
                got: self.data.len(),
            });
        }
        for val in &self.data {
            if val.is_nan() {
                return Err(ValidationError::ActionContainsNan);
            }
            if val.is_infinite() {
                return Err(ValidationError::ActionContainsInf);
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// BoxSpace
// ---------------------------------------------------------------------------

/// Bounded box of continuous values. Follows Gymnasium conventions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxSpace {
    pub low: Vec<f32>,
    pub high: Vec<f32>,
}

/// Observation space descriptor.
pub type ObservationSpace = BoxSpace;

/// Action space descriptor.
pub type ActionSpace = BoxSpace;

impl BoxSpace {
    /// Space of `dim` values, each in `[low, high]`.
    pub fn uniform(dim: usize, low: f32, high: f32) -> Self {
        Self {
            low: vec![low; dim],
            high: vec![high; dim],
        }
    }

    pub fn dim(&self) -> usize {
        self.low.len()
    }

    pub fn contains(&self, values: &[f32]) -> bool {
        values.len() == self.low.len()
            && values
                .iter()
                .zip(self.low.iter().zip(self.high.iter()))
                .all(|(v, (l, h))| v >= l && v <= h)
    }

    /// Sample a uniformly random action. Requires finite bounds.
    pub fn sample(&self, rng: &mut impl rand::Rng) -> Action {
        Action::new(
            self.low
                .iter()
                .zip(self.high.iter())
                .map(|(&l, &h)| rng.gen_range(l..=h))
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// StepResult / ResetResult
// ---------------------------------------------------------------------------

/// Result of `env.step(action)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f32,
    /// Episode ended due to task success/failure.
    pub terminated: bool,
    /// Episode ended due to time limit.
    pub truncated: bool,
    pub info: StepInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StepInfo {
    pub episode_length: u32,
    pub episode_reward: f32,
    /// Named reward terms that sum to the step reward.
    pub custom: HashMap<String, f32>,
}

/// Result of `env.reset()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResult {
    pub observation: Observation,
    pub info: ResetInfo,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetInfo {
    pub seed: Option<u64>,
    pub custom: HashMap<String, f32>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn observation_from_f64_narrows() {
        let obs = Observation::from_f64(&[1.0, -0.5, 0.25]);
        assert_eq!(obs.len(), 3);
        assert_eq!(obs.as_slice(), &[1.0, -0.5, 0.25]);
    }

    #[test]
    fn observation_index() {
        let obs = Observation::new(vec![0.0; 4]);
        assert_eq!(obs.len(), 4);
        assert!(!obs.is_empty());
        assert!(obs[3].abs() < f32::EPSILON);
    }

    #[test]
    fn observation_serialize_roundtrip() {
        let obs = Observation::new(vec![1.0, 2.0, 3.0]);
        let json = serde_json::to_string(&obs).unwrap();
        let back: Observation = serde_json::from_str(&json).unwrap();
        assert_eq!(obs, back);
    }

    #[test]
    fn action_to_f64_is_exact() {
        let action = Action::new(vec![2.0, -2.0]);
        assert_eq!(action.to_f64(), vec![2.0, -2.0]);
    }

    #[test]
    fn action_validate_ok() {
        assert!(Action::new(vec![0.5, -3.0]).validate(2).is_ok());
    }

    #[test]
    fn action_validate_dim_mismatch() {
        assert_eq!(
            Action::zeros(3).validate(2),
            Err(ValidationError::ActionDimMismatch {
                expected: 2,
                got: 3
            })
        );
    }

    #[test]
    fn action_validate_nan_and_inf() {
        assert_eq!(
            Action::new(vec![f32::NAN, 0.0]).validate(2),
            Err(ValidationError::ActionContainsNan)
        );
        assert_eq!(
            Action::new(vec![0.0, f32::NEG_INFINITY]).validate(2),
            Err(ValidationError::ActionContainsInf)
        );
    }

    #[test]
    fn box_space_contains() {
        let space = BoxSpace::uniform(2, -1.0, 1.0);
        assert_eq!(space.dim(), 2);
        assert!(space.contains(&[0.0, 1.0]));
        assert!(!space.contains(&[0.0, 1.5]));
        assert!(!space.contains(&[0.0]));
    }

    #[test]
    fn box_space_sample_within_bounds() {
        let space = BoxSpace::uniform(2, -1.0, 1.0);
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(3);
        for _ in 0..100 {
            let action = space.sample(&mut rng);
            assert!(space.contains(action.as_slice()));
        }
    }

    #[test]
    fn infinite_box_contains_everything_finite() {
        let space = BoxSpace::uniform(3, f32::NEG_INFINITY, f32::INFINITY);
        assert!(space.contains(&[1e30, -1e30, 0.0]));
    }
}
