// reacher-core: Types, traits, config, seeds and errors for the reacher workspace.

pub mod config;
pub mod error;
pub mod seed;
pub mod traits;
pub mod types;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        config::{ReacherConfig, RewardConfig, SimConfig, WorldConfig},
        error::{ConfigError, ReacherError, SimError, ValidationError},
        seed::SeedHierarchy,
        traits::{JointHandle, PartHandle, RandomSource, RobotWorld},
        types::{
            Action, ActionSpace, Observation, ObservationSpace, ResetInfo, ResetResult, StepInfo,
            StepResult,
        },
    };
}
