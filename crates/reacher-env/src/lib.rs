//! Episode lifecycle and reward shaping around the reacher adapter.
//!
//! [`ReacherEnv`](env::ReacherEnv) drives one robot in one world through the
//! Gymnasium-style `reset`/`step` loop. The step reward is the change in the
//! adapter's potential plus the control-effort and stuck-joint terms in
//! [`reward`].

pub mod env;
pub mod episode;
pub mod reward;
pub mod stats;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        env::ReacherEnv,
        episode::{Episode, EpisodeState},
        reward::RewardTerms,
        stats::EpisodeStats,
    };
}
