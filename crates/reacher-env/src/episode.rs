//! Episode state machine.
//!
//! An episode is a single rollout from reset to truncation. The reacher task
//! has no success or failure condition, so every episode ends by time limit.

// ---------------------------------------------------------------------------
// EpisodeState
// ---------------------------------------------------------------------------

/// Lifecycle state of an episode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EpisodeState {
    /// Before the first reset.
    #[default]
    Idle,
    /// Actively stepping.
    Running,
    /// Ended due to time limit.
    Truncated,
}

impl EpisodeState {
    /// Returns `true` once the episode has hit its time limit.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Truncated)
    }

    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

// ---------------------------------------------------------------------------
// Episode
// ---------------------------------------------------------------------------

/// Counters for the current episode.
#[derive(Clone, Debug, Default)]
pub struct Episode {
    pub state: EpisodeState,
    /// Steps taken this episode.
    pub step_count: u32,
    /// Sum of step rewards this episode.
    pub total_reward: f32,
    /// Seed the episode was reset with.
    pub seed: Option<u64>,
    /// Number of resets since construction.
    pub episode_number: u64,
}

impl Episode {
    /// Start a new episode.
    pub const fn reset(&mut self, seed: Option<u64>) {
        self.state = EpisodeState::Running;
        self.step_count = 0;
        self.total_reward = 0.0;
        self.seed = seed;
        self.episode_number += 1;
    }

    /// Count one step. Returns `false` if the episode is not running.
    pub fn advance(&mut self, reward: f32) -> bool {
        if !self.state.is_running() {
            return false;
        }
        self.step_count += 1;
        self.total_reward += reward;
        true
    }

    pub const fn truncate(&mut self) {
        self.state = EpisodeState::Truncated;
    }

    /// Truncate once `max_steps` is reached. Returns `true` on the
    /// transition. `0` disables the limit.
    pub fn check_truncation(&mut self, max_steps: u32) -> bool {
        if max_steps > 0 && self.step_count >= max_steps && self.state.is_running() {
            self.truncate();
            return true;
        }
        false
    }

    pub const fn is_done(&self) -> bool {
        self.state.is_terminal()
    }

    pub const fn is_running(&self) -> bool {
        self.state.is_running()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
