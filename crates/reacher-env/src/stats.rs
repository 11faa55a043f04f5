//! Cumulative statistics across episodes.

use crate::episode::Episode;

/// Length and return of every finished episode.
#[derive(Clone, Debug, Default)]
pub struct EpisodeStats {
    /// Total number of completed episodes.
    pub episodes_completed: u32,
    /// Total steps across all completed episodes.
    pub total_steps: u64,
    /// Steps per completed episode.
    pub length_history: Vec<u32>,
    /// Undiscounted return per completed episode.
    pub return_history: Vec<f32>,
}

impl EpisodeStats {
    pub const fn new() -> Self {
        Self {
            episodes_completed: 0,
            total_steps: 0,
            length_history: Vec::new(),
            return_history: Vec::new(),
        }
    }

    /// Record a finished episode. Episodes still running are ignored and
    /// `false` is returned.
    #[must_use = "a `false` result means the episode was still running and nothing was recorded"]
    pub fn record(&mut self, episode: &Episode) -> bool {
        if !episode.is_done() {
            return false;
        }
        self.episodes_completed += 1;
        self.total_steps += u64::from(episode.step_count);
        self.length_history.push(episode.step_count);
        self.return_history.push(episode.total_reward);
        true
    }

    /// Average episode length across completed episodes.
    pub fn mean_episode_length(&self) -> Option<f32> {
        if self.length_history.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let sum: f32 = self.length_history.iter().map(|&s| s as f32).sum();
        #[allow(clippy::cast_precision_loss)]
        Some(sum / self.length_history.len() as f32)
    }

    /// Average return across completed episodes.
    pub fn mean_return(&self) -> Option<f32> {
        if self.return_history.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        Some(self.return_history.iter().sum::<f32>() / self.return_history.len() as f32)
    }
}
