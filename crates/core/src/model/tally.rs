use serde::{Deserialize, Serialize};

use crate::model::question::Difficulty;

/// Correct-answer counter per difficulty tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyTally {
    easy: u32,
    medium: u32,
    hard: u32,
}

impl DifficultyTally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, tier: Difficulty) -> u32 {
        match tier {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
        }
    }

    pub fn increment(&mut self, tier: Difficulty) {
        let slot = match tier {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        };
        *slot = slot.saturating_add(1);
    }

    /// Sum over all tiers.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.easy
            .saturating_add(self.medium)
            .saturating_add(self.hard)
    }
}
