//! Level progression
//!
//! Active -> Transitioning -> Active (next level), or Active -> Complete
//! after the final level. Game over is tracked alongside and is terminal.

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Active,
    /// Between levels; holds the time the level was cleared
    Transitioning { since_ms: u64 },
    /// Final level cleared
    Complete,
}

/// Result of a level-up check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelUp {
    /// Quota not met, or already transitioning
    None,
    /// Level cleared; the next one starts after the transition delay
    Cleared,
    /// The final level was cleared
    CampaignComplete,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelProgress {
    /// 1-based
    pub level: u32,
    pub enemies_killed: u32,
    pub enemies_for_level: u32,
    pub stage: Stage,
    pub game_over: bool,
}

impl LevelProgress {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            level: 1,
            enemies_killed: 0,
            enemies_for_level: config.level(1).quota,
            stage: Stage::Active,
            game_over: false,
        }
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.stage, Stage::Transitioning { .. })
    }

    pub fn is_complete(&self) -> bool {
        self.stage == Stage::Complete
    }

    /// No further gameplay happens once either terminal flag is set
    pub fn is_terminal(&self) -> bool {
        self.game_over || self.is_complete()
    }

    /// Credit kills; ignored outside active play
    pub fn record_kills(&mut self, kills: u32) {
        if self.stage == Stage::Active && !self.game_over {
            self.enemies_killed += kills;
        }
    }

    /// Move to the next stage once the quota is met
    pub fn check_level_up(&mut self, now_ms: u64, final_level: u32) -> LevelUp {
        if self.stage != Stage::Active || self.enemies_killed < self.enemies_for_level {
            return LevelUp::None;
        }
        self.enemies_killed = self.enemies_for_level;

        if self.level >= final_level {
            self.stage = Stage::Complete;
            log::info!("Campaign complete at level {}", self.level);
            LevelUp::CampaignComplete
        } else {
            self.stage = Stage::Transitioning { since_ms: now_ms };
            log::info!("Level {} cleared", self.level);
            LevelUp::Cleared
        }
    }

    /// Finish a pending transition; returns the new level when it starts
    pub fn poll_transition(&mut self, now_ms: u64, config: &GameConfig) -> Option<u32> {
        let Stage::Transitioning { since_ms } = self.stage else {
            return None;
        };
        if now_ms.saturating_sub(since_ms) < config.timers.level_transition_ms {
            return None;
        }

        self.level += 1;
        self.enemies_killed = 0;
        self.enemies_for_level = config.level(self.level).quota;
        self.stage = Stage::Active;
        log::info!(
            "Level {} started: quota {}",
            self.level,
            self.enemies_for_level
        );
        Some(self.level)
    }

    /// Flag game over once the death animation has run its course
    pub fn check_game_over(&mut self, death_elapsed_ms: Option<u64>, death_ms: u64) -> bool {
        if self.game_over {
            return false;
        }
        match death_elapsed_ms {
            Some(elapsed) if elapsed >= death_ms => {
                self.game_over = true;
                log::info!(
                    "Game over: level {}, {} kills",
                    self.level,
                    self.enemies_killed
                );
                true
            }
            _ => false,
        }
    }
}
