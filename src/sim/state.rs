//! Score, game-over threshold and gameplay events

use serde::{Deserialize, Serialize};

use crate::height_of;

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Fell behind the rising threshold
    Fell,
    /// Touched the enemy in the given slot
    CaughtBy { enemy: usize },
}

/// Something that happened during a tick, for the rendering/audio side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player bounced off a platform
    Bounced { platform: usize },
    /// Projectile launched
    Fired,
    /// Projectile ran out of range
    ProjectileExpired,
    /// Platform moved to the top of the stack by recycling
    PlatformRecycled { platform: usize },
    /// Platform shoved sideways to clear an overlap
    PlatformRelocated { platform: usize },
    /// Enemy thrown back up ahead of the player
    EnemyRecycled { enemy: usize },
    /// Projectile hit an enemy
    EnemyKilled { enemy: usize },
    /// Score display needs refreshing
    ScoreChanged { score: u64 },
    /// Terminal
    GameOver { cause: GameOverCause, score: u64 },
}

/// Session progress
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    /// Falling below this y ends the game. Only ever moves up (toward
    /// negative y) during a session.
    pub game_over_distance: f32,
    /// Terminal once set
    pub is_over: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            score: 0,
            game_over_distance: 0.0,
            is_over: false,
        }
    }

    /// Height of the threshold above the origin (non-decreasing)
    pub fn threshold_height(&self) -> f32 {
        height_of(self.game_over_distance)
    }

    /// True if a player whose collision box top is at `player_top` has
    /// dropped below the threshold
    pub fn has_fallen(&self, player_top: f32) -> bool {
        player_top > self.game_over_distance
    }

    /// Pull the threshold up behind the player once they are more than
    /// `margin` above it. Returns true if the threshold moved.
    pub fn advance_threshold(&mut self, player_top: f32, margin: f32) -> bool {
        if height_of(player_top) - height_of(self.game_over_distance) > margin {
            self.game_over_distance = player_top + margin;
            return true;
        }
        false
    }

    /// Award one height step if the player is higher than the score.
    /// Returns true if the score changed.
    pub fn update_height_score(&mut self, player_y: f32, step: u64) -> bool {
        if height_of(player_y) > self.score as f32 {
            self.score += step;
            return true;
        }
        false
    }

    pub fn award(&mut self, points: u64) {
        self.score += points;
    }
}
