//! Sky Jumper - the simulation core of a vertical endless-jumper
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pools, collisions, scoring, game loop)
//! - `config`: Data-driven world parameters
//! - `error`: Configuration errors
//!
//! Rendering, audio and input devices live outside this crate. They read the
//! `World` snapshot and the per-tick `GameEvent` list.

pub mod config;
pub mod error;
pub mod sim;

pub use config::WorldConfig;
pub use error::ConfigError;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one tick per rendered frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will try to catch up on
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Visible play field
    pub const SCREEN_WIDTH: f32 = 620.0;
    pub const SCREEN_HEIGHT: f32 = 900.0;
    pub const GRAVITY: f32 = 300.0;

    /// Player defaults
    pub const PLAYER_SPAWN_X: f32 = 325.0;
    pub const PLAYER_SPAWN_Y: f32 = -100.0;
    pub const HORIZONTAL_SPEED: f32 = 300.0;
    /// Upward impulse on a platform bounce (negative y is up)
    pub const BOUNCE_VELOCITY: f32 = -400.0;

    /// Horizontal wrap bounds and re-entry points
    pub const WRAP_LEFT: f32 = 15.0;
    pub const WRAP_RIGHT: f32 = 615.0;
    pub const WRAP_REENTRY_LEFT: f32 = 25.0;
    pub const WRAP_REENTRY_RIGHT: f32 = 615.0;

    /// Platform pool
    pub const PLATFORM_COUNT: usize = 13;
    pub const PLATFORM_SPACING: f32 = 200.0;

    /// Enemy pool
    pub const ENEMY_COUNT: usize = 1;
    pub const ENEMY_SPAWN_MIN: f32 = 950.0;
    pub const ENEMY_SPAWN_MAX: f32 = 1300.0;
    pub const ENEMY_JUMP_MIN: f32 = 1600.0;
    pub const ENEMY_JUMP_MAX: f32 = 2000.0;

    /// Distance from the player beyond which trailing objects are recycled
    pub const RECYCLE_RADIUS: f32 = 700.0;

    /// Projectile
    pub const PROJECTILE_SPEED: f32 = -1000.0;
    pub const PROJECTILE_OFFSET: f32 = 45.0;

    /// Game-over threshold trails the player by this margin
    pub const GAME_OVER_MARGIN: f32 = 700.0;

    /// Scoring
    pub const HEIGHT_SCORE_STEP: u64 = 10;
    pub const KILL_SCORE: u64 = 100;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Height climbed above the origin (world y grows downward)
#[inline]
pub fn height_of(y: f32) -> f32 {
    -y
}
