//! World configuration
//!
//! Every tunable number the simulation uses lives here as a named field.
//! Defaults reproduce the reference behavior; hosts may load overrides from
//! JSON (missing fields fall back to the defaults).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Initial world parameters for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    // === Play field ===
    /// Visible width; random spawn x is drawn from [0, screen_width]
    pub screen_width: f32,
    /// Visible height; also the projectile's travel limit
    pub screen_height: f32,
    /// Downward acceleration applied to gravity-enabled bodies (px/s²)
    pub gravity: f32,

    // === Player ===
    /// Player spawn position; the first platform sits directly below it at y = 0
    pub spawn: Vec2,
    /// Vertical velocity the player starts the session with
    pub initial_jump_velocity: f32,
    pub player_size: Vec2,
    /// Collision box center relative to the sprite position
    pub player_offset: Vec2,
    pub horizontal_speed: f32,
    /// Vertical velocity set on a platform bounce (negative is up)
    pub bounce_velocity: f32,
    /// Leaving past `wrap_left` re-enters at `wrap_reentry_right`
    pub wrap_left: f32,
    /// Leaving past `wrap_right` re-enters at `wrap_reentry_left`
    pub wrap_right: f32,
    pub wrap_reentry_left: f32,
    pub wrap_reentry_right: f32,

    // === Platforms ===
    pub platform_count: usize,
    pub platform_spacing: f32,
    pub platform_size: Vec2,

    // === Enemies ===
    pub enemy_count: usize,
    /// Initial spawn height band above the origin (min, max)
    pub enemy_spawn_band: (f32, f32),
    /// How far above its old position a recycled enemy reappears (min, max)
    pub enemy_jump: (f32, f32),
    pub enemy_size: Vec2,
    pub enemy_offset: Vec2,

    // === Streaming ===
    /// Trailing objects farther than this from the player are recycled
    pub recycle_radius: f32,

    // === Projectile ===
    /// Launch velocity (negative is up)
    pub projectile_speed: f32,
    /// Launch point distance above the player
    pub projectile_offset: f32,
    pub projectile_size: Vec2,

    // === Scoring / game over ===
    pub game_over_margin: f32,
    pub height_score_step: u64,
    pub kill_score: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            gravity: GRAVITY,

            spawn: Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y),
            initial_jump_velocity: BOUNCE_VELOCITY,
            player_size: Vec2::new(64.0, 90.0),
            player_offset: Vec2::new(0.0, 15.0),
            horizontal_speed: HORIZONTAL_SPEED,
            bounce_velocity: BOUNCE_VELOCITY,
            wrap_left: WRAP_LEFT,
            wrap_right: WRAP_RIGHT,
            wrap_reentry_left: WRAP_REENTRY_LEFT,
            wrap_reentry_right: WRAP_REENTRY_RIGHT,

            platform_count: PLATFORM_COUNT,
            platform_spacing: PLATFORM_SPACING,
            platform_size: Vec2::new(100.0, 24.0),

            enemy_count: ENEMY_COUNT,
            enemy_spawn_band: (ENEMY_SPAWN_MIN, ENEMY_SPAWN_MAX),
            enemy_jump: (ENEMY_JUMP_MIN, ENEMY_JUMP_MAX),
            enemy_size: Vec2::new(60.0, 60.0),
            enemy_offset: Vec2::new(0.0, -7.5),

            recycle_radius: RECYCLE_RADIUS,

            projectile_speed: PROJECTILE_SPEED,
            projectile_offset: PROJECTILE_OFFSET,
            projectile_size: Vec2::new(16.0, 16.0),

            game_over_margin: GAME_OVER_MARGIN,
            height_score_step: HEIGHT_SCORE_STEP,
            kill_score: KILL_SCORE,
        }
    }
}

impl WorldConfig {
    /// Parse a config from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: WorldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Largest vertical distance the player covers in one fixed tick.
    ///
    /// The fastest case is falling: from the apex of the strongest jump
    /// (`rise² / 2g` above the launch point) all the way down past the
    /// game-over margin, giving `sqrt(2·rise² + 2·g·margin)`.
    pub fn max_vertical_step(&self) -> f32 {
        let rise = self
            .bounce_velocity
            .abs()
            .max(self.initial_jump_velocity.abs());
        let gravity = self.gravity.max(0.0);
        let fall = (2.0 * rise * rise + 2.0 * gravity * self.game_over_margin).sqrt();
        rise.max(fall) * SIM_DT
    }

    /// Check every invariant the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("platform_spacing", self.platform_spacing),
            ("horizontal_speed", self.horizontal_speed),
            ("recycle_radius", self.recycle_radius),
            ("game_over_margin", self.game_over_margin),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field });
            }
        }

        let sizes = [
            ("player_size", self.player_size),
            ("platform_size", self.platform_size),
            ("enemy_size", self.enemy_size),
            ("projectile_size", self.projectile_size),
        ];
        for (field, size) in sizes {
            if !(size.x > 0.0 && size.y > 0.0) {
                return Err(ConfigError::NonPositive { field });
            }
        }

        if self.platform_count == 0 {
            return Err(ConfigError::EmptyPool {
                field: "platform_count",
            });
        }
        if self.enemy_count == 0 {
            return Err(ConfigError::EmptyPool {
                field: "enemy_count",
            });
        }

        for (field, (min, max)) in [
            ("enemy_spawn_band", self.enemy_spawn_band),
            ("enemy_jump", self.enemy_jump),
        ] {
            if !(min >= 0.0 && min <= max) {
                return Err(ConfigError::InvalidRange { field });
            }
        }

        let inside = |x: f32| (0.0..=self.screen_width).contains(&x);
        if !(self.wrap_left < self.wrap_right
            && inside(self.wrap_left)
            && inside(self.wrap_right)
            && inside(self.wrap_reentry_left)
            && inside(self.wrap_reentry_right))
        {
            return Err(ConfigError::WrapBounds);
        }

        // Recycling a platform the player could still reach in one tick
        // would open a gap to fall through
        let min = self.max_vertical_step();
        if self.recycle_radius <= min {
            return Err(ConfigError::RecycleRadiusTooSmall {
                radius: self.recycle_radius,
                min,
            });
        }

        Ok(())
    }
}
