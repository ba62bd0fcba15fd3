//! Player controller
//!
//! Horizontal movement and screen wrap are driven here; vertical motion is
//! left to gravity plus the bounce impulse from platforms.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use crate::config::WorldConfig;

/// Which way the sprite faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Player animation tag (consumed by the renderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerAnim {
    #[default]
    Idle,
    /// One-shot jump animation after a bounce
    Jump,
    /// One-shot shoot animation after firing
    Shoot,
}

/// The player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    pub facing: Facing,
    pub anim: PlayerAnim,
}

impl Player {
    /// Spawn at the configured point, already moving upward
    pub fn spawn(config: &WorldConfig) -> Self {
        let mut body = Body::dynamic(config.spawn, config.player_size, config.player_offset);
        body.vel.y = config.initial_jump_velocity;
        Self {
            body,
            facing: Facing::Right,
            anim: PlayerAnim::Idle,
        }
    }

    /// Set horizontal velocity from the held direction keys.
    ///
    /// Holding both keys cancels out, same as holding neither.
    pub fn apply_horizontal_input(&mut self, left_held: bool, right_held: bool, speed: f32) {
        match (left_held, right_held) {
            (true, false) => {
                self.body.vel.x = -speed;
                self.facing = Facing::Left;
            }
            (false, true) => {
                self.body.vel.x = speed;
                self.facing = Facing::Right;
            }
            _ => self.body.vel.x = 0.0,
        }
    }

    /// Teleport to the opposite side once past a wrap bound.
    ///
    /// Returns true if the player wrapped.
    pub fn wrap_horizontal(&mut self, config: &WorldConfig) -> bool {
        let x = self.body.pos.x;
        let target = if x < config.wrap_left {
            config.wrap_reentry_right
        } else if x > config.wrap_right {
            config.wrap_reentry_left
        } else {
            return false;
        };

        // Keep velocity; only the position jumps
        let y = self.body.pos.y;
        let vel = self.body.vel;
        self.body.teleport(Vec2::new(target, y));
        self.body.vel = vel;
        true
    }

    /// Bounce off a platform
    pub fn bounce(&mut self, velocity: f32) {
        self.body.vel.y = velocity;
        self.anim = PlayerAnim::Jump;
    }

    /// Falling (or at rest) rather than rising
    #[inline]
    pub fn is_falling(&self) -> bool {
        self.body.vel.y >= 0.0
    }
}
