//! The player's single reusable shot
//!
//! inactive -> active -> inactive. The shot expires once it has travelled a
//! full screen height above its launch point.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::player::{Player, PlayerAnim};
use crate::config::WorldConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    pub active: bool,
    /// Launch height
    pub start_y: f32,
}

impl Projectile {
    /// Parked, inactive shot
    pub fn new(config: &WorldConfig) -> Self {
        let mut body = Body::dynamic(Vec2::ZERO, config.projectile_size, Vec2::ZERO).without_gravity();
        body.disable();
        Self {
            body,
            active: false,
            start_y: 0.0,
        }
    }

    /// Launch from just above the player. No-op while a shot is in flight.
    ///
    /// Returns true if a shot was fired.
    pub fn fire(&mut self, player: &mut Player, config: &WorldConfig) -> bool {
        if self.active {
            return false;
        }

        let origin = Vec2::new(player.body.pos.x, player.body.pos.y - config.projectile_offset);
        self.body.enable_at(origin);
        self.body.vel = Vec2::new(0.0, config.projectile_speed);
        self.start_y = origin.y;
        self.active = true;
        player.anim = PlayerAnim::Shoot;
        true
    }

    /// Deactivate once the shot has climbed more than `max_travel` above its
    /// launch point. Returns true if it expired this call.
    pub fn check_expiry(&mut self, max_travel: f32) -> bool {
        if self.active && self.start_y - self.body.pos.y > max_travel {
            self.deactivate();
            return true;
        }
        false
    }

    /// Take the shot out of play
    pub fn deactivate(&mut self) {
        self.active = false;
        self.body.disable();
    }
}
