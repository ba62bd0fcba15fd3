//! Platform pool
//!
//! A small fixed stack of platforms simulates an endless climb: platforms
//! that fall far enough behind the player are moved to the top of the stack.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::pool::Pool;
use crate::config::WorldConfig;
use crate::distance;

/// One platform slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub body: Body,
    /// Moved by the most recent recycling pass (the sprite needs a refresh)
    pub recycled: bool,
}

impl Platform {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            body: Body::fixed(pos, size),
            recycled: false,
        }
    }
}

pub type PlatformPool = Pool<Platform>;

impl Pool<Platform> {
    /// Stack `platform_count` platforms upward from y = 0.
    ///
    /// The bottom platform sits directly under the spawn point so the first
    /// fall always lands somewhere.
    pub fn spawn_platforms(config: &WorldConfig, rng: &mut Pcg32) -> Self {
        Pool::from_fn(config.platform_count, |i| {
            let x = if i == 0 {
                config.spawn.x
            } else {
                rng.random_range(0.0..=config.screen_width)
            };
            let y = -(i as f32) * config.platform_spacing;
            Platform::new(Vec2::new(x, y), config.platform_size)
        })
    }

    /// Highest platform y (smallest value)
    pub fn min_y(&self) -> f32 {
        self.iter()
            .map(|p| p.body.pos.y)
            .fold(f32::INFINITY, f32::min)
    }

    /// Move every platform that is below the player and outside the recycle
    /// radius to one spacing above the current top platform.
    ///
    /// `on_moved` is called with the index of each moved slot. Returns how
    /// many platforms moved.
    pub fn recycle(
        &mut self,
        player: &Body,
        config: &WorldConfig,
        rng: &mut Pcg32,
        mut on_moved: impl FnMut(usize),
    ) -> usize {
        let min_y = self.min_y();
        let player_center = player.center();
        let mut moved = 0;

        for (i, platform) in self.iter_mut().enumerate() {
            platform.recycled = false;
            let below = platform.body.pos.y > player.pos.y;
            if below && distance(player_center, platform.body.center()) > config.recycle_radius {
                let x = rng.random_range(0.0..=config.screen_width);
                platform
                    .body
                    .teleport(Vec2::new(x, min_y - config.platform_spacing));
                platform.recycled = true;
                on_moved(i);
                moved += 1;
            }
        }

        if moved > 0 {
            log::debug!("Recycled {} platform(s) above y={}", moved, min_y);
        }
        moved
    }

    /// Shift a platform sideways to a fresh random x (overlap fallback)
    pub fn relocate(&mut self, index: usize, config: &WorldConfig, rng: &mut Pcg32) {
        if let Some(platform) = self.get_mut(index) {
            let x = rng.random_range(0.0..=config.screen_width);
            let y = platform.body.pos.y;
            platform.body.teleport(Vec2::new(x, y));
        }
    }
}
