//! Enemy pool
//!
//! Enemies hover in place. A slot that falls behind the player (including
//! one knocked out by the projectile) is thrown back up ahead of the player
//! and re-enabled, so enemy density stays constant.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::pool::Pool;
use crate::config::WorldConfig;
use crate::distance;

/// Enemy animation tag (consumed by the renderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnemyAnim {
    /// Looping flight animation
    #[default]
    Flying,
    /// Frozen after catching the player
    Stopped,
}

/// One enemy slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub body: Body,
    pub anim: EnemyAnim,
}

impl Enemy {
    pub fn new(pos: Vec2, config: &WorldConfig) -> Self {
        Self {
            body: Body::dynamic(pos, config.enemy_size, config.enemy_offset).without_gravity(),
            anim: EnemyAnim::Flying,
        }
    }

    /// Active enemies collide with the player and the projectile
    #[inline]
    pub fn is_active(&self) -> bool {
        self.body.enabled
    }
}

pub type EnemyPool = Pool<Enemy>;

impl Pool<Enemy> {
    /// Scatter `enemy_count` enemies across the spawn band above the origin
    pub fn spawn_enemies(config: &WorldConfig, rng: &mut Pcg32) -> Self {
        let (near, far) = config.enemy_spawn_band;
        Pool::from_fn(config.enemy_count, |_| {
            let x = rng.random_range(0.0..=config.screen_width);
            let y = -rng.random_range(near..=far);
            Enemy::new(Vec2::new(x, y), config)
        })
    }

    /// Throw trailing enemies back up ahead of the player.
    ///
    /// `on_moved` is called with the index of each moved slot. Returns how
    /// many enemies moved.
    pub fn recycle(
        &mut self,
        player: &Body,
        config: &WorldConfig,
        rng: &mut Pcg32,
        mut on_moved: impl FnMut(usize),
    ) -> usize {
        let player_center = player.center();
        let (min_jump, max_jump) = config.enemy_jump;
        let mut moved = 0;

        for (i, enemy) in self.iter_mut().enumerate() {
            let below = enemy.body.pos.y > player.pos.y;
            if below && distance(player_center, enemy.body.center()) > config.recycle_radius {
                let x = rng.random_range(0.0..=config.screen_width);
                let y = enemy.body.pos.y - rng.random_range(min_jump..=max_jump);
                enemy.body.enable_at(Vec2::new(x, y));
                enemy.body.vel = Vec2::ZERO;
                enemy.anim = EnemyAnim::Flying;
                on_moved(i);
                moved += 1;
            }
        }

        if moved > 0 {
            log::debug!("Recycled {} enemy(ies)", moved);
        }
        moved
    }

    /// Number of enemies currently able to collide
    pub fn active_count(&self) -> usize {
        self.iter().filter(|e| e.is_active()).count()
    }
}
