//! The world aggregate
//!
//! Everything a session mutates lives in one `World`, handed by reference to
//! each subsystem. A `World` only exists fully populated: `World::new`
//! validates the config and creates every pool slot, the player and the
//! projectile before the first tick can run.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::Body;
use super::collision::BodyRef;
use super::enemy::EnemyPool;
use super::platform::PlatformPool;
use super::player::Player;
use super::projectile::Projectile;
use super::state::{GameEvent, GameState};
use crate::config::WorldConfig;
use crate::error::ConfigError;

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct World {
    pub config: WorldConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: Player,
    pub platforms: PlatformPool,
    pub enemies: EnemyPool,
    pub projectile: Projectile,
    pub state: GameState,
    /// Events raised during the most recent tick
    pub events: Vec<GameEvent>,
}

impl World {
    /// Validate `config` and build a fresh session
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = Pcg32::seed_from_u64(seed);
        let player = Player::spawn(&config);
        let platforms = PlatformPool::spawn_platforms(&config, &mut rng);
        let enemies = EnemyPool::spawn_enemies(&config, &mut rng);
        let projectile = Projectile::new(&config);

        log::info!(
            "New session: seed={}, platforms={}, enemies={}",
            seed,
            platforms.len(),
            enemies.len()
        );

        Ok(Self {
            config,
            seed,
            rng,
            time_ticks: 0,
            player,
            platforms,
            enemies,
            projectile,
            state: GameState::new(),
            events: Vec::with_capacity(16),
        })
    }

    pub fn body(&self, id: BodyRef) -> Option<&Body> {
        match id {
            BodyRef::Player => Some(&self.player.body),
            BodyRef::Platform(i) => self.platforms.get(i).map(|p| &p.body),
            BodyRef::Enemy(i) => self.enemies.get(i).map(|e| &e.body),
            BodyRef::Projectile => Some(&self.projectile.body),
        }
    }

    /// Visit every body mutably (physics integration)
    pub fn for_each_body_mut(&mut self, mut f: impl FnMut(BodyRef, &mut Body)) {
        f(BodyRef::Player, &mut self.player.body);
        for (i, platform) in self.platforms.iter_mut().enumerate() {
            f(BodyRef::Platform(i), &mut platform.body);
        }
        for (i, enemy) in self.enemies.iter_mut().enumerate() {
            f(BodyRef::Enemy(i), &mut enemy.body);
        }
        f(BodyRef::Projectile, &mut self.projectile.body);
    }

    /// Height above the origin the player has reached
    pub fn height(&self) -> f32 {
        crate::height_of(self.player.body.pos.y)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
