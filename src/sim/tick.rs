//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world deterministically. One tick runs,
//! in order: physics step, collision resolution, horizontal movement and
//! wrap, projectile expiry and firing, platform recycling, enemy recycling,
//! the game-over check and the height score. Once the game is over every
//! tick is a no-op.

use super::collision::{Effect, resolve_collision};
use super::physics::{ArcadePhysics, PhysicsEngine};
use super::player::PlayerAnim;
use super::state::{GameEvent, GameOverCause};
use super::world::World;
use crate::config::WorldConfig;
use crate::consts::*;
use crate::error::ConfigError;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left key held
    pub left: bool,
    /// Move right key held
    pub right: bool,
    /// Fire key held
    pub fire: bool,
}

/// Advance the world by one fixed timestep
pub fn tick<P: PhysicsEngine>(world: &mut World, physics: &mut P, input: &TickInput, dt: f32) {
    if world.state.is_over {
        return;
    }

    world.events.clear();
    world.time_ticks += 1;
    // Jump and shoot tags last only for the tick that raised them
    world.player.anim = PlayerAnim::Idle;

    // Engine first: integrate, then resolve what it reports
    physics.step(world, dt);
    for contact in physics.contacts(world) {
        for effect in resolve_collision(&contact, world) {
            apply_effect(world, physics, effect);
        }
    }
    if world.state.is_over {
        return;
    }

    let config = &world.config;

    // Movement
    world
        .player
        .apply_horizontal_input(input.left, input.right, config.horizontal_speed);
    world.player.wrap_horizontal(config);

    // Projectile lifecycle
    if world.projectile.check_expiry(config.screen_height) {
        world.emit(GameEvent::ProjectileExpired);
    }
    if input.fire && world.projectile.fire(&mut world.player, &world.config) {
        log::debug!("Fired from y={}", world.projectile.start_y);
        world.emit(GameEvent::Fired);
    }

    // World streaming
    let World {
        config,
        rng,
        player,
        platforms,
        enemies,
        events,
        ..
    } = &mut *world;
    platforms.recycle(&player.body, config, rng, |platform| {
        events.push(GameEvent::PlatformRecycled { platform })
    });
    enemies.recycle(&player.body, config, rng, |enemy| {
        events.push(GameEvent::EnemyRecycled { enemy })
    });

    // Terminal check
    let player_top = world.player.body.top();
    if world.state.has_fallen(player_top) {
        physics.pause();
        end_game(world, GameOverCause::Fell);
        return;
    }
    if world
        .state
        .advance_threshold(player_top, world.config.game_over_margin)
    {
        log::trace!("Game-over threshold now y={}", world.state.game_over_distance);
    }

    // Height score
    let step = world.config.height_score_step;
    if world.state.update_height_score(world.player.body.pos.y, step) {
        let score = world.state.score;
        world.emit(GameEvent::ScoreChanged { score });
    }
}

/// Apply one resolved collision effect
fn apply_effect<P: PhysicsEngine>(world: &mut World, physics: &mut P, effect: Effect) {
    match effect {
        Effect::Bounce { platform } => {
            world.player.bounce(world.config.bounce_velocity);
            world.emit(GameEvent::Bounced { platform });
        }
        Effect::RelocatePlatform { platform } => {
            world.platforms.relocate(platform, &world.config, &mut world.rng);
            world.emit(GameEvent::PlatformRelocated { platform });
        }
        Effect::PauseWorld => physics.pause(),
        Effect::EndGame { cause } => end_game(world, cause),
        Effect::StopEnemy { enemy } => {
            if let Some(enemy) = world.enemies.get_mut(enemy) {
                enemy.anim = super::enemy::EnemyAnim::Stopped;
            }
        }
        Effect::DisableEnemy { enemy } => {
            if let Some(enemy) = world.enemies.get_mut(enemy) {
                enemy.body.disable();
            }
        }
        Effect::DisableProjectile => world.projectile.deactivate(),
        Effect::AwardKill { enemy } => {
            world.state.award(world.config.kill_score);
            let score = world.state.score;
            log::debug!("Enemy {} down, score {}", enemy, score);
            world.emit(GameEvent::EnemyKilled { enemy });
            world.emit(GameEvent::ScoreChanged { score });
        }
    }
}

fn end_game(world: &mut World, cause: GameOverCause) {
    if world.state.is_over {
        return;
    }
    world.state.is_over = true;
    let score = world.state.score;
    log::info!(
        "Game over ({:?}) at height {:.0}, score {}",
        cause,
        world.height(),
        score
    );
    world.emit(GameEvent::GameOver { cause, score });
}

/// Owns a session: the world plus the physics engine that drives it
#[derive(Debug)]
pub struct GameLoop<P: PhysicsEngine = ArcadePhysics> {
    pub world: World,
    pub physics: P,
    accumulator: f32,
    /// Events from every tick run by the last `advance`
    frame_events: Vec<GameEvent>,
}

impl GameLoop<ArcadePhysics> {
    /// New session using the bundled arcade physics
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        let physics = ArcadePhysics::new(config.gravity);
        Self::with_physics(config, seed, physics)
    }

    /// Throw the whole session away and start over
    pub fn restart(&mut self, seed: u64) -> Result<(), ConfigError> {
        let physics = ArcadePhysics::new(self.world.config.gravity);
        self.restart_with(seed, physics)
    }
}

impl<P: PhysicsEngine> GameLoop<P> {
    pub fn with_physics(config: WorldConfig, seed: u64, physics: P) -> Result<Self, ConfigError> {
        Ok(Self {
            world: World::new(config, seed)?,
            physics,
            accumulator: 0.0,
            frame_events: Vec::with_capacity(16),
        })
    }

    /// Re-initialize every pool and all state with a fresh engine
    pub fn restart_with(&mut self, seed: u64, physics: P) -> Result<(), ConfigError> {
        log::info!("Restarting session with seed {}", seed);
        self.world = World::new(self.world.config.clone(), seed)?;
        self.physics = physics;
        self.accumulator = 0.0;
        self.frame_events.clear();
        Ok(())
    }

    /// Run exactly one fixed tick
    pub fn tick(&mut self, input: &TickInput) {
        tick(&mut self.world, &mut self.physics, input, SIM_DT);
    }

    /// Feed one rendered frame's elapsed time and run as many fixed ticks as
    /// it covers. `input.fire` only applies to the first tick.
    ///
    /// Returns the number of ticks run. Nothing runs once the game is over,
    /// and a non-finite `frame_dt` is dropped.
    pub fn advance(&mut self, frame_dt: f32, input: &TickInput) -> u32 {
        self.frame_events.clear();
        if !frame_dt.is_finite() {
            log::warn!("Ignoring non-finite frame time {}", frame_dt);
            return 0;
        }
        if self.is_over() {
            self.accumulator = 0.0;
            return 0;
        }
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut input = *input;
        let mut substeps = 0;
        while !self.is_over() && self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.tick(&input);
            self.frame_events.extend_from_slice(&self.world.events);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            input.fire = false;
        }
        substeps
    }

    pub fn is_over(&self) -> bool {
        self.world.state.is_over
    }

    pub fn score(&self) -> u64 {
        self.world.state.score
    }

    /// Events raised during the last `advance`
    pub fn frame_events(&self) -> &[GameEvent] {
        &self.frame_events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::Touching;
    use crate::sim::collision::{BodyRef, Contact};
    use crate::sim::enemy::EnemyAnim;
    use glam::Vec2;

    /// Engine that never moves anything and reports a fixed contact list
    #[derive(Debug, Default)]
    struct ScriptedPhysics {
        contacts: Vec<Contact>,
        pauses: u32,
    }

    impl PhysicsEngine for ScriptedPhysics {
        fn step(&mut self, _world: &mut World, _dt: f32) {}

        fn contacts(&mut self, _world: &World) -> Vec<Contact> {
            if self.pauses > 0 {
                return Vec::new();
            }
            self.contacts.clone()
        }

        fn pause(&mut self) {
            self.pauses += 1;
        }

        fn is_paused(&self) -> bool {
            self.pauses > 0
        }
    }

    fn scripted(contacts: Vec<Contact>) -> GameLoop<ScriptedPhysics> {
        let physics = ScriptedPhysics {
            contacts,
            pauses: 0,
        };
        GameLoop::with_physics(WorldConfig::default(), 12345, physics).expect("valid")
    }

    /// Put the player's collision box top at `top`
    fn place_player_top(world: &mut World, top: f32) {
        let config = &world.config;
        let y = top - config.player_offset.y + config.player_size.y / 2.0;
        let x = world.player.body.pos.x;
        world.player.body.teleport(Vec2::new(x, y));
    }

    #[test]
    fn test_threshold_trails_player() {
        let mut game = scripted(Vec::new());
        place_player_top(&mut game.world, -705.0);
        game.tick(&TickInput::default());

        assert!(!game.is_over());
        assert_eq!(game.world.state.game_over_distance, -5.0);
        assert_eq!(game.physics.pauses, 0);
    }

    #[test]
    fn test_falling_behind_threshold_ends_game_once() {
        let mut game = scripted(Vec::new());
        place_player_top(&mut game.world, 1.0);
        game.tick(&TickInput::default());

        assert!(game.is_over());
        assert_eq!(game.physics.pauses, 1);
        assert!(game.world.events.contains(&GameEvent::GameOver {
            cause: GameOverCause::Fell,
            score: 0,
        }));

        game.tick(&TickInput::default());
        assert_eq!(game.physics.pauses, 1);
    }

    #[test]
    fn test_height_scores_ten_per_tick() {
        let mut game = scripted(Vec::new());
        place_player_top(&mut game.world, -500.0);
        let y = game.world.player.body.pos.y;
        assert!(y < -20.0);

        game.tick(&TickInput::default());
        assert_eq!(game.score(), 10);
        game.tick(&TickInput::default());
        assert_eq!(game.score(), 20);
        assert!(
            game.world
                .events
                .contains(&GameEvent::ScoreChanged { score: 20 })
        );
    }

    #[test]
    fn test_projectile_kill_scores_once() {
        let contact = Contact::new(BodyRef::Enemy(0), BodyRef::Projectile, Touching::NONE);
        let mut game = scripted(vec![contact]);
        // Level with the origin: no height score to muddy the count
        game.world.player.body.teleport(Vec2::new(325.0, 0.0));
        game.world.projectile.fire(&mut game.world.player, &game.world.config);

        game.tick(&TickInput::default());
        assert_eq!(game.score(), 100);
        assert!(!game.world.enemies[0].is_active());
        assert!(!game.world.projectile.active);
        assert!(game.world.events.contains(&GameEvent::EnemyKilled { enemy: 0 }));

        // Overlap persists but neither body is in play any more
        game.tick(&TickInput::default());
        assert_eq!(game.score(), 100);
    }

    #[test]
    fn test_enemy_contact_is_terminal() {
        let contact = Contact::new(BodyRef::Player, BodyRef::Enemy(0), Touching::NONE);
        let mut game = scripted(vec![contact]);
        game.tick(&TickInput::default());

        assert!(game.is_over());
        assert_eq!(game.physics.pauses, 1);
        assert_eq!(game.world.enemies[0].anim, EnemyAnim::Stopped);
        assert!(game.world.events.contains(&GameEvent::GameOver {
            cause: GameOverCause::CaughtBy { enemy: 0 },
            score: 0,
        }));
    }

    #[test]
    fn test_ticks_after_game_over_change_nothing() {
        let contact = Contact::new(BodyRef::Player, BodyRef::Enemy(0), Touching::NONE);
        let mut game = scripted(vec![contact]);
        game.tick(&TickInput::default());
        assert!(game.is_over());

        let state = game.world.state.clone();
        let player = game.world.player.body.clone();
        let ticks = game.world.time_ticks;
        let input = TickInput {
            left: true,
            fire: true,
            ..Default::default()
        };
        for _ in 0..10 {
            game.tick(&input);
        }

        assert_eq!(game.world.state, state);
        assert_eq!(game.world.player.body.pos, player.pos);
        assert_eq!(game.world.player.body.vel, player.vel);
        assert_eq!(game.world.time_ticks, ticks);
        assert!(!game.world.projectile.active);
    }

    #[test]
    fn test_landing_bounces_player() {
        let landing = Contact::new(
            BodyRef::Player,
            BodyRef::Platform(0),
            Touching {
                down: true,
                ..Touching::NONE
            },
        );
        let mut game = scripted(vec![landing]);
        game.world.player.body.vel.y = 150.0;
        game.tick(&TickInput::default());

        assert_eq!(game.world.player.body.vel.y, -400.0);
        assert!(game.world.events.contains(&GameEvent::Bounced { platform: 0 }));
        assert_eq!(game.world.player.anim, PlayerAnim::Jump);

        // Rising now, so the same contact no longer bounces and the tag clears
        game.tick(&TickInput::default());
        assert!(!game.world.events.contains(&GameEvent::Bounced { platform: 0 }));
        assert_eq!(game.world.player.anim, PlayerAnim::Idle);
    }

    #[test]
    fn test_shoot_tag_lasts_one_tick() {
        let mut game = scripted(Vec::new());
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        game.tick(&fire);
        assert_eq!(game.world.player.anim, PlayerAnim::Shoot);

        game.tick(&TickInput::default());
        assert!(game.world.projectile.active);
        assert_eq!(game.world.player.anim, PlayerAnim::Idle);
    }

    #[test]
    fn test_fire_input_launches_once() {
        let mut game = scripted(Vec::new());
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        game.tick(&fire);
        assert!(game.world.projectile.active);
        assert!(game.world.events.contains(&GameEvent::Fired));
        let start = game.world.projectile.start_y;

        game.world.player.body.pos.y -= 50.0;
        game.tick(&fire);
        assert_eq!(game.world.projectile.start_y, start);
        assert!(!game.world.events.contains(&GameEvent::Fired));
    }

    #[test]
    fn test_wrap_past_right_bound_reenters_at_inset() {
        let mut game = GameLoop::new(WorldConfig::default(), 7).expect("valid");
        game.world.player.body.pos.x = 612.0;
        game.world.player.body.vel.x = 300.0;
        let right = TickInput {
            right: true,
            ..Default::default()
        };
        game.tick(&right);
        assert_eq!(game.world.player.body.pos.x, 25.0);
    }

    #[test]
    fn test_advance_runs_fixed_substeps() {
        let mut game = GameLoop::new(WorldConfig::default(), 3).expect("valid");
        assert_eq!(game.advance(0.001, &TickInput::default()), 0);
        assert_eq!(game.advance(0.02, &TickInput::default()), 1);
        assert_eq!(game.world.time_ticks, 1);

        // A huge frame is clamped rather than replayed in full
        let ran = game.advance(5.0, &TickInput::default());
        assert!(ran <= MAX_SUBSTEPS);
        assert!(ran >= 5);
    }

    #[test]
    fn test_advance_fires_only_on_first_substep() {
        let mut game = GameLoop::new(WorldConfig::default(), 3).expect("valid");
        let fire = TickInput {
            fire: true,
            ..Default::default()
        };
        game.advance(0.05, &fire);
        let fired = game
            .frame_events()
            .iter()
            .filter(|e| **e == GameEvent::Fired)
            .count();
        assert_eq!(fired, 1);
    }

    #[test]
    fn test_game_over_reported_once_across_frames() {
        let mut game = GameLoop::new(WorldConfig::default(), 3).expect("valid");
        let player = game.world.player.body.pos;
        game.world.enemies[0].body.teleport(player);

        let count_game_over = |events: &[GameEvent]| {
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::GameOver { .. }))
                .count()
        };

        // Room for three ticks, but the first one ends the session
        let ran = game.advance(3.0 * SIM_DT + 0.001, &TickInput::default());
        assert_eq!(ran, 1);
        assert!(game.is_over());
        assert_eq!(count_game_over(game.frame_events()), 1);

        assert_eq!(game.advance(2.0 * SIM_DT + 0.001, &TickInput::default()), 0);
        assert!(game.frame_events().is_empty());
    }

    #[test]
    fn test_advance_drops_non_finite_frame_time() {
        let mut game = GameLoop::new(WorldConfig::default(), 3).expect("valid");
        assert_eq!(game.advance(f32::NAN, &TickInput::default()), 0);
        assert_eq!(game.advance(f32::INFINITY, &TickInput::default()), 0);
        assert_eq!(game.world.time_ticks, 0);

        // The accumulator is still usable afterwards
        assert_eq!(game.advance(0.02, &TickInput::default()), 1);
    }

    #[test]
    fn test_restart_resets_session() {
        let mut game = GameLoop::new(WorldConfig::default(), 3).expect("valid");
        game.world.state.score = 500;
        game.world.state.is_over = true;
        game.physics.pause();

        game.restart(4).expect("valid");
        assert!(!game.is_over());
        assert_eq!(game.score(), 0);
        assert_eq!(game.world.seed, 4);
        assert!(!game.physics.is_paused());
        assert_eq!(game.world.platforms.len(), 13);
    }

    #[test]
    fn test_determinism() {
        let mut a = GameLoop::new(WorldConfig::default(), 99999).expect("valid");
        let mut b = GameLoop::new(WorldConfig::default(), 99999).expect("valid");

        let inputs = [
            TickInput {
                left: true,
                ..Default::default()
            },
            TickInput {
                fire: true,
                ..Default::default()
            },
            TickInput {
                right: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for i in 0..400 {
            let input = &inputs[i % inputs.len()];
            a.tick(input);
            b.tick(input);
        }

        assert_eq!(a.world.time_ticks, b.world.time_ticks);
        assert_eq!(a.world.state, b.world.state);
        assert_eq!(a.world.player.body.pos, b.world.player.body.pos);
        for (pa, pb) in a.world.platforms.iter().zip(b.world.platforms.iter()) {
            assert_eq!(pa.body.pos, pb.body.pos);
        }
    }
}
