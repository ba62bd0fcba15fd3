//! Whole-session behavior: invariants under arbitrary input, plus a few
//! scripted sessions

use proptest::prelude::*;

use glam::Vec2;
use sky_jumper::sim::{
    GameEvent, GameLoop, GameOverCause, PhysicsEngine, TickInput, World, autopilot_input,
};
use sky_jumper::{WorldConfig, distance};

/// Park platforms out of the player's column, optionally sparing the spawn platform
fn clear_column(world: &mut World, keep_first: bool) {
    for (i, platform) in world.platforms.iter_mut().enumerate() {
        if keep_first && i == 0 {
            continue;
        }
        let y = platform.body.pos.y;
        platform.body.teleport(Vec2::new(600.0, y));
    }
}

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, fire)| TickInput {
        left,
        right,
        fire,
    })
}

/// Nothing below the player may be left outside the recycle radius
fn assert_recycled(world: &World) {
    let player = &world.player.body;
    let radius = world.config.recycle_radius;
    for platform in &world.platforms {
        let below = platform.body.pos.y > player.pos.y;
        assert!(!(below && distance(player.center(), platform.body.center()) > radius));
    }
    for enemy in &world.enemies {
        let below = enemy.body.pos.y > player.pos.y;
        assert!(!(below && distance(player.center(), enemy.body.center()) > radius));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn session_invariants_hold(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..400),
    ) {
        let config = WorldConfig::default();
        let mut game = GameLoop::new(config.clone(), seed).expect("valid");

        let mut threshold = game.world.state.threshold_height();
        let mut score = game.score();
        let mut was_over = false;

        for input in &inputs {
            let before = game.world.clone();
            game.tick(input);
            let world = &game.world;

            // Pool sizes are fixed
            prop_assert_eq!(world.platforms.len(), config.platform_count);
            prop_assert_eq!(world.enemies.len(), config.enemy_count);

            // Ratchet and score only move one way
            prop_assert!(world.state.threshold_height() >= threshold);
            prop_assert!(world.state.score >= score);
            threshold = world.state.threshold_height();
            score = world.state.score;

            if was_over {
                // Terminal: frozen
                prop_assert!(world.state.is_over);
                prop_assert_eq!(&world.state, &before.state);
                prop_assert_eq!(world.player.body.pos, before.player.body.pos);
                prop_assert_eq!(world.time_ticks, before.time_ticks);
            } else if !world.state.is_over {
                assert_recycled(world);
            }
            was_over = world.state.is_over;

            // At most one shot in flight, and only an active shot is enabled
            prop_assert_eq!(world.projectile.active, world.projectile.body.enabled);
        }
    }
}

#[test]
fn idle_player_keeps_bouncing_on_first_platform() {
    let mut game = GameLoop::new(WorldConfig::default(), 1).expect("valid");
    clear_column(&mut game.world, true);
    let mut bounces = 0;
    for _ in 0..60 * 20 {
        game.tick(&TickInput::default());
        bounces += game
            .world
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Bounced { platform: 0 }))
            .count();
    }
    assert!(!game.is_over());
    assert!(bounces >= 3);
    // Never higher than one jump above the spawn platform
    assert!(game.world.state.threshold_height() <= 0.0);
}

#[test]
fn missing_every_platform_ends_by_falling() {
    let mut game = GameLoop::new(WorldConfig::default(), 1).expect("valid");
    clear_column(&mut game.world, false);

    for _ in 0..60 * 10 {
        game.tick(&TickInput::default());
        if game.is_over() {
            break;
        }
    }
    assert!(game.is_over());
    assert!(game.physics.is_paused());
    assert!(game.world.events.iter().any(|e| matches!(
        e,
        GameEvent::GameOver {
            cause: GameOverCause::Fell,
            ..
        }
    )));
}

#[test]
fn autopilot_climbs() {
    let mut game = GameLoop::new(WorldConfig::default(), 2024).expect("valid");
    let mut best = 0.0f32;
    for _ in 0..60 * 30 {
        let input = autopilot_input(&game.world);
        game.tick(&input);
        best = best.max(game.world.height());
        if game.is_over() {
            break;
        }
    }
    // The opening jump alone clears the spawn point
    assert!(best > 100.0);
    assert!(game.score() > 0);
}
