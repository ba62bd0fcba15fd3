//! Sky Jumper headless runner
//!
//! Plays one session with the demo AI and reports how far it got. Rendering
//! and real input belong to a host engine; this binary exists to exercise
//! the simulation end to end.

use sky_jumper::WorldConfig;
use sky_jumper::consts::SIM_DT;
use sky_jumper::sim::{GameEvent, GameLoop, autopilot_input};

/// Stop after ten simulated minutes even if the AI never loses
const MAX_TICKS: u64 = 60 * 60 * 10;
const DEFAULT_SEED: u64 = 0x5EED;

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::init();
    log::info!("Sky Jumper (headless) starting...");

    let seed = std::env::var("SKY_JUMPER_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SEED);

    let mut game = match GameLoop::new(WorldConfig::default(), seed) {
        Ok(game) => game,
        Err(err) => {
            log::error!("Failed to start session: {}", err);
            std::process::exit(1);
        }
    };

    let mut kills = 0u32;
    let mut best_height = 0.0f32;
    while !game.is_over() && game.world.time_ticks < MAX_TICKS {
        let input = autopilot_input(&game.world);
        game.advance(SIM_DT, &input);

        kills += game
            .frame_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::EnemyKilled { .. }))
            .count() as u32;
        best_height = best_height.max(game.world.height());
    }

    let outcome = if game.is_over() { "game over" } else { "time limit" };
    log::info!(
        "Session finished ({}) after {} ticks: score {}, best height {:.0}, kills {}",
        outcome,
        game.world.time_ticks,
        game.score(),
        best_height,
        kills
    );
    println!("seed={} score={} height={:.0}", seed, game.score(), best_height);
}
