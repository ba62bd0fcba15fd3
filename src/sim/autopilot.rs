//! Idle/demo mode - a simple AI that plays the game
//!
//! Produces the same `TickInput` a player would, so demo runs go through the
//! exact same tick as real play.

use super::tick::TickInput;
use super::world::World;

/// Horizontal slack before the AI bothers steering
const STEER_DEADZONE: f32 = 12.0;
/// How close (horizontally) an enemy must be before the AI shoots
const AIM_WINDOW: f32 = 40.0;

/// Pick this tick's input for the player
pub fn autopilot_input(world: &World) -> TickInput {
    let player = &world.player.body;
    let feet = player.bottom();
    let mut input = TickInput::default();

    // Falling: aim for the nearest platform below the feet. Rising: line up
    // with the nearest platform above so the next fall lands on it.
    let target = if world.player.is_falling() {
        world
            .platforms
            .iter()
            .filter(|p| p.body.top() >= feet)
            .min_by(|a, b| a.body.pos.y.total_cmp(&b.body.pos.y))
    } else {
        world
            .platforms
            .iter()
            .filter(|p| p.body.top() < feet)
            .max_by(|a, b| a.body.pos.y.total_cmp(&b.body.pos.y))
    };

    if let Some(platform) = target {
        let dx = platform.body.pos.x - player.pos.x;
        input.left = dx < -STEER_DEADZONE;
        input.right = dx > STEER_DEADZONE;
    }

    // Shoot anything hovering overhead
    input.fire = !world.projectile.active
        && world.enemies.iter().any(|e| {
            e.is_active()
                && e.body.pos.y < player.pos.y
                && (e.body.pos.x - player.pos.x).abs() < AIM_WINDOW
        });

    input
}
