//! Physics collaborator boundary
//!
//! The core never integrates motion or detects overlaps itself. It asks a
//! `PhysicsEngine` to step the world, then to list this tick's contacts, and
//! resolves those contacts in `collision`. `ArcadePhysics` is a small
//! reference engine (gravity, velocity integration, AABB overlap) used by the
//! headless runner and the tests; a host can plug in its own.

use super::body::Body;
use super::collision::{BodyRef, Contact};
use super::world::World;

/// What the core needs from a physics engine
pub trait PhysicsEngine {
    /// Integrate gravity and velocity for every enabled, non-static body.
    /// Does nothing while paused.
    fn step(&mut self, world: &mut World, dt: f32);

    /// Overlapping pairs of the registered kinds (player x platform,
    /// platform x platform, platform x enemy, player x enemy,
    /// enemy x projectile). Empty while paused.
    fn contacts(&mut self, world: &World) -> Vec<Contact>;

    /// Freeze all velocity integration
    fn pause(&mut self);

    fn is_paused(&self) -> bool;
}

/// Reference arcade-style engine
#[derive(Debug, Clone)]
pub struct ArcadePhysics {
    /// Downward acceleration (px/s²)
    pub gravity: f32,
    paused: bool,
}

impl ArcadePhysics {
    pub fn new(gravity: f32) -> Self {
        Self {
            gravity,
            paused: false,
        }
    }
}

impl PhysicsEngine for ArcadePhysics {
    fn step(&mut self, world: &mut World, dt: f32) {
        if self.paused {
            return;
        }
        let gravity = self.gravity;
        world.for_each_body_mut(|_, body| body.integrate(gravity, dt));
    }

    fn contacts(&mut self, world: &World) -> Vec<Contact> {
        let mut contacts = Vec::new();
        if self.paused {
            return contacts;
        }

        let player = &world.player.body;
        let projectile = &world.projectile.body;
        let mut push = |a: BodyRef, body_a: &Body, b: BodyRef, body_b: &Body| {
            if !body_a.enabled || !body_b.enabled {
                return;
            }
            if let Some(touching) = body_a.touching(body_b) {
                contacts.push(Contact::new(a, b, touching));
            }
        };

        for (i, platform) in world.platforms.iter().enumerate() {
            push(BodyRef::Player, player, BodyRef::Platform(i), &platform.body);

            for (j, other) in world.platforms.iter().enumerate().skip(i + 1) {
                push(BodyRef::Platform(i), &platform.body, BodyRef::Platform(j), &other.body);
            }
            for (e, enemy) in world.enemies.iter().enumerate() {
                push(BodyRef::Platform(i), &platform.body, BodyRef::Enemy(e), &enemy.body);
            }
        }

        for (e, enemy) in world.enemies.iter().enumerate() {
            push(BodyRef::Player, player, BodyRef::Enemy(e), &enemy.body);
            if world.projectile.active {
                push(BodyRef::Enemy(e), &enemy.body, BodyRef::Projectile, projectile);
            }
        }

        contacts
    }

    fn pause(&mut self) {
        if !self.paused {
            log::debug!("Physics paused");
        }
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}
