//! Collision resolution
//!
//! The physics collaborator reports which bodies overlap. Turning a contact
//! into gameplay is a pure function of the contact and the current world:
//! `resolve_collision` returns the mutations to apply and changes nothing
//! itself, so resolution does not depend on when the engine dispatches.
//!
//! | Pair                  | Condition                               | Effect                          |
//! |-----------------------|-----------------------------------------|---------------------------------|
//! | player x platform     | landing on the top face while falling   | bounce                          |
//! | platform x platform   | any overlap                             | relocate the higher slot        |
//! | platform x enemy      | any overlap                             | relocate the platform           |
//! | player x enemy        | enemy active                            | pause, game over, stop enemy    |
//! | enemy x projectile    | both active                             | disable both, award kill points |

use serde::{Deserialize, Serialize};

use super::body::Touching;
use super::state::GameOverCause;
use super::world::World;

/// Identifies a body owned by the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyRef {
    Player,
    Platform(usize),
    Enemy(usize),
    Projectile,
}

/// An overlapping pair reported by the physics collaborator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub a: BodyRef,
    pub b: BodyRef,
    /// Faces of `a` in contact with `b`
    pub touching_a: Touching,
    /// Faces of `b` in contact with `a`
    pub touching_b: Touching,
}

/// A contact classified by the kinds of bodies involved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    PlayerPlatform { platform: usize },
    /// `first < second`
    PlatformPlatform { first: usize, second: usize },
    PlatformEnemy { platform: usize, enemy: usize },
    PlayerEnemy { enemy: usize },
    EnemyProjectile { enemy: usize },
    /// Pairs with no registered handler
    Unhandled,
}

impl Contact {
    pub fn new(a: BodyRef, b: BodyRef, touching_a: Touching) -> Self {
        Self {
            a,
            b,
            touching_a,
            touching_b: touching_a.mirrored(),
        }
    }

    /// Touching flags for one side of the pair
    pub fn touching_of(&self, body: BodyRef) -> Touching {
        if body == self.a {
            self.touching_a
        } else if body == self.b {
            self.touching_b
        } else {
            Touching::NONE
        }
    }

    pub fn kind(&self) -> ContactKind {
        use BodyRef::*;
        match (self.a, self.b) {
            (Player, Platform(p)) | (Platform(p), Player) => {
                ContactKind::PlayerPlatform { platform: p }
            }
            (Platform(x), Platform(y)) if x != y => ContactKind::PlatformPlatform {
                first: x.min(y),
                second: x.max(y),
            },
            (Platform(p), Enemy(e)) | (Enemy(e), Platform(p)) => ContactKind::PlatformEnemy {
                platform: p,
                enemy: e,
            },
            (Player, Enemy(e)) | (Enemy(e), Player) => ContactKind::PlayerEnemy { enemy: e },
            (Enemy(e), Projectile) | (Projectile, Enemy(e)) => {
                ContactKind::EnemyProjectile { enemy: e }
            }
            _ => ContactKind::Unhandled,
        }
    }
}

/// A single state mutation produced by resolving a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Bounce impulse and jump animation
    Bounce { platform: usize },
    /// Move the platform to a fresh random x at the same height
    RelocatePlatform { platform: usize },
    /// Freeze velocity integration
    PauseWorld,
    EndGame { cause: GameOverCause },
    StopEnemy { enemy: usize },
    DisableEnemy { enemy: usize },
    DisableProjectile,
    AwardKill { enemy: usize },
}

/// Decide what a contact does to the world. Nothing happens once the game
/// is over, or for bodies that are no longer in play.
pub fn resolve_collision(contact: &Contact, world: &World) -> Vec<Effect> {
    if world.state.is_over {
        return Vec::new();
    }

    match contact.kind() {
        ContactKind::PlayerPlatform { platform } => {
            let platform_face = contact.touching_of(BodyRef::Platform(platform));
            let player_face = contact.touching_of(BodyRef::Player);
            if platform_face.up && player_face.down && world.player.is_falling() {
                vec![Effect::Bounce { platform }]
            } else {
                Vec::new()
            }
        }
        ContactKind::PlatformPlatform { second, .. } => {
            vec![Effect::RelocatePlatform { platform: second }]
        }
        ContactKind::PlatformEnemy { platform, enemy } => {
            if enemy_active(world, enemy) {
                vec![Effect::RelocatePlatform { platform }]
            } else {
                Vec::new()
            }
        }
        ContactKind::PlayerEnemy { enemy } => {
            if enemy_active(world, enemy) {
                vec![
                    Effect::PauseWorld,
                    Effect::EndGame {
                        cause: GameOverCause::CaughtBy { enemy },
                    },
                    Effect::StopEnemy { enemy },
                ]
            } else {
                Vec::new()
            }
        }
        ContactKind::EnemyProjectile { enemy } => {
            if enemy_active(world, enemy) && world.projectile.active {
                vec![
                    Effect::DisableEnemy { enemy },
                    Effect::DisableProjectile,
                    Effect::AwardKill { enemy },
                ]
            } else {
                Vec::new()
            }
        }
        ContactKind::Unhandled => Vec::new(),
    }
}

fn enemy_active(world: &World, enemy: usize) -> bool {
    world.enemies.get(enemy).is_some_and(|e| e.is_active())
}
