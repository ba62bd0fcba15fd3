//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by pool slot index)
//! - No rendering, audio or input-device dependencies

pub mod autopilot;
pub mod body;
pub mod collision;
pub mod enemy;
pub mod physics;
pub mod platform;
pub mod player;
pub mod pool;
pub mod projectile;
pub mod state;
pub mod tick;
pub mod world;

pub use autopilot::autopilot_input;
pub use body::{Aabb, Body, Touching};
pub use collision::{BodyRef, Contact, ContactKind, Effect, resolve_collision};
pub use enemy::{Enemy, EnemyAnim, EnemyPool};
pub use physics::{ArcadePhysics, PhysicsEngine};
pub use platform::{Platform, PlatformPool};
pub use player::{Facing, Player, PlayerAnim};
pub use pool::Pool;
pub use projectile::Projectile;
pub use state::{GameEvent, GameOverCause, GameState};
pub use tick::{GameLoop, TickInput, tick};
pub use world::World;
