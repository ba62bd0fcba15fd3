//! Axis-aligned physics bodies
//!
//! A `Body` is the part of an entity the physics collaborator integrates:
//! sprite position, velocity and a collision box offset from the sprite.
//! World y grows downward, so "up" is negative y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which faces of a body are in contact this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Touching {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl Touching {
    pub const NONE: Touching = Touching {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Faces the other body of the same contact is touching
    pub fn mirrored(self) -> Self {
        Self {
            up: self.down,
            down: self.up,
            left: self.right,
            right: self.left,
        }
    }
}

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap; boxes that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// A rigid body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    /// Sprite position
    pub pos: Vec2,
    /// Sprite position at the start of the last physics step
    pub prev_pos: Vec2,
    pub vel: Vec2,
    /// Collision box size
    pub size: Vec2,
    /// Collision box center relative to `pos`
    pub offset: Vec2,
    /// Disabled bodies neither move nor collide
    pub enabled: bool,
    /// Whether gravity accelerates this body
    pub allow_gravity: bool,
    /// Static bodies never move under integration
    pub is_static: bool,
}

impl Body {
    /// A dynamic body affected by gravity
    pub fn dynamic(pos: Vec2, size: Vec2, offset: Vec2) -> Self {
        Self {
            pos,
            prev_pos: pos,
            vel: Vec2::ZERO,
            size,
            offset,
            enabled: true,
            allow_gravity: true,
            is_static: false,
        }
    }

    /// An immovable body
    pub fn fixed(pos: Vec2, size: Vec2) -> Self {
        Self {
            is_static: true,
            allow_gravity: false,
            ..Self::dynamic(pos, size, Vec2::ZERO)
        }
    }

    pub fn without_gravity(mut self) -> Self {
        self.allow_gravity = false;
        self
    }

    /// Collision box center
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.offset
    }

    /// Collision box top edge (smallest y)
    #[inline]
    pub fn top(&self) -> f32 {
        self.center().y - self.size.y * 0.5
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center().y + self.size.y * 0.5
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::from_center(self.center(), self.size)
    }

    /// Collision box as it was before the last physics step
    pub fn prev_aabb(&self) -> Aabb {
        Aabb::from_center(self.prev_pos + self.offset, self.size)
    }

    /// Move without sweeping: the body will not register as having
    /// travelled from its old position
    pub fn teleport(&mut self, pos: Vec2) {
        self.pos = pos;
        self.prev_pos = pos;
    }

    /// Advance by velocity (and gravity) over `dt`
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        self.prev_pos = self.pos;
        if !self.enabled || self.is_static {
            return;
        }
        if self.allow_gravity {
            self.vel.y += gravity * dt;
        }
        self.pos += self.vel * dt;
    }

    /// Disable and stop the body (it stays in place, invisible to collisions)
    pub fn disable(&mut self) {
        self.enabled = false;
        self.vel = Vec2::ZERO;
    }

    /// Re-enable at a new position
    pub fn enable_at(&mut self, pos: Vec2) {
        self.teleport(pos);
        self.enabled = true;
    }

    /// Which faces of `self` touch `other`, judged from where both boxes were
    /// before the last step. Returns `None` when they don't overlap now.
    pub fn touching(&self, other: &Body) -> Option<Touching> {
        if !self.aabb().overlaps(&other.aabb()) {
            return None;
        }

        let a = self.prev_aabb();
        let b = other.prev_aabb();
        let mut touching = Touching::NONE;
        if a.max.y <= b.min.y {
            touching.down = true;
        } else if a.min.y >= b.max.y {
            touching.up = true;
        } else if a.max.x <= b.min.x {
            touching.right = true;
        } else if a.min.x >= b.max.x {
            touching.left = true;
        } else {
            // Already overlapping last tick: resolve along the shallower axis
            let dx = self.center().x - other.center().x;
            let dy = self.center().y - other.center().y;
            let overlap_x = (self.size.x + other.size.x) * 0.5 - dx.abs();
            let overlap_y = (self.size.y + other.size.y) * 0.5 - dy.abs();
            if overlap_y <= overlap_x {
                touching.down = dy < 0.0;
                touching.up = dy >= 0.0;
            } else {
                touching.right = dx < 0.0;
                touching.left = dx >= 0.0;
            }
        }
        Some(touching)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_edge_contact_is_not_overlap() {
        let a = Aabb::from_center(Vec2::ZERO, Vec2::splat(10.0));
        let b = Aabb::from_center(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&b));
        let c = Aabb::from_center(Vec2::new(9.0, 0.0), Vec2::splat(10.0));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn test_integrate_applies_gravity_only_when_allowed() {
        let mut falling = Body::dynamic(Vec2::ZERO, Vec2::splat(10.0), Vec2::ZERO);
        falling.integrate(300.0, 0.5);
        assert_eq!(falling.vel.y, 150.0);
        assert_eq!(falling.pos.y, 75.0);
        assert_eq!(falling.prev_pos, Vec2::ZERO);

        let mut floating = Body::dynamic(Vec2::ZERO, Vec2::splat(10.0), Vec2::ZERO).without_gravity();
        floating.vel = Vec2::new(10.0, 0.0);
        floating.integrate(300.0, 1.0);
        assert_eq!(floating.pos, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn test_static_and_disabled_bodies_do_not_move() {
        let mut platform = Body::fixed(Vec2::ZERO, Vec2::new(100.0, 20.0));
        platform.vel = Vec2::new(5.0, 5.0);
        platform.integrate(300.0, 1.0);
        assert_eq!(platform.pos, Vec2::ZERO);

        let mut ghost = Body::dynamic(Vec2::ZERO, Vec2::splat(10.0), Vec2::ZERO);
        ghost.disable();
        ghost.integrate(300.0, 1.0);
        assert_eq!(ghost.pos, Vec2::ZERO);
    }

    #[test]
    fn test_landing_from_above_touches_down() {
        let platform = Body::fixed(Vec2::new(0.0, 0.0), Vec2::new(100.0, 20.0));
        let mut player = Body::dynamic(Vec2::new(0.0, -40.0), Vec2::new(20.0, 40.0), Vec2::ZERO);
        player.vel.y = 600.0;
        player.integrate(0.0, 1.0 / 60.0);
        // Bottom was at -20, above the platform top at -10
        player.pos.y = -25.0;
        let touching = player.touching(&platform).expect("overlapping");
        assert!(touching.down);
        let mirrored = touching.mirrored();
        assert!(mirrored.up);
        assert!(!mirrored.down);
    }

    #[test]
    fn test_side_contact_is_not_a_landing() {
        let platform = Body::fixed(Vec2::ZERO, Vec2::new(100.0, 20.0));
        let mut player = Body::dynamic(Vec2::new(-70.0, 0.0), Vec2::new(20.0, 40.0), Vec2::ZERO);
        player.prev_pos = Vec2::new(-70.0, 0.0);
        player.pos = Vec2::new(-55.0, 0.0);
        let touching = player.touching(&platform).expect("overlapping");
        assert!(touching.right);
        assert!(!touching.down);
    }

    #[test]
    fn test_teleport_resets_sweep() {
        let mut body = Body::dynamic(Vec2::ZERO, Vec2::splat(10.0), Vec2::new(0.0, 5.0));
        body.teleport(Vec2::new(40.0, -400.0));
        assert_eq!(body.prev_pos, body.pos);
        assert_eq!(body.center(), Vec2::new(40.0, -395.0));
        assert_eq!(body.top(), -400.0);
    }
}
