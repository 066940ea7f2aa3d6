//! Kinematic bodies
//!
//! Gravity is constant acceleration per tick with a per-class terminal velocity.
//! Landing is discrete: after integrating, the first surface (in registration
//! order) that overlaps the body snaps it on top and zeroes its velocity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::Aabb;
use crate::consts::*;
use crate::sprite::{SpriteId, SpriteSizes};

/// Per-class gravity parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyClass {
    pub gravity: f32,
    pub terminal_velocity: f32,
}

impl BodyClass {
    pub const PLAYER: BodyClass = BodyClass {
        gravity: PLAYER_GRAVITY,
        terminal_velocity: PLAYER_TERMINAL_VELOCITY,
    };
    pub const BOSS: BodyClass = BodyClass {
        gravity: BOSS_GRAVITY,
        terminal_velocity: BOSS_TERMINAL_VELOCITY,
    };
    pub const BARREL: BodyClass = BodyClass {
        gravity: BARREL_GRAVITY,
        terminal_velocity: BARREL_TERMINAL_VELOCITY,
    };
    pub const LADDER: BodyClass = BodyClass {
        gravity: LADDER_GRAVITY,
        terminal_velocity: LADDER_TERMINAL_VELOCITY,
    };
    pub const MONKEY: BodyClass = BodyClass {
        gravity: MONKEY_GRAVITY,
        terminal_velocity: MONKEY_TERMINAL_VELOCITY,
    };
}

/// Vertical velocity of a body (positive is downward)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Kinematics {
    pub vel_y: f32,
}

impl Kinematics {
    pub fn new(vel_y: f32) -> Self {
        Self { vel_y }
    }

    /// Apply one tick of gravity, clamped to terminal velocity
    #[inline]
    pub fn accelerate(&mut self, class: BodyClass) {
        self.vel_y = (self.vel_y + class.gravity).min(class.terminal_velocity);
    }

    /// Accelerate, then move
    #[inline]
    pub fn integrate(&mut self, pos: &mut Vec2, class: BodyClass) {
        self.accelerate(class);
        pos.y += self.vel_y;
    }

    /// Rest the body's bottom edge on `surface_top`
    #[inline]
    pub fn snap_to_surface(&mut self, pos: &mut Vec2, surface_top: f32, half_height: f32) {
        pos.y = surface_top - half_height;
        self.vel_y = 0.0;
    }
}

/// First surface overlapping `body`, in iteration order
pub fn first_contact(body: &Aabb, surfaces: impl IntoIterator<Item = Aabb>) -> Option<Aabb> {
    surfaces.into_iter().find(|s| body.intersects(s))
}

/// A prop that only ever falls straight down (barrels, ladders, the boss)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallingBody {
    pub pos: Vec2,
    pub sprite: SpriteId,
    pub kin: Kinematics,
    pub class: BodyClass,
}

impl FallingBody {
    pub fn new(pos: Vec2, sprite: SpriteId, class: BodyClass) -> Self {
        Self {
            pos,
            sprite,
            kin: Kinematics::default(),
            class,
        }
    }

    pub fn bounds(&self, sprites: &SpriteSizes) -> Aabb {
        Aabb::centered(self.pos, sprites.get(self.sprite))
    }

    /// One tick of fall; returns true if the body ended the tick resting on a surface
    pub fn step(&mut self, surfaces: impl IntoIterator<Item = Aabb>, sprites: &SpriteSizes) -> bool {
        self.kin.integrate(&mut self.pos, self.class);
        match first_contact(&self.bounds(sprites), surfaces) {
            Some(surface) => {
                let half = sprites.half_height(self.sprite);
                self.kin.snap_to_surface(&mut self.pos, surface.top(), half);
                true
            }
            None => false,
        }
    }
}
