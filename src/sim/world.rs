//! Static world: platforms, ladders and screen bounds
//!
//! Platforms never move. Ladders are dropped under gravity at load time until
//! they rest on a platform and are immobile from then on; the player still
//! queries their boxes to decide whether it is climbing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{BodyClass, FallingBody};
use super::geom::Aabb;
use crate::consts::LADDER_SETTLE_LIMIT;
use crate::sprite::{SpriteId, SpriteSizes};

/// Playfield extent, passed to everything that clamps or culls at the screen edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Strictly outside the horizontal range `[0, width]`
    #[inline]
    pub fn outside_x(&self, x: f32) -> bool {
        x < 0.0 || x > self.width
    }
}

/// A fixed landing surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub pos: Vec2,
}

impl Platform {
    pub fn new(pos: Vec2) -> Self {
        Self { pos }
    }

    pub fn bounds(&self, sprites: &SpriteSizes) -> Aabb {
        Aabb::centered(self.pos, sprites.get(SpriteId::Platform))
    }
}

/// A climbable that settles onto a platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ladder {
    pub body: FallingBody,
    pub resting: bool,
}

impl Ladder {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: FallingBody::new(pos, SpriteId::Ladder, BodyClass::LADDER),
            resting: false,
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    pub fn bounds(&self, sprites: &SpriteSizes) -> Aabb {
        self.body.bounds(sprites)
    }
}

/// Everything other entities stand on or climb, plus the shared context they need
#[derive(Debug, Clone)]
pub struct World {
    pub bounds: Bounds,
    pub sprites: SpriteSizes,
    pub platforms: Vec<Platform>,
    pub ladders: Vec<Ladder>,
}

impl World {
    /// Build the world and let every ladder fall to rest
    pub fn new(bounds: Bounds, sprites: SpriteSizes, platforms: Vec<Platform>, ladders: Vec<Ladder>) -> Self {
        let mut world = Self {
            bounds,
            sprites,
            platforms,
            ladders,
        };
        world.settle_ladders();
        world
    }

    /// Platform boxes in registration order
    pub fn surfaces(&self) -> impl Iterator<Item = Aabb> + '_ {
        self.platforms.iter().map(|p| p.bounds(&self.sprites))
    }

    pub fn surface_top(&self, index: usize) -> Option<f32> {
        self.platforms.get(index).map(|p| p.bounds(&self.sprites).top())
    }

    pub fn surface_bottom(&self, index: usize) -> Option<f32> {
        self.platforms.get(index).map(|p| p.bounds(&self.sprites).bottom())
    }

    pub fn surface_bounds(&self, index: usize) -> Option<Aabb> {
        self.platforms.get(index).map(|p| p.bounds(&self.sprites))
    }

    /// Ladder boxes in registration order
    pub fn climbables(&self) -> impl Iterator<Item = Aabb> + '_ {
        self.ladders.iter().map(|l| l.bounds(&self.sprites))
    }

    /// Per-tick ladder update; a no-op once every ladder rests
    pub fn advance_ladders(&mut self) {
        let sprites = &self.sprites;
        let platforms = &self.platforms;
        for ladder in self.ladders.iter_mut().filter(|l| !l.resting) {
            let surfaces = platforms.iter().map(|p| p.bounds(sprites));
            ladder.resting = ladder.body.step(surfaces, sprites);
        }
    }

    fn settle_ladders(&mut self) {
        for _ in 0..LADDER_SETTLE_LIMIT {
            if self.ladders.iter().all(|l| l.resting) {
                return;
            }
            self.advance_ladders();
        }
        for (i, ladder) in self.ladders.iter_mut().enumerate() {
            if !ladder.resting {
                log::warn!("Ladder {} at x={} never reached a platform", i, ladder.pos().x);
                ladder.resting = true;
            }
        }
    }
}
