//! Barrels, the boss, and item pickups

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{BodyClass, FallingBody};
use super::geom::Aabb;
use super::world::World;
use crate::sprite::{SpriteId, SpriteSizes};

/// A falling hazard; fatal to touch unless the player holds the hammer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Barrel {
    pub id: u32,
    pub body: FallingBody,
    destroyed: bool,
}

impl Barrel {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self {
            id,
            body: FallingBody::new(pos, SpriteId::Barrel, BodyClass::BARREL),
            destroyed: false,
        }
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn destroy(&mut self) {
        self.destroyed = true;
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    pub fn bounds(&self, sprites: &SpriteSizes) -> Aabb {
        self.body.bounds(sprites)
    }

    pub fn advance(&mut self, world: &World) {
        if !self.destroyed {
            self.body.step(world.surfaces(), &world.sprites);
        }
    }
}

/// The stationary goal; falls onto its platform and then sits there
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Boss {
    pub body: FallingBody,
}

impl Boss {
    pub fn new(pos: Vec2) -> Self {
        Self {
            body: FallingBody::new(pos, SpriteId::Boss, BodyClass::BOSS),
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.body.pos
    }

    pub fn bounds(&self, sprites: &SpriteSizes) -> Aabb {
        self.body.bounds(sprites)
    }

    pub fn advance(&mut self, world: &World) {
        self.body.step(world.surfaces(), &world.sprites);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    /// Melee item
    Hammer,
    /// Ranged item
    Blaster,
}

/// An item lying in the level until the player walks into it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub kind: PickupKind,
    pub pos: Vec2,
    pub collected: bool,
}

impl Pickup {
    pub fn new(kind: PickupKind, pos: Vec2) -> Self {
        Self {
            kind,
            pos,
            collected: false,
        }
    }

    pub fn sprite(&self) -> SpriteId {
        match self.kind {
            PickupKind::Hammer => SpriteId::Hammer,
            PickupKind::Blaster => SpriteId::Blaster,
        }
    }

    pub fn bounds(&self, sprites: &SpriteSizes) -> Aabb {
        Aabb::centered(self.pos, sprites.get(self.sprite()))
    }
}
