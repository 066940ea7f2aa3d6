//! Thrown and fired projectiles
//!
//! A projectile flies horizontally at a constant per-kind speed and goes
//! inactive for good once it leaves the screen, outruns its range, or (for
//! bullets) clips a platform. Target hits are resolved by the round, which
//! deactivates the projectile on the first match.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geom::{Aabb, Facing};
use super::world::World;
use crate::consts::*;
use crate::sprite::{SpriteId, SpriteSizes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Thrown by intelligent monkeys, lethal to the player
    Banana,
    /// Fired by the player's blaster
    Bullet,
}

impl ProjectileKind {
    pub fn speed(self) -> f32 {
        match self {
            ProjectileKind::Banana => BANANA_SPEED,
            ProjectileKind::Bullet => BULLET_SPEED,
        }
    }

    pub fn range(self) -> f32 {
        match self {
            ProjectileKind::Banana => BANANA_RANGE,
            ProjectileKind::Bullet => BULLET_RANGE,
        }
    }

    /// Bananas sail through platforms, bullets do not
    pub fn stops_on_surfaces(self) -> bool {
        matches!(self, ProjectileKind::Bullet)
    }

    pub fn sprite(self, facing: Facing) -> SpriteId {
        match (self, facing) {
            (ProjectileKind::Banana, _) => SpriteId::Banana,
            (ProjectileKind::Bullet, Facing::Right) => SpriteId::BulletRight,
            (ProjectileKind::Bullet, Facing::Left) => SpriteId::BulletLeft,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub facing: Facing,
    pub traveled: f32,
    active: bool,
}

impl Projectile {
    pub fn new(kind: ProjectileKind, pos: Vec2, facing: Facing) -> Self {
        Self {
            kind,
            pos,
            facing,
            traveled: 0.0,
            active: true,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// One-way; an inactive projectile is never reactivated
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn sprite(&self) -> SpriteId {
        self.kind.sprite(self.facing)
    }

    pub fn bounds(&self, sprites: &SpriteSizes) -> Aabb {
        Aabb::centered(self.pos, sprites.get(self.sprite()))
    }

    pub fn advance(&mut self, world: &World) {
        if !self.active {
            return;
        }

        let speed = self.kind.speed();
        self.pos.x += self.facing.sign() * speed;
        self.traveled += speed;

        if world.bounds.outside_x(self.pos.x) || self.traveled > self.kind.range() {
            self.deactivate();
            return;
        }

        if self.kind.stops_on_surfaces() {
            let bounds = self.bounds(&world.sprites);
            if world.surfaces().any(|s| s.intersects(&bounds)) {
                self.deactivate();
            }
        }
    }
}

/// Advance every projectile and drop the ones that went inactive
pub fn advance_all(projectiles: &mut Vec<Projectile>, world: &World) {
    for projectile in projectiles.iter_mut() {
        projectile.advance(world);
    }
    projectiles.retain(Projectile::is_active);
}
