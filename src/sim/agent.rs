//! Patrolling monkeys
//!
//! One walker type serves both variants. A monkey falls until it lands, then
//! paces a cyclic list of segment lengths, turning round at the end of each
//! segment, at platform edges, and at the screen edge. Intelligent monkeys
//! carry a `Launcher` that throws a banana on a fixed cooldown.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{BodyClass, Kinematics, first_contact};
use super::geom::{Aabb, Facing, edge_query};
use super::projectile::{self, Projectile, ProjectileKind};
use super::world::World;
use crate::consts::*;
use crate::sprite::{SpriteId, SpriteSizes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonkeyKind {
    #[default]
    Normal,
    /// Throws bananas
    Intelligent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentState {
    Walking,
    /// Terminal; the monkey neither moves nor draws
    Destroyed,
}

/// Banana-throwing capability and the bananas it owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Launcher {
    /// Ticks since the last throw
    pub cooldown: u32,
    /// Ticks between throws
    pub interval: u32,
    /// Bananas in flight; they die with the monkey
    pub bananas: Vec<Projectile>,
}

impl Launcher {
    pub fn new(interval: u32) -> Self {
        Self {
            cooldown: 0,
            interval,
            bananas: Vec::new(),
        }
    }

    /// Count one tick; throws from `pos` toward `facing` when the cooldown elapses
    fn tick(&mut self, pos: Vec2, facing: Facing) -> bool {
        self.cooldown += 1;
        if self.cooldown < self.interval {
            return false;
        }
        self.cooldown = 0;
        self.bananas.push(Projectile::new(ProjectileKind::Banana, pos, facing));
        true
    }

    pub fn advance_bananas(&mut self, world: &World) {
        projectile::advance_all(&mut self.bananas, world);
    }

    fn disarm(&mut self) {
        for banana in &mut self.bananas {
            banana.deactivate();
        }
        self.bananas.retain(Projectile::is_active);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatrolAgent {
    pub kind: MonkeyKind,
    pub pos: Vec2,
    pub kin: Kinematics,
    pub facing: Facing,
    /// Segment lengths in pixels, walked cyclically
    pub route: Vec<u32>,
    /// Segment currently being walked
    pub route_index: usize,
    /// Distance covered in the current segment
    pub distance_walked: f32,
    pub state: AgentState,
    pub launcher: Option<Launcher>,
}

impl PatrolAgent {
    /// `route` must be non-empty with positive entries; the level loader checks this
    pub fn new(kind: MonkeyKind, pos: Vec2, facing: Facing, route: Vec<u32>) -> Self {
        let launcher = match kind {
            MonkeyKind::Normal => None,
            MonkeyKind::Intelligent => Some(Launcher::new(BANANA_FIRE_INTERVAL)),
        };
        Self {
            kind,
            pos,
            kin: Kinematics::new(MONKEY_INITIAL_FALL),
            facing,
            route,
            route_index: 0,
            distance_walked: 0.0,
            state: AgentState::Walking,
            launcher,
        }
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.state == AgentState::Destroyed
    }

    /// Kill the monkey and every banana it still has in flight
    pub fn destroy(&mut self) {
        self.state = AgentState::Destroyed;
        if let Some(launcher) = &mut self.launcher {
            launcher.disarm();
        }
    }

    pub fn sprite(&self) -> SpriteId {
        match (self.kind, self.facing) {
            (MonkeyKind::Normal, Facing::Right) => SpriteId::NormalMonkeyRight,
            (MonkeyKind::Normal, Facing::Left) => SpriteId::NormalMonkeyLeft,
            (MonkeyKind::Intelligent, Facing::Right) => SpriteId::IntelligentMonkeyRight,
            (MonkeyKind::Intelligent, Facing::Left) => SpriteId::IntelligentMonkeyLeft,
        }
    }

    pub fn bounds(&self, sprites: &SpriteSizes) -> Aabb {
        Aabb::centered(self.pos, sprites.get(self.sprite()))
    }

    pub fn bananas(&self) -> &[Projectile] {
        match &self.launcher {
            Some(launcher) => &launcher.bananas,
            None => &[],
        }
    }

    fn segment_length(&self) -> f32 {
        self.route.get(self.route_index).copied().unwrap_or(0) as f32
    }

    /// One tick of patrol; returns true if a banana was thrown
    pub fn advance(&mut self, world: &World) -> bool {
        if self.is_destroyed() {
            return false;
        }

        self.walk(world);

        let (pos, facing) = (self.pos, self.facing);
        self.launcher.as_mut().is_some_and(|l| l.tick(pos, facing))
    }

    fn walk(&mut self, world: &World) {
        self.kin.integrate(&mut self.pos, BodyClass::MONKEY);
        if !self.land(world) {
            // Mid-air: try again next tick
            return;
        }

        if self.at_platform_edge(world) {
            self.flip();
        }

        let segment = self.segment_length();
        let step = MONKEY_WALK_SPEED.min((segment - self.distance_walked).max(0.0));
        self.pos.x += self.facing.sign() * step;
        self.distance_walked += step;
        if self.distance_walked >= segment {
            self.flip();
        }

        let bounds = self.bounds(&world.sprites);
        if bounds.left() <= 0.0 || bounds.right() >= world.bounds.width {
            self.flip();
        }
    }

    fn land(&mut self, world: &World) -> bool {
        match first_contact(&self.bounds(&world.sprites), world.surfaces()) {
            Some(surface) => {
                let half = world.sprites.half_height(self.sprite());
                self.kin.snap_to_surface(&mut self.pos, surface.top(), half);
                true
            }
            None => false,
        }
    }

    /// Would the leading foot leave every surface at this height after one more step?
    fn at_platform_edge(&self, world: &World) -> bool {
        let bounds = self.bounds(&world.sprites);
        let half_w = bounds.size.x / 2.0;
        let next_x = self.pos.x + self.facing.sign() * MONKEY_WALK_SPEED;
        let lead = Vec2::new(next_x + self.facing.sign() * half_w, bounds.bottom());

        !world
            .surfaces()
            .any(|s| edge_query(lead, &s, MONKEY_HEIGHT_TOLERANCE).standing())
    }

    /// Turn round and start the next segment
    fn flip(&mut self) {
        self.facing = self.facing.flipped();
        self.distance_walked = 0.0;
        self.route_index = (self.route_index + 1) % self.route.len().max(1);
    }
}
