//! Player controller
//!
//! Update order within a tick matters:
//! 1. Walk left/right and update facing
//! 2. Pick up a hammer (drops the blaster)
//! 3. Pick up a blaster (drops the hammer, flags the ammo top-up)
//! 4. Swap sprite, keeping the bottom edge where it was
//! 5. Climb, or fall under gravity when not on a ladder
//! 6. Land on a platform, but only while not rising
//! 7. Jump if standing and the jump key was pressed this tick
//! 8. Clamp to the screen

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{BodyClass, Kinematics};
use super::geom::{Aabb, Facing, edge_query};
use super::projectile::{Projectile, ProjectileKind};
use super::props::{Barrel, Pickup};
use super::round::TickInput;
use super::world::{Bounds, World};
use crate::consts::*;
use crate::sprite::{SpriteId, SpriteSizes};

/// What the player is carrying; at most one item at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeldItem {
    #[default]
    Nothing,
    Hammer,
    Blaster,
}

/// Side effects of one player update, for the round to react to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerStep {
    pub hammer_collected: bool,
    pub blaster_collected: bool,
    pub landed: bool,
    pub jumped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub kin: Kinematics,
    /// In the air since the last jump; cleared on landing
    pub jumping: bool,
    pub held: HeldItem,
    pub facing: Facing,
    /// Current pose, which also sets the collision box
    pub sprite: SpriteId,
    /// Touching a ladder this tick, so gravity is off
    pub on_ladder: bool,
    /// Set when a blaster is picked up, cleared when the round reads it
    blaster_just_collected: bool,
    /// Barrel ids already credited during the current jump
    scored_this_arc: Vec<u32>,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            kin: Kinematics::default(),
            jumping: false,
            held: HeldItem::Nothing,
            facing: Facing::Right,
            sprite: SpriteId::PlayerRight,
            on_ladder: false,
            blaster_just_collected: false,
            scored_this_arc: Vec::new(),
        }
    }

    #[inline]
    pub fn holds_hammer(&self) -> bool {
        self.held == HeldItem::Hammer
    }

    #[inline]
    pub fn holds_blaster(&self) -> bool {
        self.held == HeldItem::Blaster
    }

    pub fn bounds(&self, sprites: &SpriteSizes) -> Aabb {
        Aabb::centered(self.pos, sprites.get(self.sprite))
    }

    pub fn scored_this_arc(&self) -> &[u32] {
        &self.scored_this_arc
    }

    /// Read-once edge: true on the first call after a blaster pickup
    pub fn take_blaster_pickup(&mut self) -> bool {
        std::mem::take(&mut self.blaster_just_collected)
    }

    /// Sprite for the current item and facing
    pub fn pose(&self) -> SpriteId {
        match (self.held, self.facing) {
            (HeldItem::Hammer, Facing::Right) => SpriteId::PlayerHammerRight,
            (HeldItem::Hammer, Facing::Left) => SpriteId::PlayerHammerLeft,
            (HeldItem::Blaster, Facing::Right) => SpriteId::PlayerBlasterRight,
            (HeldItem::Blaster, Facing::Left) => SpriteId::PlayerBlasterLeft,
            (HeldItem::Nothing, Facing::Right) => SpriteId::PlayerRight,
            (HeldItem::Nothing, Facing::Left) => SpriteId::PlayerLeft,
        }
    }

    pub fn update(
        &mut self,
        input: &TickInput,
        world: &World,
        hammers: &mut [Pickup],
        blasters: &mut [Pickup],
    ) -> PlayerStep {
        let sprites = &world.sprites;
        let mut step = PlayerStep::default();

        if input.left {
            self.pos.x -= PLAYER_WALK_SPEED;
            self.facing = Facing::Left;
        } else if input.right {
            self.pos.x += PLAYER_WALK_SPEED;
            self.facing = Facing::Right;
        }

        if self.collect(hammers, sprites) {
            self.held = HeldItem::Hammer;
            step.hammer_collected = true;
        }
        if self.collect(blasters, sprites) {
            self.held = HeldItem::Blaster;
            self.blaster_just_collected = true;
            step.blaster_collected = true;
        }

        self.refresh_sprite(sprites);

        self.on_ladder = self.climb(input, world);
        if !self.on_ladder {
            self.kin.accelerate(BodyClass::PLAYER);
        }
        let feet_before = self.bounds(sprites).bottom();
        self.pos.y += self.kin.vel_y;

        // Never snap while rising, or a jump through a platform would be cut short
        if self.kin.vel_y >= 0.0 {
            step.landed = self.land(world, feet_before);
        }

        if step.landed && input.jump {
            self.kin.vel_y = PLAYER_JUMP_IMPULSE;
            self.jumping = true;
            step.jumped = true;
        }

        self.enforce_bounds(world.bounds, sprites);
        step
    }

    /// Take the first uncollected item of `items` the player overlaps
    fn collect(&self, items: &mut [Pickup], sprites: &SpriteSizes) -> bool {
        let body = self.bounds(sprites);
        match items
            .iter_mut()
            .find(|item| !item.collected && item.bounds(sprites).intersects(&body))
        {
            Some(item) => {
                item.collected = true;
                true
            }
            None => false,
        }
    }

    fn refresh_sprite(&mut self, sprites: &SpriteSizes) {
        let next = self.pose();
        let shift = sprites.half_height(next) - sprites.half_height(self.sprite);
        self.pos.y -= shift;
        self.sprite = next;
    }

    /// Ladder movement; returns true while gravity should be suspended
    fn climb(&mut self, input: &TickInput, world: &World) -> bool {
        let sprites = &world.sprites;
        let half_h = sprites.half_height(self.sprite);
        let mut on_ladder = false;

        for ladder in world.climbables() {
            if !ladder.spans_x(self.pos.x) {
                continue;
            }
            let body = self.bounds(sprites);

            if body.intersects(&ladder) {
                on_ladder = true;
                if input.up {
                    // Feet stop at the ladder's top
                    self.pos.y = (self.pos.y - PLAYER_CLIMB_SPEED).max(ladder.top() - half_h);
                } else if input.down {
                    // Feet stop at the ladder's foot
                    let room = (ladder.bottom() - body.bottom()).max(0.0);
                    self.pos.y += PLAYER_CLIMB_SPEED.min(room);
                }
                self.kin.vel_y = 0.0;
                // At most one ladder per tick
                break;
            } else if input.down {
                let feet = Vec2::new(self.pos.x, body.bottom());
                if edge_query(feet, &ladder, LADDER_GRAB_TOLERANCE).on_top {
                    // Step down onto a ladder from the platform at its top
                    self.pos.y += PLAYER_CLIMB_SPEED;
                    self.kin.vel_y = 0.0;
                    on_ladder = true;
                    break;
                }
            }
        }
        on_ladder
    }

    /// Snap onto the first platform the feet crossed from above this tick
    fn land(&mut self, world: &World, feet_before: f32) -> bool {
        let body = self.bounds(&world.sprites);
        let surface = world
            .surfaces()
            .find(|s| body.intersects(s) && feet_before <= s.top());

        match surface {
            Some(surface) => {
                let half = world.sprites.half_height(self.sprite);
                self.kin.snap_to_surface(&mut self.pos, surface.top(), half);
                self.finish_arc();
                true
            }
            None => false,
        }
    }

    fn finish_arc(&mut self) {
        self.jumping = false;
        self.scored_this_arc.clear();
    }

    fn enforce_bounds(&mut self, bounds: Bounds, sprites: &SpriteSizes) {
        let size = sprites.get(self.sprite);
        let half_w = size.x / 2.0;
        self.pos.x = self.pos.x.max(half_w).min(bounds.width - half_w);

        let half_h = size.y / 2.0;
        if self.pos.y + half_h > bounds.height {
            self.pos.y = bounds.height - half_h;
            self.kin.vel_y = 0.0;
            self.finish_arc();
        }
    }

    /// Credit a jump over `barrel`; each barrel scores at most once per arc
    pub fn try_credit_jump(&mut self, barrel: &Barrel, sprites: &SpriteSizes) -> bool {
        if barrel.is_destroyed() || !self.jumping || self.scored_this_arc.contains(&barrel.id) {
            return false;
        }

        let hazard = barrel.bounds(sprites);
        let feet = self.bounds(sprites).bottom();
        let above = feet < hazard.top();
        let close = hazard.top() - feet <= JUMP_OVER_CLOSENESS;
        let over = hazard.spans_x(self.pos.x);

        if above && close && over {
            self.scored_this_arc.push(barrel.id);
            true
        } else {
            false
        }
    }

    /// A bullet leaving the player's centre in the facing direction
    pub fn shoot(&self) -> Projectile {
        Projectile::new(ProjectileKind::Bullet, self.pos, self.facing)
    }
}
