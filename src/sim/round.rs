//! One level's worth of play
//!
//! `Round::advance` runs a single tick in a fixed order. The order decides
//! edge-frame outcomes, so it is listed here once:
//!
//! 1. Frame counter, then ladders
//! 2. Barrels: jump-over credit, then contact (smash or death), then fall
//! 3. Boss falls
//! 4. Monkeys walk and throw, then contact (stomp or death)
//! 5. Player moves and picks things up; touching the boss wins with the
//!    hammer and kills without it
//! 6. Bananas fly and are checked against the player
//! 7. Fire request becomes a bullet
//! 8. Bullets fly; each hits the first live monkey it overlaps, else the boss
//! 9. Ammo bookkeeping for this tick's pickups
//!
//! Barrel and monkey contact is tested against the player's position from the
//! previous tick. When several results land on the same tick a death beats a
//! win, and a win beats running out of time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::agent::PatrolAgent;
use super::player::Player;
use super::projectile::{self, Projectile};
use super::props::{Barrel, Boss, Pickup, PickupKind};
use super::world::{Ladder, Platform, World};
use crate::config::{GameConfig, LevelError};
use crate::consts::*;
use crate::render::{Renderer, StatusLine};
use crate::sprite::SpriteId;

/// Controls held (or pressed, for `jump` and `fire`) during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Jump key went down this tick
    pub jump: bool,
    /// Fire key went down this tick
    pub fire: bool,
}

/// What killed the player, or that time ran out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    Barrel,
    Monkey,
    Banana,
    Boss,
    TimeUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    Continue,
    Won,
    Lost(LossCause),
}

impl TickOutcome {
    pub fn is_over(self) -> bool {
        self != TickOutcome::Continue
    }
}

/// Gameplay events raised during the most recent tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEvent {
    BarrelJumped { barrel: u32 },
    BarrelSmashed { barrel: u32 },
    MonkeyStomped { monkey: usize },
    MonkeyShot { monkey: usize },
    BossHit { health: u32 },
    ShotFired,
    HammerCollected,
    BlasterCollected,
    BananaFired { monkey: usize },
}

/// Live state of one level
#[derive(Debug, Clone)]
pub struct Round {
    pub world: World,
    pub player: Player,
    pub boss: Boss,
    pub barrels: Vec<Barrel>,
    pub hammers: Vec<Pickup>,
    pub blasters: Vec<Pickup>,
    pub monkeys: Vec<PatrolAgent>,
    /// Player shots in flight
    pub bullets: Vec<Projectile>,
    /// Ticks run so far
    frame: u32,
    /// Tick at which time runs out
    frame_budget: u32,
    fps: u32,
    /// Running total, including what earlier levels carried in
    score: u32,
    boss_health: u32,
    /// Blaster shots left; forced to zero while the hammer is held
    ammo: u32,
    /// Sticks once the round is over
    outcome: TickOutcome,
    /// Cleared at the start of every tick
    events: Vec<RoundEvent>,
}

impl Round {
    /// Build level `level_index` (0-based), carrying `starting_score` in from earlier levels
    pub fn new(config: &GameConfig, level_index: usize, starting_score: u32) -> Result<Self, LevelError> {
        config.validate()?;
        let layout = config.level(level_index)?;

        let platforms = layout.platforms.iter().copied().map(Platform::new).collect();
        let ladders = layout.ladders.iter().copied().map(Ladder::new).collect();
        let world = World::new(config.bounds(), config.sprite_sizes(), platforms, ladders);

        let barrels = layout
            .barrels
            .iter()
            .enumerate()
            .map(|(id, &pos)| Barrel::new(id as u32, pos))
            .collect();
        let pickups = |kind: PickupKind, positions: &[Vec2]| -> Vec<Pickup> {
            positions.iter().map(|&pos| Pickup::new(kind, pos)).collect()
        };
        let monkeys = layout
            .monkeys
            .iter()
            .map(|m| PatrolAgent::new(m.kind, m.position, m.facing, m.route.clone()))
            .collect();

        log::info!(
            "Level {}: {} platforms, {} ladders, {} barrels, {} monkeys",
            level_index + 1,
            layout.platforms.len(),
            layout.ladders.len(),
            layout.barrels.len(),
            layout.monkeys.len()
        );

        Ok(Self {
            world,
            player: Player::new(layout.player),
            boss: Boss::new(layout.boss),
            barrels,
            hammers: pickups(PickupKind::Hammer, &layout.hammers),
            blasters: pickups(PickupKind::Blaster, &layout.blasters),
            monkeys,
            bullets: Vec::new(),
            frame: 0,
            frame_budget: config.max_frames,
            fps: config.fps,
            score: starting_score,
            boss_health: BOSS_HEALTH,
            ammo: 0,
            outcome: TickOutcome::Continue,
            events: Vec::new(),
        })
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn boss_health(&self) -> u32 {
        self.boss_health
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    /// Whole seconds left before time runs out
    pub fn seconds_left(&self) -> u32 {
        self.frame_budget.saturating_sub(self.frame) / self.fps.max(1)
    }

    pub fn outcome(&self) -> TickOutcome {
        self.outcome
    }

    pub fn events(&self) -> &[RoundEvent] {
        &self.events
    }

    pub fn status(&self) -> StatusLine {
        StatusLine {
            score: self.score,
            boss_health: self.boss_health,
            ammo: self.ammo,
            seconds_left: self.seconds_left(),
        }
    }

    /// Run one tick. Once the round has ended this just repeats the outcome.
    pub fn advance(&mut self, input: &TickInput) -> TickOutcome {
        if self.outcome.is_over() {
            return self.outcome;
        }
        self.events.clear();
        self.frame += 1;
        self.world.advance_ladders();

        let mut death = self.resolve_barrels();
        self.boss.advance(&self.world);
        death = death.or(self.resolve_monkeys());

        let step = self.player.update(input, &self.world, &mut self.hammers, &mut self.blasters);
        if step.hammer_collected {
            self.events.push(RoundEvent::HammerCollected);
        }
        if step.blaster_collected {
            self.events.push(RoundEvent::BlasterCollected);
        }

        let sprites = &self.world.sprites;
        let mut reached_boss = false;
        if self.player.bounds(sprites).intersects(&self.boss.bounds(sprites)) {
            if self.player.holds_hammer() {
                reached_boss = true;
            } else {
                death = death.or(Some(LossCause::Boss));
            }
        }

        death = death.or(self.resolve_bananas());

        if input.fire && self.ammo > 0 && self.player.holds_blaster() {
            self.bullets.push(self.player.shoot());
            self.ammo -= 1;
            self.events.push(RoundEvent::ShotFired);
        }
        self.resolve_bullets();

        if self.player.take_blaster_pickup() {
            self.ammo += BLASTER_AMMO;
        }
        if self.player.holds_hammer() {
            self.ammo = 0;
        }

        self.outcome = if let Some(cause) = death {
            TickOutcome::Lost(cause)
        } else if reached_boss || self.boss_health == 0 {
            TickOutcome::Won
        } else if self.frame >= self.frame_budget {
            TickOutcome::Lost(LossCause::TimeUp)
        } else {
            TickOutcome::Continue
        };

        if self.outcome.is_over() {
            log::info!(
                "Round over at frame {}: {:?}, score {}",
                self.frame,
                self.outcome,
                self.score
            );
        }
        self.outcome
    }

    fn resolve_barrels(&mut self) -> Option<LossCause> {
        let sprites = &self.world.sprites;
        let mut death = None;

        for barrel in self.barrels.iter_mut() {
            if self.player.try_credit_jump(barrel, sprites) {
                self.score += BARREL_JUMP_SCORE;
                self.events.push(RoundEvent::BarrelJumped { barrel: barrel.id });
            }

            if barrel.bounds(sprites).intersects(&self.player.bounds(sprites)) {
                if self.player.holds_hammer() {
                    barrel.destroy();
                    self.score += BARREL_SMASH_SCORE;
                    self.events.push(RoundEvent::BarrelSmashed { barrel: barrel.id });
                    log::debug!("Barrel {} smashed", barrel.id);
                    continue;
                }
                death = death.or(Some(LossCause::Barrel));
            }

            barrel.advance(&self.world);
        }

        self.barrels.retain(|b| !b.is_destroyed());
        death
    }

    fn resolve_monkeys(&mut self) -> Option<LossCause> {
        let sprites = &self.world.sprites;
        let mut death = None;

        for (i, monkey) in self.monkeys.iter_mut().enumerate() {
            if monkey.is_destroyed() {
                continue;
            }
            if monkey.advance(&self.world) {
                self.events.push(RoundEvent::BananaFired { monkey: i });
            }

            if monkey.bounds(sprites).intersects(&self.player.bounds(sprites)) {
                if self.player.holds_hammer() {
                    monkey.destroy();
                    self.score += MONKEY_KILL_SCORE;
                    self.events.push(RoundEvent::MonkeyStomped { monkey: i });
                    log::debug!("Monkey {} stomped", i);
                } else {
                    death = death.or(Some(LossCause::Monkey));
                }
            }
        }
        death
    }

    fn resolve_bananas(&mut self) -> Option<LossCause> {
        let sprites = &self.world.sprites;
        let body = self.player.bounds(sprites);
        let mut death = None;

        for monkey in self.monkeys.iter_mut().filter(|m| !m.is_destroyed()) {
            let Some(launcher) = monkey.launcher.as_mut() else {
                continue;
            };
            launcher.advance_bananas(&self.world);
            for banana in launcher.bananas.iter_mut() {
                if banana.bounds(sprites).intersects(&body) {
                    banana.deactivate();
                    death = Some(LossCause::Banana);
                }
            }
            launcher.bananas.retain(Projectile::is_active);
        }
        death
    }

    fn resolve_bullets(&mut self) {
        projectile::advance_all(&mut self.bullets, &self.world);

        let sprites = &self.world.sprites;
        let boss = self.boss.bounds(sprites);

        for bullet in self.bullets.iter_mut() {
            let hit = bullet.bounds(sprites);

            let target = self
                .monkeys
                .iter_mut()
                .enumerate()
                .find(|(_, m)| !m.is_destroyed() && m.bounds(sprites).intersects(&hit));
            if let Some((i, monkey)) = target {
                monkey.destroy();
                bullet.deactivate();
                self.score += MONKEY_KILL_SCORE;
                self.events.push(RoundEvent::MonkeyShot { monkey: i });
                log::debug!("Monkey {} shot", i);
                continue;
            }

            if boss.intersects(&hit) {
                bullet.deactivate();
                self.boss_health = self.boss_health.saturating_sub(1);
                self.events.push(RoundEvent::BossHit {
                    health: self.boss_health,
                });
                log::debug!("Boss hit, health {}", self.boss_health);
            }
        }

        self.bullets.retain(Projectile::is_active);
    }

    /// Draw everything still in play, back to front, then the status line
    pub fn render(&self, renderer: &mut impl Renderer) {
        for platform in &self.world.platforms {
            renderer.draw_sprite(SpriteId::Platform, platform.pos);
        }
        for ladder in &self.world.ladders {
            renderer.draw_sprite(ladder.body.sprite, ladder.pos());
        }
        for barrel in self.barrels.iter().filter(|b| !b.is_destroyed()) {
            renderer.draw_sprite(barrel.body.sprite, barrel.pos());
        }
        for pickup in self.hammers.iter().chain(&self.blasters).filter(|p| !p.collected) {
            renderer.draw_sprite(pickup.sprite(), pickup.pos);
        }
        renderer.draw_sprite(self.boss.body.sprite, self.boss.pos());
        for monkey in self.monkeys.iter().filter(|m| !m.is_destroyed()) {
            renderer.draw_sprite(monkey.sprite(), monkey.pos);
        }
        for banana in self.monkeys.iter().flat_map(|m| m.bananas()) {
            renderer.draw_sprite(banana.sprite(), banana.pos);
        }
        renderer.draw_sprite(self.player.sprite, self.player.pos);
        for bullet in &self.bullets {
            renderer.draw_sprite(bullet.sprite(), bullet.pos);
        }
        renderer.draw_status(&self.status());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LevelLayout, MonkeyRecord};
    use crate::render::DrawList;
    use crate::sim::agent::MonkeyKind;
    use crate::sim::geom::Facing;
    use crate::sim::projectile::ProjectileKind;
    use proptest::prelude::*;
    use std::collections::HashMap;

    /// Player standing on the floor
    const GROUND_Y: f32 = 670.0;

    fn floor() -> Vec<Vec2> {
        (0..16).map(|i| Vec2::new(32.0 + 64.0 * i as f32, 700.0)).collect()
    }

    fn layout(player_x: f32) -> LevelLayout {
        LevelLayout {
            player: Vec2::new(player_x, GROUND_Y),
            boss: Vec2::new(900.0, 655.0),
            barrels: Vec::new(),
            ladders: Vec::new(),
            platforms: floor(),
            hammers: Vec::new(),
            blasters: Vec::new(),
            monkeys: Vec::new(),
        }
    }

    fn config(level: LevelLayout) -> GameConfig {
        GameConfig {
            width: 1024.0,
            height: 768.0,
            fps: 60,
            max_frames: 3600,
            sprite_sizes: HashMap::new(),
            levels: vec![level],
        }
    }

    fn round(level: LevelLayout) -> Round {
        Round::new(&config(level), 0, 0).unwrap()
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn right() -> TickInput {
        TickInput {
            right: true,
            ..Default::default()
        }
    }

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_new_round_starts_clean() {
        let round = Round::new(&config(layout(100.0)), 0, 250).unwrap();
        assert_eq!(round.score(), 250);
        assert_eq!(round.boss_health(), BOSS_HEALTH);
        assert_eq!(round.ammo(), 0);
        assert_eq!(round.frame(), 0);
        assert_eq!(round.seconds_left(), 60);
        assert_eq!(round.outcome(), TickOutcome::Continue);
    }

    #[test]
    fn test_new_round_rejects_bad_level() {
        assert!(matches!(
            Round::new(&config(layout(100.0)), 1, 0),
            Err(LevelError::UnknownLevel { .. })
        ));

        let mut bad = layout(100.0);
        bad.platforms.clear();
        assert!(matches!(
            Round::new(&config(bad), 0, 0),
            Err(LevelError::NoPlatforms { level: 1 })
        ));
    }

    #[test]
    fn test_idle_round_continues() {
        let mut round = round(layout(100.0));
        for _ in 0..60 {
            assert_eq!(round.advance(&idle()), TickOutcome::Continue);
        }
        assert_eq!(round.player.pos.y, GROUND_Y);
        assert_eq!(round.frame(), 60);
        assert_eq!(round.seconds_left(), 59);
    }

    #[test]
    fn test_barrel_touch_without_hammer_loses() {
        let mut level = layout(100.0);
        level.barrels.push(Vec2::new(120.0, 675.0));
        let mut round = round(level);
        assert_eq!(round.advance(&idle()), TickOutcome::Lost(LossCause::Barrel));
    }

    #[test]
    fn test_barrel_touch_with_hammer_smashes() {
        let mut level = layout(100.0);
        level.hammers.push(Vec2::new(100.0, GROUND_Y));
        level.barrels.push(Vec2::new(300.0, 675.0));
        let mut round = round(level);

        assert_eq!(round.advance(&idle()), TickOutcome::Continue);
        assert!(round.player.holds_hammer());
        assert!(round.events().contains(&RoundEvent::HammerCollected));

        let mut smashed = false;
        for _ in 0..100 {
            assert_eq!(round.advance(&right()), TickOutcome::Continue);
            if round.events().contains(&RoundEvent::BarrelSmashed { barrel: 0 }) {
                smashed = true;
                break;
            }
        }
        assert!(smashed);
        assert_eq!(round.score(), BARREL_SMASH_SCORE);
        assert!(round.barrels.is_empty());
    }

    #[test]
    fn test_jump_over_barrel_scores_once_per_arc() {
        let mut level = layout(230.0);
        level.barrels.push(Vec2::new(300.0, 675.0));
        let mut round = round(level);

        let jump_right = TickInput {
            right: true,
            jump: true,
            ..Default::default()
        };
        assert_eq!(round.advance(&jump_right), TickOutcome::Continue);
        assert!(round.player.jumping);

        let mut credits = 0;
        for _ in 0..100 {
            assert_eq!(round.advance(&right()), TickOutcome::Continue);
            credits += round
                .events()
                .iter()
                .filter(|e| matches!(e, RoundEvent::BarrelJumped { .. }))
                .count();
            if !round.player.jumping {
                break;
            }
        }
        assert!(!round.player.jumping);
        assert_eq!(credits, 1);
        assert_eq!(round.score(), BARREL_JUMP_SCORE);

        // Landing re-arms the barrel: jump back over it
        round.player.pos.x = 370.0;
        let jump_left = TickInput {
            left: true,
            jump: true,
            ..Default::default()
        };
        let left = TickInput {
            left: true,
            ..Default::default()
        };
        assert_eq!(round.advance(&jump_left), TickOutcome::Continue);
        for _ in 0..100 {
            assert_eq!(round.advance(&left), TickOutcome::Continue);
            if !round.player.jumping {
                break;
            }
        }
        assert_eq!(round.score(), 2 * BARREL_JUMP_SCORE);
    }

    #[test]
    fn test_fire_needs_ammo_and_blaster() {
        let mut level = layout(100.0);
        level.blasters.push(Vec2::new(100.0, GROUND_Y));
        let mut round = round(level);

        // Pickup tick: ammo arrives after the fire step
        round.advance(&fire());
        assert!(round.bullets.is_empty());
        assert_eq!(round.ammo(), BLASTER_AMMO);

        for shot in 1..=BLASTER_AMMO {
            round.advance(&fire());
            assert!(round.events().contains(&RoundEvent::ShotFired));
            assert_eq!(round.ammo(), BLASTER_AMMO - shot);
        }

        let in_flight = round.bullets.len();
        round.advance(&fire());
        assert_eq!(round.ammo(), 0);
        assert!(!round.events().contains(&RoundEvent::ShotFired));
        assert!(round.bullets.len() <= in_flight);

        // No blaster, no shot
        let mut unarmed = self::round(layout(100.0));
        unarmed.advance(&fire());
        assert!(unarmed.bullets.is_empty());
    }

    #[test]
    fn test_hammer_pickup_empties_ammo() {
        let mut level = layout(100.0);
        level.blasters.push(Vec2::new(100.0, GROUND_Y));
        level.hammers.push(Vec2::new(200.0, GROUND_Y));
        let mut round = round(level);

        round.advance(&idle());
        assert_eq!(round.ammo(), BLASTER_AMMO);
        for _ in 0..40 {
            round.advance(&right());
            if round.player.holds_hammer() {
                break;
            }
        }
        assert!(round.player.holds_hammer());
        assert!(!round.player.holds_blaster());
        assert_eq!(round.ammo(), 0);
    }

    #[test]
    fn test_boss_shot_down_wins() {
        let mut level = layout(100.0);
        level.boss = Vec2::new(300.0, 655.0);
        level.blasters.push(Vec2::new(100.0, GROUND_Y));
        let mut round = round(level);

        round.advance(&idle());
        for _ in 0..BLASTER_AMMO {
            assert_eq!(round.advance(&fire()), TickOutcome::Continue);
        }

        let mut outcome = TickOutcome::Continue;
        for _ in 0..120 {
            outcome = round.advance(&idle());
            if outcome.is_over() {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::Won);
        assert_eq!(round.boss_health(), 0);
        assert!(round.bullets.is_empty());
    }

    #[test]
    fn test_reaching_boss_with_hammer_wins() {
        let mut level = layout(100.0);
        level.boss = Vec2::new(200.0, 655.0);
        level.hammers.push(Vec2::new(100.0, GROUND_Y));
        let mut round = round(level);

        let mut outcome = TickOutcome::Continue;
        for _ in 0..60 {
            outcome = round.advance(&right());
            if outcome.is_over() {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::Won);
    }

    #[test]
    fn test_reaching_boss_empty_handed_loses() {
        let mut level = layout(100.0);
        level.boss = Vec2::new(200.0, 655.0);
        let mut round = round(level);

        let mut outcome = TickOutcome::Continue;
        for _ in 0..60 {
            outcome = round.advance(&right());
            if outcome.is_over() {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::Lost(LossCause::Boss));
    }

    #[test]
    fn test_time_up_is_a_loss() {
        let mut cfg = config(layout(100.0));
        cfg.max_frames = 30;
        let mut round = Round::new(&cfg, 0, 0).unwrap();

        for _ in 0..29 {
            assert_eq!(round.advance(&idle()), TickOutcome::Continue);
        }
        assert_eq!(round.advance(&idle()), TickOutcome::Lost(LossCause::TimeUp));
        assert_eq!(round.seconds_left(), 0);
    }

    #[test]
    fn test_outcome_is_latched() {
        let mut level = layout(100.0);
        level.barrels.push(Vec2::new(120.0, 675.0));
        let mut round = round(level);

        let first = round.advance(&idle());
        assert!(first.is_over());
        let frame = round.frame();
        for _ in 0..5 {
            assert_eq!(round.advance(&right()), first);
        }
        assert_eq!(round.frame(), frame);
    }

    #[test]
    fn test_monkey_contact_without_hammer_loses() {
        let mut level = layout(100.0);
        level.monkeys.push(MonkeyRecord {
            position: Vec2::new(160.0, GROUND_Y),
            facing: Facing::Left,
            route: vec![500],
            kind: MonkeyKind::Normal,
        });
        let mut round = round(level);

        let mut outcome = TickOutcome::Continue;
        for _ in 0..100 {
            outcome = round.advance(&idle());
            if outcome.is_over() {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::Lost(LossCause::Monkey));
    }

    #[test]
    fn test_monkey_contact_with_hammer_stomps() {
        let mut level = layout(100.0);
        level.hammers.push(Vec2::new(100.0, GROUND_Y));
        level.monkeys.push(MonkeyRecord {
            position: Vec2::new(170.0, GROUND_Y),
            facing: Facing::Left,
            route: vec![500],
            kind: MonkeyKind::Normal,
        });
        let mut round = round(level);

        for _ in 0..100 {
            assert_eq!(round.advance(&idle()), TickOutcome::Continue);
            if round.monkeys[0].is_destroyed() {
                break;
            }
        }
        assert!(round.monkeys[0].is_destroyed());
        assert_eq!(round.score(), MONKEY_KILL_SCORE);
    }

    #[test]
    fn test_shot_monkey_takes_its_bananas_with_it() {
        let mut level = layout(100.0);
        level.blasters.push(Vec2::new(100.0, GROUND_Y));
        level.monkeys.push(MonkeyRecord {
            position: Vec2::new(250.0, GROUND_Y),
            facing: Facing::Left,
            route: vec![1000],
            kind: MonkeyKind::Intelligent,
        });
        let mut round = round(level);
        if let Some(launcher) = round.monkeys[0].launcher.as_mut() {
            launcher.cooldown = BANANA_FIRE_INTERVAL - 2;
        }

        round.advance(&idle());
        round.advance(&fire());
        assert!(round.events().contains(&RoundEvent::BananaFired { monkey: 0 }));
        assert!(round.events().contains(&RoundEvent::ShotFired));
        assert_eq!(round.monkeys[0].bananas().len(), 1);

        let mut shot = false;
        for _ in 0..100 {
            assert_eq!(round.advance(&idle()), TickOutcome::Continue);
            if round.events().contains(&RoundEvent::MonkeyShot { monkey: 0 }) {
                shot = true;
                break;
            }
        }
        assert!(shot);
        assert!(round.monkeys[0].bananas().is_empty());
        assert_eq!(round.score(), MONKEY_KILL_SCORE);

        // The banana that was heading for the player is gone for good
        for _ in 0..200 {
            assert_eq!(round.advance(&idle()), TickOutcome::Continue);
        }
    }

    #[test]
    fn test_banana_hit_loses() {
        let mut level = layout(100.0);
        level.monkeys.push(MonkeyRecord {
            position: Vec2::new(300.0, GROUND_Y),
            facing: Facing::Left,
            route: vec![1000],
            kind: MonkeyKind::Intelligent,
        });
        let mut round = round(level);
        if let Some(launcher) = round.monkeys[0].launcher.as_mut() {
            launcher.cooldown = BANANA_FIRE_INTERVAL - 1;
        }

        let mut outcome = TickOutcome::Continue;
        for _ in 0..200 {
            outcome = round.advance(&idle());
            if outcome.is_over() {
                break;
            }
        }
        assert_eq!(outcome, TickOutcome::Lost(LossCause::Banana));
    }

    fn walker(x: f32, kind: MonkeyKind) -> MonkeyRecord {
        MonkeyRecord {
            position: Vec2::new(x, GROUND_Y),
            facing: Facing::Left,
            route: vec![1000],
            kind,
        }
    }

    fn bullet_at(x: f32) -> Projectile {
        Projectile::new(ProjectileKind::Bullet, Vec2::new(x, GROUND_Y), Facing::Right)
    }

    #[test]
    fn test_bullet_hits_only_one_target() {
        // Two overlapping monkeys: only the first one dies
        let mut level = layout(100.0);
        level.monkeys.push(walker(400.0, MonkeyKind::Normal));
        level.monkeys.push(walker(401.0, MonkeyKind::Normal));
        let mut round = round(level);
        round.bullets.push(bullet_at(380.0));

        assert_eq!(round.advance(&idle()), TickOutcome::Continue);
        let destroyed = round.monkeys.iter().filter(|m| m.is_destroyed()).count();
        assert_eq!(destroyed, 1);
        assert!(round.monkeys[0].is_destroyed());
        assert_eq!(round.score(), MONKEY_KILL_SCORE);
        assert!(round.bullets.is_empty());

        // A monkey in front of the boss soaks up the shot
        let mut level = layout(100.0);
        level.boss = Vec2::new(400.0, 655.0);
        level.monkeys.push(walker(400.0, MonkeyKind::Normal));
        let mut round = self::round(level);
        round.bullets.push(bullet_at(380.0));

        assert_eq!(round.advance(&idle()), TickOutcome::Continue);
        assert!(round.monkeys[0].is_destroyed());
        assert_eq!(round.boss_health(), BOSS_HEALTH);
        assert!(!round.events().iter().any(|e| matches!(e, RoundEvent::BossHit { .. })));
        assert!(round.bullets.is_empty());
    }

    #[test]
    fn test_death_beats_win_same_tick() {
        let mut level = layout(100.0);
        level.boss = Vec2::new(150.0, 655.0);
        level.hammers.push(Vec2::new(100.0, GROUND_Y));
        level.monkeys.push(walker(700.0, MonkeyKind::Intelligent));
        let mut round = round(level);
        if let Some(launcher) = round.monkeys[0].launcher.as_mut() {
            launcher
                .bananas
                .push(Projectile::new(ProjectileKind::Banana, Vec2::new(110.0, GROUND_Y), Facing::Left));
        }

        assert_eq!(round.advance(&idle()), TickOutcome::Lost(LossCause::Banana));
        assert!(round.player.holds_hammer());
    }

    #[test]
    fn test_win_beats_time_up() {
        let mut level = layout(100.0);
        level.boss = Vec2::new(150.0, 655.0);
        level.hammers.push(Vec2::new(100.0, GROUND_Y));
        let mut cfg = config(level);
        cfg.max_frames = 1;
        let mut round = Round::new(&cfg, 0, 0).unwrap();

        assert_eq!(round.advance(&idle()), TickOutcome::Won);
        assert_eq!(round.frame(), 1);
    }

    #[test]
    fn test_render_order_and_culling() {
        let mut level = layout(100.0);
        level.hammers.push(Vec2::new(100.0, GROUND_Y));
        level.blasters.push(Vec2::new(600.0, GROUND_Y));
        level.barrels.push(Vec2::new(400.0, 675.0));
        let mut round = round(level);
        round.advance(&idle());

        let mut list = DrawList::new();
        round.render(&mut list);

        let order: Vec<_> = list.sprites().collect();
        assert_eq!(list.count(SpriteId::Platform), 16);
        assert_eq!(order[16], SpriteId::Barrel);
        // Collected hammer is not drawn
        assert_eq!(list.count(SpriteId::Hammer), 0);
        assert_eq!(order[17], SpriteId::Blaster);
        assert_eq!(order[18], SpriteId::Boss);
        assert_eq!(order[19], SpriteId::PlayerHammerRight);
        assert_eq!(order.len(), 20);
        assert_eq!(list.status(), Some(round.status()));
    }

    proptest! {
        #[test]
        fn prop_held_items_and_ammo_stay_consistent(
            inputs in prop::collection::vec(any::<(bool, bool, bool, bool)>(), 1..400),
        ) {
            let mut level = layout(300.0);
            level.hammers.push(Vec2::new(150.0, GROUND_Y));
            level.blasters.push(Vec2::new(450.0, GROUND_Y));
            level.hammers.push(Vec2::new(600.0, GROUND_Y));
            let mut round = round(level);

            let mut last_score = round.score();
            let mut last_health = round.boss_health();
            for (left, right, jump, fire) in inputs {
                let input = TickInput { left, right, jump, fire, ..Default::default() };
                round.advance(&input);

                prop_assert!(!(round.player.holds_hammer() && round.player.holds_blaster()));
                if round.player.holds_hammer() {
                    prop_assert_eq!(round.ammo(), 0);
                }
                prop_assert!(round.score() >= last_score);
                prop_assert!(round.boss_health() <= last_health);
                last_score = round.score();
                last_health = round.boss_health();
            }
        }
    }
}
