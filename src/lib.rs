//! Shadow Kong - barrel-and-ladder platformer simulation core
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (physics, collisions, round state)
//! - `config`: Level layout records and validation
//! - `sprite`: Logical sprite ids and their fixed bounding sizes
//! - `render`: Draw-at-position seam consumed by an external renderer
//! - `campaign`: Level progression and weighted final score

pub mod campaign;
pub mod config;
pub mod render;
pub mod sim;
pub mod sprite;

pub use campaign::{Campaign, CampaignResult, CampaignStatus};
pub use config::{GameConfig, LevelError, LevelLayout};
pub use sim::{Round, TickInput, TickOutcome};

/// Game configuration constants
///
/// Units are pixels and frames; every speed is per tick.
pub mod consts {
    /// Simulation rate used when the config does not override it
    pub const DEFAULT_FPS: u32 = 60;

    /// Player movement
    pub const PLAYER_GRAVITY: f32 = 0.2;
    pub const PLAYER_TERMINAL_VELOCITY: f32 = 10.0;
    pub const PLAYER_JUMP_IMPULSE: f32 = -5.0;
    pub const PLAYER_WALK_SPEED: f32 = 3.5;
    pub const PLAYER_CLIMB_SPEED: f32 = 2.0;
    /// Feet this close to a ladder's top may step down onto it
    pub const LADDER_GRAB_TOLERANCE: f32 = 1.0;
    /// How far above a barrel's top the player's feet may be and still score the jump
    pub const JUMP_OVER_CLOSENESS: f32 = 62.5;

    /// Falling props
    pub const BOSS_GRAVITY: f32 = 0.4;
    pub const BOSS_TERMINAL_VELOCITY: f32 = 5.0;
    pub const BARREL_GRAVITY: f32 = 0.4;
    pub const BARREL_TERMINAL_VELOCITY: f32 = 5.0;
    pub const LADDER_GRAVITY: f32 = 0.25;
    pub const LADDER_TERMINAL_VELOCITY: f32 = 5.0;

    /// Monkeys
    pub const MONKEY_GRAVITY: f32 = 0.4;
    pub const MONKEY_TERMINAL_VELOCITY: f32 = 5.0;
    pub const MONKEY_INITIAL_FALL: f32 = 0.4;
    pub const MONKEY_WALK_SPEED: f32 = 0.5;
    /// Feet within this distance of a platform top count as standing on it
    pub const MONKEY_HEIGHT_TOLERANCE: f32 = 1.0;
    pub const BANANA_FIRE_INTERVAL: u32 = 300;

    /// Projectiles
    pub const BANANA_SPEED: f32 = 1.8;
    pub const BANANA_RANGE: f32 = 300.0;
    pub const BULLET_SPEED: f32 = 3.8;
    pub const BULLET_RANGE: f32 = 300.0;

    /// Scoring
    pub const BARREL_JUMP_SCORE: u32 = 30;
    pub const BARREL_SMASH_SCORE: u32 = 100;
    pub const MONKEY_KILL_SCORE: u32 = 100;
    pub const POINTS_WEIGHT: f64 = 1.0;
    pub const TIME_WEIGHT: f64 = 3.0;

    /// Round bookkeeping
    pub const BOSS_HEALTH: u32 = 5;
    pub const BLASTER_AMMO: u32 = 5;

    /// Ladders settle at load; give up after this many steps
    pub const LADDER_SETTLE_LIMIT: u32 = 10_000;
}
