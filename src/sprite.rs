//! Logical sprite identifiers and their bounding sizes
//!
//! The simulation never looks at pixels. Every entity draws one of these ids and
//! derives its bounding box from the fixed size registered for that id.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Every sprite the core can ask a renderer to draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    Platform,
    Ladder,
    Barrel,
    Hammer,
    Blaster,
    Boss,
    PlayerRight,
    PlayerLeft,
    PlayerHammerRight,
    PlayerHammerLeft,
    PlayerBlasterRight,
    PlayerBlasterLeft,
    NormalMonkeyRight,
    NormalMonkeyLeft,
    IntelligentMonkeyRight,
    IntelligentMonkeyLeft,
    Banana,
    BulletRight,
    BulletLeft,
}

impl SpriteId {
    pub const COUNT: usize = 19;

    pub const ALL: [SpriteId; Self::COUNT] = [
        SpriteId::Platform,
        SpriteId::Ladder,
        SpriteId::Barrel,
        SpriteId::Hammer,
        SpriteId::Blaster,
        SpriteId::Boss,
        SpriteId::PlayerRight,
        SpriteId::PlayerLeft,
        SpriteId::PlayerHammerRight,
        SpriteId::PlayerHammerLeft,
        SpriteId::PlayerBlasterRight,
        SpriteId::PlayerBlasterLeft,
        SpriteId::NormalMonkeyRight,
        SpriteId::NormalMonkeyLeft,
        SpriteId::IntelligentMonkeyRight,
        SpriteId::IntelligentMonkeyLeft,
        SpriteId::Banana,
        SpriteId::BulletRight,
        SpriteId::BulletLeft,
    ];

    /// Size used when the config does not override it
    pub fn default_size(self) -> Vec2 {
        match self {
            SpriteId::Platform => Vec2::new(64.0, 20.0),
            SpriteId::Ladder => Vec2::new(40.0, 80.0),
            SpriteId::Barrel => Vec2::new(30.0, 30.0),
            SpriteId::Hammer => Vec2::new(28.0, 28.0),
            SpriteId::Blaster => Vec2::new(32.0, 22.0),
            SpriteId::Boss => Vec2::new(90.0, 70.0),
            SpriteId::PlayerRight | SpriteId::PlayerLeft => Vec2::new(30.0, 40.0),
            SpriteId::PlayerHammerRight | SpriteId::PlayerHammerLeft => Vec2::new(50.0, 46.0),
            SpriteId::PlayerBlasterRight | SpriteId::PlayerBlasterLeft => Vec2::new(44.0, 40.0),
            SpriteId::NormalMonkeyRight
            | SpriteId::NormalMonkeyLeft
            | SpriteId::IntelligentMonkeyRight
            | SpriteId::IntelligentMonkeyLeft => Vec2::new(40.0, 40.0),
            SpriteId::Banana => Vec2::new(20.0, 14.0),
            SpriteId::BulletRight | SpriteId::BulletLeft => Vec2::new(16.0, 8.0),
        }
    }
}

/// Fixed width/height per sprite id
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteSizes {
    sizes: [Vec2; SpriteId::COUNT],
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            sizes: SpriteId::ALL.map(SpriteId::default_size),
        }
    }
}

impl SpriteSizes {
    /// Defaults with the given ids replaced
    pub fn with_overrides(overrides: &HashMap<SpriteId, Vec2>) -> Self {
        let mut sizes = Self::default();
        for (&id, &size) in overrides {
            sizes.set(id, size);
        }
        sizes
    }

    #[inline]
    pub fn get(&self, id: SpriteId) -> Vec2 {
        self.sizes[id as usize]
    }

    pub fn set(&mut self, id: SpriteId, size: Vec2) {
        self.sizes[id as usize] = size;
    }

    /// Half the registered height, the offset between a centre and its bottom edge
    #[inline]
    pub fn half_height(&self, id: SpriteId) -> f32 {
        self.get(id).y / 2.0
    }
}
