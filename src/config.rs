//! Level configuration
//!
//! A game config is a JSON document with screen settings and one layout per
//! level. Everything is validated on load so that a round is never built from
//! a half-usable layout.

use std::collections::HashMap;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DEFAULT_FPS;
use crate::sim::{Bounds, Facing, MonkeyKind};
use crate::sprite::{SpriteId, SpriteSizes};

/// Everything that can be wrong with a config
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("Failed to read config '{path}': {details}")]
    Read { path: String, details: String },

    #[error("Parse error in config: {0}")]
    Parse(String),

    #[error("Config lists no levels")]
    NoLevels,

    #[error("Level {level} requested but only {count} configured")]
    UnknownLevel { level: usize, count: usize },

    #[error("Screen size must be positive, got {width}x{height}")]
    BadScreen { width: f32, height: f32 },

    #[error("fps must be positive")]
    ZeroFps,

    #[error("max_frames must be positive")]
    ZeroFrameBudget,

    #[error("Level {level} has no platforms")]
    NoPlatforms { level: usize },

    #[error("Level {level}: {what} has a non-finite coordinate")]
    NonFinite { level: usize, what: String },

    #[error("Level {level}: monkey {monkey} has an empty route")]
    EmptyRoute { level: usize, monkey: usize },

    #[error("Level {level}: monkey {monkey} route segment {segment} is zero")]
    ZeroSegment { level: usize, monkey: usize, segment: usize },
}

/// A patrolling monkey's starting record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonkeyRecord {
    pub position: Vec2,
    #[serde(default)]
    pub facing: Facing,
    /// Segment lengths in pixels, walked in order and then repeated
    pub route: Vec<u32>,
    #[serde(default)]
    pub kind: MonkeyKind,
}

/// Starting positions for one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub player: Vec2,
    pub boss: Vec2,
    #[serde(default)]
    pub barrels: Vec<Vec2>,
    #[serde(default)]
    pub ladders: Vec<Vec2>,
    pub platforms: Vec<Vec2>,
    #[serde(default)]
    pub hammers: Vec<Vec2>,
    #[serde(default)]
    pub blasters: Vec<Vec2>,
    #[serde(default)]
    pub monkeys: Vec<MonkeyRecord>,
}

impl LevelLayout {
    /// `level` is the 1-based number used in error messages
    fn validate(&self, level: usize) -> Result<(), LevelError> {
        if self.platforms.is_empty() {
            return Err(LevelError::NoPlatforms { level });
        }

        let groups: [(&str, &[Vec2]); 6] = [
            ("barrel", self.barrels.as_slice()),
            ("ladder", self.ladders.as_slice()),
            ("platform", self.platforms.as_slice()),
            ("hammer", self.hammers.as_slice()),
            ("blaster", self.blasters.as_slice()),
            ("player", std::slice::from_ref(&self.player)),
        ];
        for (name, positions) in groups {
            if let Some(i) = positions.iter().position(|p| !p.is_finite()) {
                return Err(LevelError::NonFinite {
                    level,
                    what: format!("{} {}", name, i),
                });
            }
        }
        if !self.boss.is_finite() {
            return Err(LevelError::NonFinite {
                level,
                what: "boss".to_string(),
            });
        }

        for (monkey, record) in self.monkeys.iter().enumerate() {
            if !record.position.is_finite() {
                return Err(LevelError::NonFinite {
                    level,
                    what: format!("monkey {}", monkey),
                });
            }
            if record.route.is_empty() {
                return Err(LevelError::EmptyRoute { level, monkey });
            }
            if let Some(segment) = record.route.iter().position(|&len| len == 0) {
                return Err(LevelError::ZeroSegment { level, monkey, segment });
            }
        }
        Ok(())
    }
}

fn default_fps() -> u32 {
    DEFAULT_FPS
}

/// Whole-game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Frames each level may run before time is up
    pub max_frames: u32,
    #[serde(default)]
    pub sprite_sizes: HashMap<SpriteId, Vec2>,
    pub levels: Vec<LevelLayout>,
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let config: GameConfig = serde_json::from_str(json).map_err(|e| LevelError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| LevelError::Read {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!(
            "Loaded {} level(s) from {} ({}x{} @ {} fps)",
            config.levels.len(),
            path.display(),
            config.width,
            config.height,
            config.fps
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LevelError> {
        if !(self.width > 0.0 && self.height > 0.0) {
            return Err(LevelError::BadScreen {
                width: self.width,
                height: self.height,
            });
        }
        if self.fps == 0 {
            return Err(LevelError::ZeroFps);
        }
        if self.max_frames == 0 {
            return Err(LevelError::ZeroFrameBudget);
        }
        if self.levels.is_empty() {
            return Err(LevelError::NoLevels);
        }
        for (i, layout) in self.levels.iter().enumerate() {
            layout.validate(i + 1)?;
        }
        Ok(())
    }

    /// Layout for a 0-based level index
    pub fn level(&self, index: usize) -> Result<&LevelLayout, LevelError> {
        self.levels.get(index).ok_or(LevelError::UnknownLevel {
            level: index + 1,
            count: self.levels.len(),
        })
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width, self.height)
    }

    pub fn sprite_sizes(&self) -> SpriteSizes {
        SpriteSizes::with_overrides(&self.sprite_sizes)
    }
}
