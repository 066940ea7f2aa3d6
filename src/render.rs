//! Drawing seam
//!
//! The simulation never touches pixels. A frontend implements `Renderer` and
//! receives one call per visible entity plus the status line; `DrawList`
//! records the calls for headless runs and tests.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sprite::SpriteId;

/// Numbers shown in the HUD
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    pub score: u32,
    pub boss_health: u32,
    pub ammo: u32,
    pub seconds_left: u32,
}

/// Draw-at-position primitive supplied by the frontend
pub trait Renderer {
    /// Draw `sprite` centred on `pos`
    fn draw_sprite(&mut self, sprite: SpriteId, pos: Vec2);

    fn draw_status(&mut self, status: &StatusLine);
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    Sprite { sprite: SpriteId, pos: Vec2 },
    Status(StatusLine),
}

/// A renderer that just remembers what it was asked to draw
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Sprite ids in draw order
    pub fn sprites(&self) -> impl Iterator<Item = SpriteId> + '_ {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Sprite { sprite, .. } => Some(*sprite),
            DrawCommand::Status(_) => None,
        })
    }

    pub fn count(&self, sprite: SpriteId) -> usize {
        self.sprites().filter(|&s| s == sprite).count()
    }

    /// The most recent status line, if any
    pub fn status(&self) -> Option<StatusLine> {
        self.commands.iter().rev().find_map(|cmd| match cmd {
            DrawCommand::Status(status) => Some(*status),
            DrawCommand::Sprite { .. } => None,
        })
    }
}

impl Renderer for DrawList {
    fn draw_sprite(&mut self, sprite: SpriteId, pos: Vec2) {
        self.commands.push(DrawCommand::Sprite { sprite, pos });
    }

    fn draw_status(&mut self, status: &StatusLine) {
        self.commands.push(DrawCommand::Status(*status));
    }
}
