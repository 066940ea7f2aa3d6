//! Axis-aligned bounding boxes
//!
//! Screen space: x grows right, y grows down, so a box's `top` is its smallest y.
//! Boxes are derived on demand from an entity's centre and its sprite size and
//! are never stored.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Horizontal facing of anything that walks or flies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// A box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Box of the given size centred on `center`
    #[inline]
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// True iff the boxes overlap with positive area (touching edges do not count)
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Strictly inside the horizontal extent
    #[inline]
    pub fn spans_x(&self, x: f32) -> bool {
        x > self.left() && x < self.right()
    }
}

/// Where a point sits relative to a surface's top edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeContact {
    /// Within `tolerance` of the top edge, above or below
    pub on_top: bool,
    /// Inside the surface's horizontal extent, edges included
    pub within_span: bool,
}

impl EdgeContact {
    pub fn standing(&self) -> bool {
        self.on_top && self.within_span
    }
}

/// Classify `point` (usually an entity's feet) against `surface`'s top edge
pub fn edge_query(point: Vec2, surface: &Aabb, tolerance: f32) -> EdgeContact {
    EdgeContact {
        on_top: (point.y - surface.top()).abs() <= tolerance,
        within_span: point.x >= surface.left() && point.x <= surface.right(),
    }
}
