//! Layout primitives. Positions are purely cosmetic and never affect graph semantics.

use serde::{Deserialize, Serialize};

/// A 2D rectangle: origin plus size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// JSON has no encoding for NaN or infinity, so only finite rectangles survive a save.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Default placements for newly created nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Fixed rectangle of the entry node.
    pub entry: Rect,
    /// Rectangle given to every node created interactively.
    pub node: Rect,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            entry: Rect::new(100.0, 200.0, 100.0, 150.0),
            node: Rect::new(100.0, 100.0, 150.0, 200.0),
        }
    }
}
