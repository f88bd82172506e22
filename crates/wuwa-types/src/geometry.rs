//! Window geometry value types.
//!
//! Both types persist as two-element JSON arrays (`[w, h]`, `[x, y]`).

use serde::{Deserialize, Serialize};

/// Outer window size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct WindowSize {
    pub width: i32,
    pub height: i32,
}

impl WindowSize {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// True when both sides are strictly positive.
    pub fn is_usable(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl From<[i32; 2]> for WindowSize {
    fn from([width, height]: [i32; 2]) -> Self {
        Self { width, height }
    }
}

impl From<WindowSize> for [i32; 2] {
    fn from(s: WindowSize) -> Self {
        [s.width, s.height]
    }
}

/// Window top-left corner in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[i32; 2]", into = "[i32; 2]")]
pub struct WindowPosition {
    pub x: i32,
    pub y: i32,
}

impl WindowPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<[i32; 2]> for WindowPosition {
    fn from([x, y]: [i32; 2]) -> Self {
        Self { x, y }
    }
}

impl From<WindowPosition> for [i32; 2] {
    fn from(p: WindowPosition) -> Self {
        [p.x, p.y]
    }
}

/// Size and position of the main window, as observed or as restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowGeometry {
    pub size: WindowSize,
    pub position: WindowPosition,
}
