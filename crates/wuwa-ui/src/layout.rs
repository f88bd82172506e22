//! Layout helpers: rectangles and hit-testing.

/// Axis-aligned rectangle in window coordinates.
///
/// Coordinates are `f32` because animated widths are continuous.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    /// Half-open containment test: left/top edges inside, right/bottom outside.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Same rectangle with a different width, anchored at the left edge.
    pub fn with_width(self, w: f32) -> Self {
        Self { w, ..self }
    }
}
