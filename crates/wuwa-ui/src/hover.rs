//! Hover tracking shared by every pointer-sensitive component.
//!
//! A component opts in by implementing [`HoverSensitive`]; the
//! [`HoverTracker`] owns the "is the pointer inside" bit and calls through
//! the trait only when that bit flips.

use crate::layout::Rect;

/// Capability of reacting to the pointer entering or leaving a region.
pub trait HoverSensitive {
    /// The pointer moved into the region at `now_ms`.
    fn on_enter(&mut self, now_ms: u64);
    /// The pointer moved out of the region at `now_ms`.
    fn on_leave(&mut self, now_ms: u64);
}

/// Edge detector turning absolute pointer positions into enter/leave calls.
#[derive(Debug, Clone, Default)]
pub struct HoverTracker {
    inside: bool,
}

/// What a single pointer update did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverChange {
    Entered,
    Left,
    Unchanged,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last observed position was inside the region.
    pub fn is_inside(&self) -> bool {
        self.inside
    }

    /// Feed a pointer position against the region's current `bounds`.
    ///
    /// `bounds` is passed on every call because the region itself may be
    /// animating.
    pub fn update(
        &mut self,
        x: f32,
        y: f32,
        bounds: Rect,
        now_ms: u64,
        target: &mut dyn HoverSensitive,
    ) -> HoverChange {
        let inside = bounds.contains(x, y);
        if inside == self.inside {
            return HoverChange::Unchanged;
        }
        self.inside = inside;
        if inside {
            log::trace!("hover enter at ({x}, {y})");
            target.on_enter(now_ms);
            HoverChange::Entered
        } else {
            log::trace!("hover leave at ({x}, {y})");
            target.on_leave(now_ms);
            HoverChange::Left
        }
    }

    /// Force the tracker into the region (the toolkit reported an enter).
    pub fn force_inside(&mut self, now_ms: u64, target: &mut dyn HoverSensitive) -> HoverChange {
        if self.inside {
            return HoverChange::Unchanged;
        }
        self.inside = true;
        target.on_enter(now_ms);
        HoverChange::Entered
    }

    /// Force the tracker out of the region (pointer left the window).
    pub fn reset(&mut self, now_ms: u64, target: &mut dyn HoverSensitive) -> HoverChange {
        if !self.inside {
            return HoverChange::Unchanged;
        }
        self.inside = false;
        target.on_leave(now_ms);
        HoverChange::Left
    }
}
