//! Platform-agnostic input events.
//!
//! Every front-end maps its native pointer, window and timer signals to
//! these enums. The core never sees raw toolkit events.

/// A platform-agnostic shell event, processed serially on the event thread.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to an absolute window position.
    CursorMove { x: i32, y: i32 },
    /// Pointer entered a hover-sensitive region.
    PointerEnter,
    /// Pointer left a hover-sensitive region.
    PointerLeave,
    /// Pointer click at an absolute window position.
    PointerClick { x: i32, y: i32 },
    /// The window was resized.
    WindowResized { width: i32, height: i32 },
    /// The window was moved.
    WindowMoved { x: i32, y: i32 },
    /// Periodic animation timer fired. Carries the monotonic timestamp.
    Tick { now_ms: u64 },
    /// User requested quit (window close, etc.).
    Quit,
}

impl InputEvent {
    /// True for events that only concern the window frame.
    pub fn is_window_event(&self) -> bool {
        matches!(
            self,
            Self::WindowResized { .. } | Self::WindowMoved { .. }
        )
    }
}
