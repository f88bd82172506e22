//! wuwa-ui: interaction primitives that sit under any widget toolkit.
//!
//! Easing curves and absolute-time tweens for animated properties, a
//! rectangle type for hit-testing, and the shared hover tracker that turns
//! raw pointer positions into enter/leave notifications. Nothing here draws.

pub mod animation;
pub mod hover;
pub mod layout;

pub use animation::{Tween, interpolate};
pub use hover::{HoverChange, HoverSensitive, HoverTracker};
pub use layout::Rect;
