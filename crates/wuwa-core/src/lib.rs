//! WuWa launcher shell core.
//!
//! The stateful layer beneath the launcher's widgets: persisted preferences,
//! translation lookup, background resolution, the sidebar navigation state
//! machine and the application controller tying them together. Platform
//! I/O (pickers, process launch, popups) goes through `wuwa-platform`.

// Re-exports from wuwa-types.
pub use wuwa_types::error;
pub use wuwa_types::geometry;
pub use wuwa_types::input;

pub mod background;
pub mod config;
pub mod controller;
pub mod i18n;
pub mod navigation;
pub mod paths;
pub use wuwa_platform as platform;
pub mod settings;
pub mod window;

pub use controller::{ApplicationController, Presentation, ShellObserver};
