//! Platform collaborators consumed by the launcher core.
//!
//! The core talks to the outside world only through the traits in
//! [`services`]: native pickers, the game process launcher and the
//! user-visible notification surface.

pub mod services;
#[cfg(windows)]
mod win_picker;

pub use services::{
    DesktopPlatform, DialogService, FileFilter, LaunchService, Notification, NotifyService,
    Platform,
};
