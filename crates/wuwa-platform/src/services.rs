//! Platform service traits and desktop implementation.

use std::path::{Path, PathBuf};
use std::process::Command;

use wuwa_types::error::{LauncherError, Result};

// ---------------------------------------------------------------------------
// Dialog service
// ---------------------------------------------------------------------------

/// A named group of glob patterns shown in a file picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFilter {
    pub name: &'static str,
    pub patterns: &'static [&'static str],
}

impl FileFilter {
    /// Patterns joined the way native pickers expect (`*.png;*.jpg`).
    pub fn spec(&self) -> String {
        self.patterns.join(";")
    }
}

/// Abstraction over native, modal directory and file pickers.
///
/// Both pick calls block until the user answers. `Ok(None)` means the user
/// cancelled; `Err` means the picker itself failed.
pub trait DialogService {
    /// Whether a native picker exists on this platform at all.
    fn picker_available(&self) -> bool;

    /// Ask the user for a directory.
    fn pick_directory(&mut self, initial_dir: &Path, title: &str) -> Result<Option<PathBuf>>;

    /// Ask the user for an existing file matching one of `filters`.
    fn pick_file(
        &mut self,
        initial_dir: &Path,
        title: &str,
        filters: &[FileFilter],
    ) -> Result<Option<PathBuf>>;
}

// ---------------------------------------------------------------------------
// Launch service
// ---------------------------------------------------------------------------

/// Abstraction over starting the external game process.
pub trait LaunchService {
    /// Start `executable` with `working_dir` as its current directory.
    ///
    /// Fire-and-forget: the child is neither awaited nor tracked.
    fn spawn(&mut self, executable: &Path, working_dir: &Path) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Notification service
// ---------------------------------------------------------------------------

/// A user-visible message (title + body).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
}

/// Abstraction over the user-visible message surface (popups, toasts).
pub trait NotifyService {
    fn show_message(&mut self, title: &str, body: &str);
}

// ---------------------------------------------------------------------------
// Unified platform trait
// ---------------------------------------------------------------------------

/// Aggregate trait providing access to all platform services.
pub trait Platform: DialogService + LaunchService + NotifyService {}

impl<T: DialogService + LaunchService + NotifyService> Platform for T {}

// ---------------------------------------------------------------------------
// Desktop implementation
// ---------------------------------------------------------------------------

/// Default platform implementation using `std` facilities.
///
/// Native pickers exist on Windows only. Notifications are queued for the
/// front-end to drain and display.
#[derive(Debug, Default)]
pub struct DesktopPlatform {
    pending: Vec<Notification>,
}

impl DesktopPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every notification queued since the last call.
    pub fn take_messages(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}

impl DialogService for DesktopPlatform {
    fn picker_available(&self) -> bool {
        cfg!(windows)
    }

    #[cfg(windows)]
    fn pick_directory(&mut self, initial_dir: &Path, title: &str) -> Result<Option<PathBuf>> {
        crate::win_picker::pick(initial_dir, title, true, &[])
    }

    #[cfg(not(windows))]
    fn pick_directory(&mut self, _initial_dir: &Path, _title: &str) -> Result<Option<PathBuf>> {
        Err(LauncherError::Dialog(
            "native directory picker is not available on this platform".into(),
        ))
    }

    #[cfg(windows)]
    fn pick_file(
        &mut self,
        initial_dir: &Path,
        title: &str,
        filters: &[FileFilter],
    ) -> Result<Option<PathBuf>> {
        crate::win_picker::pick(initial_dir, title, false, filters)
    }

    #[cfg(not(windows))]
    fn pick_file(
        &mut self,
        _initial_dir: &Path,
        _title: &str,
        _filters: &[FileFilter],
    ) -> Result<Option<PathBuf>> {
        Err(LauncherError::Dialog(
            "native file picker is not available on this platform".into(),
        ))
    }
}

impl LaunchService for DesktopPlatform {
    fn spawn(&mut self, executable: &Path, working_dir: &Path) -> Result<()> {
        let child = Command::new(executable)
            .current_dir(working_dir)
            .spawn()
            .map_err(|e| LauncherError::Launch(format!("{}: {e}", executable.display())))?;
        log::info!(
            "Launched {} (pid {}) in {}",
            executable.display(),
            child.id(),
            working_dir.display()
        );
        // Dropping the handle detaches the child.
        Ok(())
    }
}

impl NotifyService for DesktopPlatform {
    fn show_message(&mut self, title: &str, body: &str) {
        log::info!("Notification: {title}: {body}");
        self.pending.push(Notification {
            title: title.to_string(),
            body: body.to_string(),
        });
    }
}
