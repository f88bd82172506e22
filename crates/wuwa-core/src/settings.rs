//! Shell settings (`launcher.toml`).
//!
//! Optional, read-only tuning for the shell: sidebar metrics, the executable
//! name and the initial window. Every key has a built-in default.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use wuwa_types::error::{LauncherError, Result};
use wuwa_types::geometry::WindowSize;

use crate::navigation::SidebarMetrics;

/// File name of the settings file next to the executable.
pub const SETTINGS_FILE_NAME: &str = "launcher.toml";

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct ShellSettings {
    pub sidebar: SidebarSettings,
    pub game: GameSettings,
    pub window: WindowSettings,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SidebarSettings {
    #[serde(default = "default_collapsed_width")]
    pub collapsed_width: f32,
    #[serde(default = "default_expanded_width")]
    pub expanded_width: f32,
    #[serde(default = "default_margin")]
    pub margin: f32,
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u32,
}

fn default_collapsed_width() -> f32 {
    72.0
}
fn default_expanded_width() -> f32 {
    220.0
}
fn default_margin() -> f32 {
    16.0
}
fn default_transition_ms() -> u32 {
    250
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GameSettings {
    /// File name of the game executable inside the game directory.
    #[serde(default = "default_executable")]
    pub executable: String,
}

fn default_executable() -> String {
    "Wuthering Waves.exe".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WindowSettings {
    #[serde(default = "default_title")]
    pub title: String,
    /// First-run window size, before any geometry has been stored.
    #[serde(default = "default_window_width")]
    pub width: i32,
    #[serde(default = "default_window_height")]
    pub height: i32,
}

fn default_title() -> String {
    "Wuthering Waves Launcher".to_string()
}
fn default_window_width() -> i32 {
    800
}
fn default_window_height() -> i32 {
    600
}

impl Default for SidebarSettings {
    fn default() -> Self {
        Self {
            collapsed_width: default_collapsed_width(),
            expanded_width: default_expanded_width(),
            margin: default_margin(),
            transition_ms: default_transition_ms(),
        }
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            executable: default_executable(),
        }
    }
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: default_title(),
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

impl SidebarSettings {
    /// Runtime metrics. Invalid widths fall back to the defaults.
    pub fn metrics(&self) -> SidebarMetrics {
        let defaults = SidebarMetrics::default();
        let widths_ok = self.collapsed_width.is_finite()
            && self.expanded_width.is_finite()
            && self.collapsed_width >= 0.0
            && self.expanded_width >= self.collapsed_width;
        if !widths_ok {
            log::warn!(
                "Ignoring sidebar widths {} / {}",
                self.collapsed_width,
                self.expanded_width
            );
        }
        SidebarMetrics {
            collapsed_width: if widths_ok {
                self.collapsed_width
            } else {
                defaults.collapsed_width
            },
            expanded_width: if widths_ok {
                self.expanded_width
            } else {
                defaults.expanded_width
            },
            margin: if self.margin.is_finite() {
                self.margin.max(0.0)
            } else {
                defaults.margin
            },
            transition_ms: self.transition_ms,
        }
    }
}

impl WindowSettings {
    pub fn size(&self) -> WindowSize {
        let size = WindowSize::new(self.width, self.height);
        if size.is_usable() {
            size
        } else {
            WindowSize::new(default_window_width(), default_window_height())
        }
    }
}

impl ShellSettings {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(LauncherError::from)
    }

    /// Read `path`. A missing file yields defaults silently; a malformed one
    /// is logged and also yields defaults.
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No shell settings at {}", path.display());
                return Self::default();
            },
            Err(e) => {
                log::warn!("Cannot read {}: {e}", path.display());
                return Self::default();
            },
        };
        match Self::from_toml_str(&text) {
            Ok(settings) => {
                log::info!("Loaded shell settings from {}", path.display());
                settings
            },
            Err(e) => {
                log::warn!("{}: {e}; using built-in settings", path.display());
                Self::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let s = ShellSettings::from_toml_str("").unwrap();
        assert_eq!(s, ShellSettings::default());
        assert_eq!(s.game.executable, "Wuthering Waves.exe");
        assert_eq!(s.sidebar.metrics(), SidebarMetrics::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let s = ShellSettings::from_toml_str(
            r#"
            [sidebar]
            expanded_width = 260.0

            [game]
            executable = "Client-Win64-Shipping.exe"
            "#,
        )
        .unwrap();
        assert_eq!(s.sidebar.expanded_width, 260.0);
        assert_eq!(s.sidebar.collapsed_width, 72.0);
        assert_eq!(s.game.executable, "Client-Win64-Shipping.exe");
        assert_eq!(s.window.title, "Wuthering Waves Launcher");
    }

    #[test]
    fn malformed_toml_is_error() {
        let err = ShellSettings::from_toml_str("[sidebar\nmargin = 1").unwrap_err();
        assert!(matches!(err, LauncherError::TomlParse(_)));
    }

    #[test]
    fn load_missing_and_malformed_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE_NAME);
        assert_eq!(ShellSettings::load(&path), ShellSettings::default());
        fs::write(&path, "sidebar = 3").unwrap();
        assert_eq!(ShellSettings::load(&path), ShellSettings::default());
        fs::write(&path, "[window]\nwidth = 1280\nheight = 720\n").unwrap();
        assert_eq!(ShellSettings::load(&path).window.size(), WindowSize::new(1280, 720));
    }

    #[test]
    fn inverted_widths_use_defaults() {
        let s = SidebarSettings {
            collapsed_width: 300.0,
            expanded_width: 100.0,
            margin: -4.0,
            transition_ms: 100,
        };
        let m = s.metrics();
        assert_eq!(m.collapsed_width, 72.0);
        assert_eq!(m.expanded_width, 220.0);
        assert_eq!(m.margin, 0.0);
        assert_eq!(m.transition_ms, 100);
    }

    #[test]
    fn unusable_window_size_uses_default() {
        let w = WindowSettings {
            width: 0,
            ..WindowSettings::default()
        };
        assert_eq!(w.size(), WindowSize::new(800, 600));
    }
}
