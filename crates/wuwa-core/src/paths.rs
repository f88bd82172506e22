//! Filesystem layout of an installed launcher.
//!
//! ```text
//! <app root>/config.json                      preferences (primary)
//! <app root>/launcher.toml                    shell settings (optional)
//! <app root>/user_data/assets/ui_assets/      user backgrounds
//! <assets>/lang/<code>/messages.json          catalogs
//! <assets>/ui_assets/                         bundled backgrounds
//! <assets>/../config.json                     preferences (fallback)
//! ```
//!
//! The app root is the executable's directory and `<assets>` is
//! `<app root>/assets`, unless overridden through `WUWA_APP_ROOT` /
//! `WUWA_ASSETS_DIR`.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use wuwa_types::error::Result;

use crate::config::CONFIG_FILE_NAME;
use crate::settings::SETTINGS_FILE_NAME;

pub const APP_ROOT_ENV: &str = "WUWA_APP_ROOT";
pub const ASSETS_DIR_ENV: &str = "WUWA_ASSETS_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    app_root: PathBuf,
    assets_dir: PathBuf,
}

impl AppPaths {
    pub fn from_roots(app_root: impl Into<PathBuf>, assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            app_root: app_root.into(),
            assets_dir: assets_dir.into(),
        }
    }

    /// Paths derived from the running executable and the environment.
    pub fn discover() -> Result<Self> {
        let exe = std::env::current_exe()?;
        let exe_dir = exe.parent().unwrap_or(Path::new(".")).to_path_buf();
        Ok(Self::discover_with(&exe_dir, |key| std::env::var_os(key)))
    }

    /// Like [`discover`](Self::discover) with an explicit variable lookup.
    pub fn discover_with(exe_dir: &Path, lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);
        let app_root = non_empty(APP_ROOT_ENV).unwrap_or_else(|| exe_dir.to_path_buf());
        let assets_dir = non_empty(ASSETS_DIR_ENV).unwrap_or_else(|| app_root.join("assets"));
        Self {
            app_root,
            assets_dir,
        }
    }

    pub fn app_root(&self) -> &Path {
        &self.app_root
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Directory the assets were shipped in.
    pub fn base_dir(&self) -> &Path {
        self.assets_dir.parent().unwrap_or(&self.assets_dir)
    }

    pub fn config_file(&self) -> PathBuf {
        self.app_root.join(CONFIG_FILE_NAME)
    }

    pub fn config_fallbacks(&self) -> Vec<PathBuf> {
        vec![self.base_dir().join(CONFIG_FILE_NAME)]
    }

    pub fn settings_file(&self) -> PathBuf {
        self.app_root.join(SETTINGS_FILE_NAME)
    }

    pub fn lang_dir(&self) -> PathBuf {
        self.assets_dir.join("lang")
    }

    pub fn bundled_backgrounds(&self) -> PathBuf {
        self.assets_dir.join("ui_assets")
    }

    pub fn user_data_dir(&self) -> PathBuf {
        self.app_root.join("user_data")
    }

    pub fn user_backgrounds(&self) -> PathBuf {
        self.user_data_dir().join("assets").join("ui_assets")
    }

    /// Create the writable directories.
    pub fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.app_root)?;
        fs::create_dir_all(self.user_backgrounds())?;
        Ok(())
    }
}
