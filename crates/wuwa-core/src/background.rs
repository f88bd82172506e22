//! Background image resolution and installation.
//!
//! Precedence: the explicitly configured image, then a `background.*` file in
//! the user asset directory, then one in the bundled asset directory. When
//! nothing matches the UI draws a solid fill.

use std::fs;
use std::path::{Path, PathBuf};

use wuwa_types::error::{LauncherError, Result};

use crate::config::Configuration;

/// File stem every installed or bundled background uses.
pub const BACKGROUND_BASENAME: &str = "background";

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

/// Pick the background to show. Only checks for existence; never mutates.
pub fn resolve(config: &Configuration, user_dir: &Path, bundled_dir: &Path) -> Option<PathBuf> {
    if !config.background_image.as_os_str().is_empty() {
        let mut candidate = expand_tilde(&config.background_image);
        if candidate.is_relative() {
            candidate = user_dir.join(candidate);
        }
        if candidate.exists() {
            return Some(candidate);
        }
        log::debug!(
            "Configured background {} not found",
            candidate.display()
        );
    }
    find_named(user_dir).or_else(|| find_named(bundled_dir))
}

fn is_background_name(name: &str) -> bool {
    name.strip_prefix(BACKGROUND_BASENAME)
        .is_some_and(|rest| rest.starts_with('.'))
}

/// First regular file in `dir` named `background.<anything>`, by file name.
pub fn find_named(dir: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    let mut matches: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter(|entry| entry.file_name().to_str().is_some_and(is_background_name))
        .map(|entry| entry.path())
        .collect();
    matches.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    matches.into_iter().next()
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Copy `source` into `user_dir` as `background.<ext>`.
///
/// The copy is staged beside the destination and renamed into place; only
/// then are the other `background.*` files removed, so a failed install
/// leaves the current image untouched. Returns the destination path.
pub fn install_background(source: &Path, user_dir: &Path) -> Result<PathBuf> {
    if !fs::metadata(source)?.is_file() {
        return Err(LauncherError::Persist(format!(
            "{} is not a file",
            source.display()
        )));
    }
    let file_name = match source.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{BACKGROUND_BASENAME}.{}", ext.to_ascii_lowercase()),
        None => BACKGROUND_BASENAME.to_string(),
    };
    let dest = user_dir.join(&file_name);
    fs::create_dir_all(user_dir)?;

    if same_file(source, &dest) {
        log::debug!("Background {} already installed", dest.display());
    } else {
        let staged = user_dir.join(format!(".{file_name}.partial"));
        if let Err(e) = fs::copy(source, &staged).and_then(|_| fs::rename(&staged, &dest)) {
            let _ = fs::remove_file(&staged);
            return Err(e.into());
        }
        log::info!("Installed background {} -> {}", source.display(), dest.display());
    }
    remove_other_backgrounds(user_dir, &dest);
    Ok(dest)
}

fn remove_other_backgrounds(user_dir: &Path, keep: &Path) {
    let Ok(entries) = fs::read_dir(user_dir) else {
        return;
    };
    for entry in entries.filter_map(|e| e.ok()) {
        let path = entry.path();
        let stale = entry.file_name().to_str().is_some_and(is_background_name)
            && entry.file_type().is_ok_and(|t| t.is_file())
            && !same_file(&path, keep);
        if stale {
            if let Err(e) = fs::remove_file(&path) {
                log::warn!("Could not remove old background {}: {e}", path.display());
            }
        }
    }
}
