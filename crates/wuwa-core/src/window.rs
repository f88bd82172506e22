//! Window geometry tracking.
//!
//! Every resize and move is written straight through the config store.
//! Write failures are logged and otherwise ignored.

use wuwa_types::geometry::{WindowGeometry, WindowPosition, WindowSize};

use crate::config::{ConfigStore, Configuration};

/// Geometry to apply to the window at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestoredGeometry {
    /// `None` when the stored size is unusable; keep the toolkit default.
    pub size: Option<WindowSize>,
    pub position: WindowPosition,
}

/// Writes window geometry changes through to the config store.
#[derive(Debug, Default)]
pub struct WindowGeometryTracker {
    last: Option<WindowGeometry>,
}

impl WindowGeometryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Geometry the window had after the most recent signal.
    pub fn last(&self) -> Option<WindowGeometry> {
        self.last
    }

    pub fn on_resize(&mut self, store: &mut ConfigStore, width: i32, height: i32) {
        let size = WindowSize::new(width, height);
        log::debug!("Window resized to {width}x{height}");
        store.update_logged(|c| c.window_size = size);
        self.remember(store.config());
    }

    pub fn on_move(&mut self, store: &mut ConfigStore, x: i32, y: i32) {
        let position = WindowPosition::new(x, y);
        log::debug!("Window moved to ({x}, {y})");
        store.update_logged(|c| c.window_position = position);
        self.remember(store.config());
    }

    fn remember(&mut self, config: &Configuration) {
        self.last = Some(WindowGeometry {
            size: config.window_size,
            position: config.window_position,
        });
    }

    /// Stored geometry to restore, ignoring non-positive sizes.
    pub fn restore(config: &Configuration) -> RestoredGeometry {
        let size = config.window_size;
        if !size.is_usable() {
            log::warn!(
                "Ignoring stored window size {}x{}",
                size.width,
                size.height
            );
        }
        RestoredGeometry {
            size: size.is_usable().then_some(size),
            position: config.window_position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigDefaults, read_document};
    use serde_json::json;

    fn defaults() -> ConfigDefaults {
        ConfigDefaults::new(WindowSize::new(800, 600), WindowPosition::new(0, 0))
    }

    #[test]
    fn resize_and_move_persist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut store = ConfigStore::open(&path, &[], &defaults());
        let mut tracker = WindowGeometryTracker::new();

        tracker.on_resize(&mut store, 1280, 720);
        tracker.on_move(&mut store, -8, 30);

        let on_disk = read_document(&path).unwrap();
        assert_eq!(on_disk["window_size"], json!([1280, 720]));
        assert_eq!(on_disk["window_position"], json!([-8, 30]));
        assert_eq!(
            tracker.last(),
            Some(WindowGeometry {
                size: WindowSize::new(1280, 720),
                position: WindowPosition::new(-8, 30),
            })
        );
    }

    #[test]
    fn unwritable_store_still_updates_memory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();
        let mut store = ConfigStore::open(blocker.join("config.json"), &[], &defaults());
        let mut tracker = WindowGeometryTracker::new();
        tracker.on_resize(&mut store, 640, 480);
        assert_eq!(store.config().window_size, WindowSize::new(640, 480));
    }

    #[test]
    fn restore_skips_unusable_size() {
        let mut cfg = Configuration::with_defaults(&defaults());
        cfg.window_size = WindowSize::new(0, 600);
        cfg.window_position = WindowPosition::new(5, 6);
        let r = WindowGeometryTracker::restore(&cfg);
        assert_eq!(r.size, None);
        assert_eq!(r.position, WindowPosition::new(5, 6));

        cfg.window_size = WindowSize::new(1024, 768);
        assert_eq!(
            WindowGeometryTracker::restore(&cfg).size,
            Some(WindowSize::new(1024, 768))
        );
    }
}
