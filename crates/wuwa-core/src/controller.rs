//! Application controller: composition root of the launcher shell.
//!
//! Owns the config store, localizer, navigation controller and geometry
//! tracker, and talks to the outside world only through a [`Platform`].
//! Every user-visible mutation ends with a [`Presentation`] pushed to the
//! subscribed observers.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use wuwa_platform::{FileFilter, Platform};
use wuwa_types::geometry::WindowGeometry;
use wuwa_ui::hover::{HoverChange, HoverTracker};

use crate::background;
use crate::config::{ConfigDefaults, ConfigStore, Configuration};
use crate::i18n::{DEFAULT_LANGUAGE, Localizer, normalize_code};
use crate::navigation::{NavigationController, NavigationState, ScreenId, SidebarItem};
use crate::paths::AppPaths;
use crate::settings::ShellSettings;
use crate::window::{RestoredGeometry, WindowGeometryTracker};

/// Filters offered by the background picker.
pub const IMAGE_FILTERS: [FileFilter; 2] = [
    FileFilter {
        name: "Image files",
        patterns: &["*.png", "*.jpg", "*.jpeg", "*.bmp", "*.gif"],
    },
    FileFilter {
        name: "All files",
        patterns: &["*.*"],
    },
];

/// Static labels included in every presentation, by catalog key.
pub const LABEL_KEYS: [&str; 7] = [
    "button.play",
    "settings.game_dir_label",
    "settings.select_folder",
    "settings.change_background",
    "settings.language_label",
    "screen.library.placeholder",
    "screen.store.placeholder",
];

/// Everything a front-end needs to draw the shell.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub title: String,
    pub language: &'static str,
    pub language_display: String,
    pub language_options: Vec<String>,
    pub labels: BTreeMap<&'static str, String>,
    pub status_text: String,
    pub game_dir: PathBuf,
    pub can_play: bool,
    pub background: Option<PathBuf>,
    pub navigation: NavigationState,
    pub sidebar_items: Vec<SidebarItem>,
    pub content_padding_left: f32,
}

impl Presentation {
    /// Translated label for `key`, or the key itself.
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.labels.get(key).map_or(key, String::as_str)
    }
}

/// Receiver of presentation snapshots.
pub trait ShellObserver {
    fn on_presentation(&mut self, presentation: &Presentation);
}

pub struct ApplicationController<P: Platform> {
    platform: P,
    paths: AppPaths,
    settings: ShellSettings,
    store: ConfigStore,
    localizer: Localizer,
    navigation: NavigationController,
    hover: HoverTracker,
    geometry: WindowGeometryTracker,
    window_height: f32,
    initial_dir: PathBuf,
    observers: Vec<Box<dyn ShellObserver>>,
}

impl<P: Platform> ApplicationController<P> {
    /// Load configuration and catalogs and settle the startup language.
    ///
    /// `window` is the window's actual geometry, used for fields a fresh
    /// configuration lacks.
    pub fn new(
        paths: AppPaths,
        settings: ShellSettings,
        window: WindowGeometry,
        platform: P,
    ) -> Self {
        if let Err(e) = paths.prepare() {
            log::warn!("Cannot create launcher directories: {e}");
        }
        let defaults = ConfigDefaults::new(window.size, window.position);
        let mut store =
            ConfigStore::open(paths.config_file(), &paths.config_fallbacks(), &defaults);

        let stored = store.config().language.clone();
        let requested = normalize_code(&stored).unwrap_or_else(|| {
            log::warn!("Stored language `{stored}` is not available, using {DEFAULT_LANGUAGE}");
            DEFAULT_LANGUAGE
        });
        let localizer = Localizer::new(paths.lang_dir(), requested);
        if store.config().language != localizer.current() {
            let active = localizer.current();
            store.update_logged(|c| c.language = active.to_string());
        }

        let initial_dir = initial_dir_for(store.config());
        let window_height = store.config().window_size.height as f32;
        let navigation = NavigationController::new(settings.sidebar.metrics());
        log::info!("Launcher ready (language {})", localizer.current());

        Self {
            platform,
            paths,
            settings,
            store,
            localizer,
            navigation,
            hover: HoverTracker::new(),
            geometry: WindowGeometryTracker::new(),
            window_height,
            initial_dir,
            observers: Vec::new(),
        }
    }

    // -- Accessors --------------------------------------------------------------

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    pub fn settings(&self) -> &ShellSettings {
        &self.settings
    }

    pub fn config(&self) -> &Configuration {
        self.store.config()
    }

    pub fn localizer(&self) -> &Localizer {
        &self.localizer
    }

    /// Directory the pickers open in.
    pub fn initial_dir(&self) -> &Path {
        &self.initial_dir
    }

    /// Window geometry to apply at startup.
    pub fn restored_geometry(&self) -> RestoredGeometry {
        WindowGeometryTracker::restore(self.store.config())
    }

    // -- Observers --------------------------------------------------------------

    /// Register an observer. It receives the current presentation at once.
    pub fn subscribe(&mut self, mut observer: Box<dyn ShellObserver>) {
        observer.on_presentation(&self.presentation());
        self.observers.push(observer);
    }

    fn publish(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let presentation = self.presentation();
        for observer in &mut self.observers {
            observer.on_presentation(&presentation);
        }
    }

    pub fn presentation(&self) -> Presentation {
        let labels = LABEL_KEYS
            .iter()
            .map(|&key| (key, self.translate(key, &[])))
            .collect();
        Presentation {
            title: self.settings.window.title.clone(),
            language: self.localizer.current(),
            language_display: self.localizer.display_name(self.localizer.current()),
            language_options: self.localizer.language_options(),
            labels,
            status_text: self.status_text(),
            game_dir: self.store.config().game_dir.clone(),
            can_play: self.can_play(),
            background: self.current_background_path(),
            navigation: self.navigation.state(),
            sidebar_items: self.navigation.sidebar_items(&self.localizer),
            content_padding_left: self.navigation.metrics().content_padding_left(),
        }
    }

    // -- Queries ----------------------------------------------------------------

    pub fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        self.localizer.translate(key, params)
    }

    pub fn current_background_path(&self) -> Option<PathBuf> {
        background::resolve(
            self.store.config(),
            &self.paths.user_backgrounds(),
            &self.paths.bundled_backgrounds(),
        )
    }

    pub fn navigation_state(&self) -> NavigationState {
        self.navigation.state()
    }

    fn game_dir(&self) -> Option<PathBuf> {
        let config = self.store.config();
        config
            .has_game_dir()
            .then(|| background::expand_tilde(&config.game_dir))
    }

    /// Full path of the game executable, when a directory is set.
    pub fn executable_path(&self) -> Option<PathBuf> {
        self.game_dir()
            .map(|dir| dir.join(&self.settings.game.executable))
    }

    /// The directory exists and holds the game executable.
    pub fn can_play(&self) -> bool {
        self.game_dir().is_some_and(|dir| dir.is_dir())
            && self.executable_path().is_some_and(|exe| exe.exists())
    }

    pub fn status_text(&self) -> String {
        match self.game_dir().filter(|dir| dir.exists()) {
            Some(dir) => {
                let path = dir.display().to_string();
                self.translate("status.set", &[("path", &path)])
            },
            None => self.translate("status.not_set", &[]),
        }
    }

    // -- Notifications ----------------------------------------------------------

    fn notify(&mut self, title_key: &str, message_key: &str, params: &[(&str, &str)]) {
        let title = self.translate(title_key, &[]);
        let body = self.translate(message_key, params);
        self.platform.show_message(&title, &body);
    }

    fn notify_error(&mut self, prefix: &str, error: &dyn std::fmt::Display) {
        let error = error.to_string();
        self.notify(
            &format!("{prefix}.title"),
            &format!("{prefix}.message"),
            &[("error", &error)],
        );
    }

    // -- Mutations --------------------------------------------------------------

    pub fn select_screen(&mut self, screen: ScreenId) {
        if self.navigation.select_screen(screen) {
            self.publish();
        }
    }

    /// Activate `code` (or the fallback) and persist the result.
    pub fn set_language(&mut self, code: &str) -> &'static str {
        let active = self.localizer.set_language(code);
        self.store.update_logged(|c| c.language = active.to_string());
        self.publish();
        active
    }

    /// Language chosen by display name. Unknown names and the current
    /// language are no-ops.
    pub fn select_language_display(&mut self, display: &str) -> bool {
        match self.localizer.code_for_display(display) {
            Some(code) if code != self.localizer.current() => {
                self.set_language(code);
                true
            },
            _ => false,
        }
    }

    /// Store the game directory. A file path is reduced to its directory;
    /// an empty path is ignored.
    pub fn set_game_directory(&mut self, path: &Path) {
        if path.as_os_str().is_empty() {
            return;
        }
        let mut selected = path.to_path_buf();
        if selected.is_file() {
            if let Some(parent) = selected.parent() {
                selected = parent.to_path_buf();
            }
        }
        log::info!("Game directory set to {}", selected.display());
        self.initial_dir = selected.clone();
        self.store.update_logged(|c| c.game_dir = selected);
        self.publish();
    }

    /// Install `source` as the background. Returns false (after telling the
    /// user) when the copy failed; the configuration is then unchanged.
    pub fn set_background_image(&mut self, source: &Path) -> bool {
        match background::install_background(source, &self.paths.user_backgrounds()) {
            Ok(dest) => {
                if let Some(parent) = source.parent().filter(|p| !p.as_os_str().is_empty()) {
                    self.initial_dir = parent.to_path_buf();
                }
                self.store.update_logged(|c| c.background_image = dest);
                self.publish();
                true
            },
            Err(e) => {
                log::warn!("Background install failed: {e}");
                self.notify_error("popup.save_error", &e);
                false
            },
        }
    }

    fn picker_unavailable(&mut self) -> bool {
        if self.platform.picker_available() {
            return false;
        }
        self.notify("popup.file_dialog.title", "popup.file_dialog.unsupported", &[]);
        true
    }

    /// Ask for the game directory through the native picker.
    pub fn choose_game_directory(&mut self) {
        if self.picker_unavailable() {
            return;
        }
        let title = self.translate("settings.select_folder", &[]);
        let initial = self.initial_dir.clone();
        match self.platform.pick_directory(&initial, &title) {
            Ok(Some(dir)) => self.set_game_directory(&dir),
            Ok(None) => log::debug!("Directory picker cancelled"),
            Err(e) => self.notify_error("popup.file_dialog.error", &e),
        }
    }

    /// Ask for a background image through the native picker.
    pub fn choose_background(&mut self) {
        if self.picker_unavailable() {
            return;
        }
        let title = self.translate("settings.change_background", &[]);
        let initial = self.initial_dir.clone();
        match self.platform.pick_file(&initial, &title, &IMAGE_FILTERS) {
            Ok(Some(file)) => {
                self.set_background_image(&file);
            },
            Ok(None) => log::debug!("Background picker cancelled"),
            Err(e) => self.notify_error("popup.file_dialog.error", &e),
        }
    }

    /// Start the game. Failures are reported to the user; the launcher
    /// keeps running either way.
    pub fn play(&mut self) -> bool {
        let target = self
            .game_dir()
            .zip(self.executable_path())
            .filter(|_| self.can_play());
        let Some((dir, exe)) = target else {
            self.notify("popup.no_game_file.title", "popup.no_game_file.message", &[]);
            return false;
        };
        match self.platform.spawn(&exe, &dir) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("{e}");
                self.notify_error("popup.launch_error", &e);
                false
            },
        }
    }

    // -- Pointer, timer and window plumbing ---------------------------------------

    /// Absolute pointer position in window coordinates.
    pub fn pointer_moved(&mut self, x: f32, y: f32, now_ms: u64) {
        let bounds = self.navigation.bounds(self.window_height);
        let change = self
            .hover
            .update(x, y, bounds, now_ms, &mut self.navigation);
        if change != HoverChange::Unchanged {
            self.publish();
        }
    }

    /// Click at an absolute position; selects the menu entry under it.
    pub fn pointer_clicked(&mut self, x: f32, y: f32) -> Option<ScreenId> {
        let screen = self.navigation.entry_at(x, y, self.window_height)?;
        self.select_screen(screen);
        Some(screen)
    }

    /// The toolkit reported the pointer entering the sidebar.
    pub fn pointer_enter(&mut self, now_ms: u64) {
        let tracked =
            self.hover.force_inside(now_ms, &mut self.navigation) != HoverChange::Unchanged;
        let direct = self.navigation.pointer_enter(now_ms);
        if tracked || direct {
            self.publish();
        }
    }

    /// The toolkit reported the pointer leaving the sidebar or the window.
    pub fn pointer_leave(&mut self, now_ms: u64) {
        let tracked = self.hover.reset(now_ms, &mut self.navigation) != HoverChange::Unchanged;
        let direct = self.navigation.pointer_leave(now_ms);
        if tracked || direct {
            self.publish();
        }
    }

    /// Animation timer. Returns whether the sidebar is still animating.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        let was_animating = self.navigation.is_animating();
        let changed = self.navigation.tick(now_ms);
        let animating = self.navigation.is_animating();
        if changed || animating != was_animating {
            self.publish();
        }
        animating
    }

    pub fn window_resized(&mut self, width: i32, height: i32) {
        self.window_height = height as f32;
        self.geometry.on_resize(&mut self.store, width, height);
    }

    pub fn window_moved(&mut self, x: i32, y: i32) {
        self.geometry.on_move(&mut self.store, x, y);
    }

    /// Final save on the way out.
    pub fn shutdown(&mut self) {
        log::info!("Shutting down");
        self.store.save_logged();
    }
}

/// The game directory when it exists, otherwise the home directory.
fn initial_dir_for(config: &Configuration) -> PathBuf {
    if config.has_game_dir() {
        let dir = background::expand_tilde(&config.game_dir);
        if dir.exists() {
            return dir;
        }
    }
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}
