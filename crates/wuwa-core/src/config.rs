//! Persisted launcher preferences (`config.json`).
//!
//! The document is read leniently: a missing or unparsable file falls back
//! to the next candidate, a field of the wrong shape is replaced by its
//! default, and unknown keys are carried through on every write. Nothing
//! in this module fails the startup path.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use wuwa_types::error::{LauncherError, Result};
use wuwa_types::geometry::{WindowPosition, WindowSize};

use crate::i18n::DEFAULT_LANGUAGE;

/// File name of the preferences document.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Key written by older launcher builds; read once, never written.
pub const LEGACY_GAME_PATH_KEY: &str = "game_path";

const KEY_GAME_DIR: &str = "game_dir";
const KEY_LANGUAGE: &str = "language";
const KEY_BACKGROUND: &str = "background_image";
const KEY_WINDOW_SIZE: &str = "window_size";
const KEY_WINDOW_POSITION: &str = "window_position";

/// The fully populated preferences document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    /// Directory containing the game executable. Empty when not chosen yet.
    pub game_dir: PathBuf,
    /// Interface language code, e.g. `pl_PL`.
    pub language: String,
    /// Explicitly chosen background image. Empty when not chosen.
    pub background_image: PathBuf,
    pub window_size: WindowSize,
    pub window_position: WindowPosition,
    /// Keys this build does not know about, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Values used for fields missing from the document.
///
/// Window geometry defaults are the window's actual values at first run, so
/// the front-end supplies them.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDefaults {
    pub language: String,
    pub window_size: WindowSize,
    pub window_position: WindowPosition,
}

impl ConfigDefaults {
    pub fn new(window_size: WindowSize, window_position: WindowPosition) -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            window_size,
            window_position,
        }
    }
}

impl Configuration {
    /// A configuration holding nothing but defaults.
    pub fn with_defaults(defaults: &ConfigDefaults) -> Self {
        Self {
            game_dir: PathBuf::new(),
            language: defaults.language.clone(),
            background_image: PathBuf::new(),
            window_size: defaults.window_size,
            window_position: defaults.window_position,
            extra: Map::new(),
        }
    }

    /// Build a configuration from a (migrated) document.
    ///
    /// Returns the configuration and whether any field had to be defaulted.
    pub fn from_document(mut doc: Map<String, Value>, defaults: &ConfigDefaults) -> (Self, bool) {
        let mut filled = false;
        let game_dir = take_field(&mut doc, KEY_GAME_DIR, &mut filled).unwrap_or_default();
        let language = take_field(&mut doc, KEY_LANGUAGE, &mut filled)
            .unwrap_or_else(|| defaults.language.clone());
        let background_image =
            take_field(&mut doc, KEY_BACKGROUND, &mut filled).unwrap_or_default();
        let window_size =
            take_field(&mut doc, KEY_WINDOW_SIZE, &mut filled).unwrap_or(defaults.window_size);
        let window_position = take_field(&mut doc, KEY_WINDOW_POSITION, &mut filled)
            .unwrap_or(defaults.window_position);
        // Migration normally removes it; never let it survive into a write.
        doc.remove(LEGACY_GAME_PATH_KEY);

        let config = Self {
            game_dir,
            language,
            background_image,
            window_size,
            window_position,
            extra: doc,
        };
        (config, filled)
    }

    /// Whether a game directory has been chosen.
    pub fn has_game_dir(&self) -> bool {
        !self.game_dir.as_os_str().is_empty()
    }
}

fn take_field<T: DeserializeOwned>(
    doc: &mut Map<String, Value>,
    key: &str,
    filled: &mut bool,
) -> Option<T> {
    let Some(raw) = doc.remove(key) else {
        log::debug!("config: `{key}` missing, using default");
        *filled = true;
        return None;
    };
    match serde_json::from_value(raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("config: `{key}` has an unexpected shape ({e}), using default");
            *filled = true;
            None
        },
    }
}

// -- Loading ------------------------------------------------------------------

/// Where the loaded document came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Primary,
    Fallback(PathBuf),
    /// No candidate parsed; started from an empty document.
    Empty,
}

/// Result of [`load_document`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDocument {
    pub document: Map<String, Value>,
    pub source: ConfigSource,
    /// True whenever the primary file did not supply the data.
    pub needs_write_back: bool,
}

/// Read and parse a single JSON object document.
pub fn read_document(path: &Path) -> Result<Map<String, Value>> {
    let text = fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&text)? {
        Value::Object(map) => Ok(map),
        other => Err(LauncherError::ConfigParse(format!(
            "{}: top level is {}, expected an object",
            path.display(),
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Load the preferences document from `primary`, else the first parsable
/// fallback. Never fails: with no usable candidate the document is empty.
pub fn load_document(primary: &Path, fallbacks: &[PathBuf]) -> LoadedDocument {
    let candidates = std::iter::once(primary).chain(
        fallbacks
            .iter()
            .map(PathBuf::as_path)
            .filter(|p| *p != primary),
    );
    for candidate in candidates {
        match read_document(candidate) {
            Ok(document) => {
                let is_primary = candidate == primary;
                let source = if is_primary {
                    ConfigSource::Primary
                } else {
                    ConfigSource::Fallback(candidate.to_path_buf())
                };
                return LoadedDocument {
                    document,
                    source,
                    needs_write_back: !is_primary,
                };
            },
            Err(LauncherError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("config: {} not present", candidate.display());
            },
            Err(e) => {
                log::warn!("config: ignoring {}: {e}", candidate.display());
            },
        }
    }
    LoadedDocument {
        document: Map::new(),
        source: ConfigSource::Empty,
        needs_write_back: true,
    }
}

/// Rewrite the legacy `game_path` key in place.
///
/// Returns true when the legacy key was present (and has now been removed).
pub fn migrate_legacy(doc: &mut Map<String, Value>) -> bool {
    let Some(legacy) = doc.remove(LEGACY_GAME_PATH_KEY) else {
        return false;
    };
    if !doc.contains_key(KEY_GAME_DIR) {
        if let Some(path) = legacy.as_str().filter(|s| !s.is_empty()) {
            let dir = legacy_game_dir(Path::new(path));
            log::info!(
                "config: migrated `{LEGACY_GAME_PATH_KEY}` to `{KEY_GAME_DIR}` = {}",
                dir.display()
            );
            doc.insert(
                KEY_GAME_DIR.to_string(),
                Value::String(dir.to_string_lossy().into_owned()),
            );
        }
    }
    true
}

/// The legacy key stored the executable itself; keep only its directory.
fn legacy_game_dir(legacy: &Path) -> PathBuf {
    if legacy.extension().is_none() {
        return legacy.to_path_buf();
    }
    match legacy.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

// -- Saving -------------------------------------------------------------------

/// Write `config` as pretty-printed UTF-8 JSON, creating the parent
/// directory when needed.
pub fn save(config: &Configuration, path: &Path) -> Result<()> {
    let persist = |e: &dyn std::fmt::Display| {
        LauncherError::Persist(format!("{}: {e}", path.display()))
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| persist(&e))?;
    }
    let mut text = serde_json::to_string_pretty(config).map_err(|e| persist(&e))?;
    text.push('\n');
    fs::write(path, text).map_err(|e| persist(&e))
}

// -- Store --------------------------------------------------------------------

/// What happened while opening the store.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub source: ConfigSource,
    pub migrated: bool,
    pub defaults_applied: bool,
    /// Whether a write-back was attempted.
    pub wrote_back: bool,
}

/// Owner of the in-memory configuration and its backing file.
///
/// Mutations apply in memory first and are persisted immediately after; a
/// failed write never rolls the in-memory value back.
#[derive(Debug)]
pub struct ConfigStore {
    path: PathBuf,
    config: Configuration,
    report: LoadReport,
}

impl ConfigStore {
    /// Load, migrate, default-fill and (when needed) write back.
    pub fn open(
        primary: impl Into<PathBuf>,
        fallbacks: &[PathBuf],
        defaults: &ConfigDefaults,
    ) -> Self {
        let path = primary.into();
        let LoadedDocument {
            mut document,
            source,
            needs_write_back,
        } = load_document(&path, fallbacks);
        let migrated = migrate_legacy(&mut document);
        let (config, defaults_applied) = Configuration::from_document(document, defaults);

        let wrote_back = needs_write_back || migrated || defaults_applied;
        let store = Self {
            path,
            config,
            report: LoadReport {
                source,
                migrated,
                defaults_applied,
                wrote_back,
            },
        };
        log::info!(
            "Loaded config from {:?} (migrated: {migrated}, defaults: {defaults_applied})",
            store.report.source
        );
        if wrote_back {
            store.save_logged();
        }
        store
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Apply `f` to the configuration, then persist.
    pub fn update<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Configuration),
    {
        f(&mut self.config);
        self.save()
    }

    /// Like [`update`](Self::update) but only logs a persist failure.
    pub fn update_logged<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Configuration),
    {
        f(&mut self.config);
        self.save_logged();
    }

    pub fn save(&self) -> Result<()> {
        save(&self.config, &self.path)
    }

    pub fn save_logged(&self) {
        if let Err(e) = self.save() {
            log::warn!("config: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn defaults() -> ConfigDefaults {
        ConfigDefaults::new(WindowSize::new(800, 600), WindowPosition::new(10, 20))
    }

    fn doc(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn legacy_executable_path_becomes_directory() {
        let mut d = doc(json!({ "game_path": "/a/b/Game.exe" }));
        assert!(migrate_legacy(&mut d));
        assert_eq!(d["game_dir"], json!("/a/b"));
        assert!(!d.contains_key("game_path"));
    }

    #[test]
    fn legacy_directory_kept_as_is() {
        let mut d = doc(json!({ "game_path": "/games/ww" }));
        migrate_legacy(&mut d);
        assert_eq!(d["game_dir"], json!("/games/ww"));
    }

    #[test]
    fn legacy_bare_file_name_yields_dot() {
        let mut d = doc(json!({ "game_path": "Game.exe" }));
        migrate_legacy(&mut d);
        assert_eq!(d["game_dir"], json!("."));
    }

    #[test]
    fn legacy_does_not_override_game_dir() {
        let mut d = doc(json!({ "game_path": "/old/Game.exe", "game_dir": "/new" }));
        assert!(migrate_legacy(&mut d));
        assert_eq!(d["game_dir"], json!("/new"));
        assert!(!d.contains_key("game_path"));
    }

    #[test]
    fn empty_legacy_value_is_dropped() {
        let mut d = doc(json!({ "game_path": "" }));
        assert!(migrate_legacy(&mut d));
        assert!(d.is_empty());
    }

    #[test]
    fn no_legacy_key_is_not_a_migration() {
        let mut d = doc(json!({ "game_dir": "/x" }));
        assert!(!migrate_legacy(&mut d));
    }

    #[test]
    fn empty_document_fills_everything() {
        let (cfg, filled) = Configuration::from_document(Map::new(), &defaults());
        assert!(filled);
        assert_eq!(cfg, Configuration::with_defaults(&defaults()));
        assert_eq!(cfg.language, "pl_PL");
        assert!(!cfg.has_game_dir());
    }

    #[test]
    fn wrong_shape_field_is_defaulted() {
        let d = doc(json!({
            "game_dir": "/g",
            "language": "en_US",
            "background_image": "",
            "window_size": "big",
            "window_position": [1, 2],
        }));
        let (cfg, filled) = Configuration::from_document(d, &defaults());
        assert!(filled);
        assert_eq!(cfg.window_size, WindowSize::new(800, 600));
        assert_eq!(cfg.window_position, WindowPosition::new(1, 2));
        assert_eq!(cfg.game_dir, PathBuf::from("/g"));
    }

    #[test]
    fn complete_document_is_not_dirty() {
        let d = doc(json!({
            "game_dir": "",
            "language": "en_US",
            "background_image": "",
            "window_size": [1024, 768],
            "window_position": [0, 0],
        }));
        let (_, filled) = Configuration::from_document(d, &defaults());
        assert!(!filled);
    }

    #[test]
    fn unknown_keys_survive_a_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let d = doc(json!({ "theme": { "accent": "teal" }, "language": "en_US" }));
        let (cfg, _) = Configuration::from_document(d, &defaults());
        save(&cfg, &path).unwrap();
        let back = read_document(&path).unwrap();
        assert_eq!(back["theme"], json!({ "accent": "teal" }));
        assert_eq!(back["language"], json!("en_US"));
    }

    #[test]
    fn save_creates_parent_and_keeps_non_ascii() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let mut cfg = Configuration::with_defaults(&defaults());
        cfg.game_dir = PathBuf::from("/gry/Łódź");
        save(&cfg, &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("Łódź"));
        assert!(text.contains("\n  \"game_dir\""));
        assert!(text.contains("\"window_size\": [\n    800,\n    600\n  ]"));
    }

    #[test]
    fn save_into_a_file_path_is_persist_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let cfg = Configuration::with_defaults(&defaults());
        let err = save(&cfg, &blocker.join("config.json")).unwrap_err();
        assert!(matches!(err, LauncherError::Persist(_)));
    }

    #[test]
    fn load_prefers_primary() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("config.json");
        let fallback = dir.path().join("bundled.json");
        fs::write(&primary, r#"{"language": "en_US"}"#).unwrap();
        fs::write(&fallback, r#"{"language": "pl_PL"}"#).unwrap();
        let loaded = load_document(&primary, &[fallback]);
        assert_eq!(loaded.source, ConfigSource::Primary);
        assert!(!loaded.needs_write_back);
        assert_eq!(loaded.document["language"], json!("en_US"));
    }

    #[test]
    fn unparsable_primary_uses_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("config.json");
        let fallback = dir.path().join("bundled.json");
        fs::write(&primary, "{ not json").unwrap();
        fs::write(&fallback, r#"{"game_dir": "/g"}"#).unwrap();
        let loaded = load_document(&primary, &[fallback.clone()]);
        assert_eq!(loaded.source, ConfigSource::Fallback(fallback));
        assert!(loaded.needs_write_back);
    }

    #[test]
    fn non_object_document_is_unparsable() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("config.json");
        fs::write(&primary, "[1, 2]").unwrap();
        assert!(matches!(
            read_document(&primary),
            Err(LauncherError::ConfigParse(_))
        ));
        let loaded = load_document(&primary, &[]);
        assert_eq!(loaded.source, ConfigSource::Empty);
        assert!(loaded.document.is_empty());
        assert!(loaded.needs_write_back);
    }

    #[test]
    fn fallback_equal_to_primary_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("config.json");
        let loaded = load_document(&primary, &[primary.clone()]);
        assert_eq!(loaded.source, ConfigSource::Empty);
    }

    #[test]
    fn open_writes_back_migrated_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"game_path": "/a/b/Game.exe", "language": "en_US"}"#).unwrap();
        let store = ConfigStore::open(&path, &[], &defaults());
        assert!(store.report().migrated);
        assert!(store.report().wrote_back);
        assert_eq!(store.config().game_dir, PathBuf::from("/a/b"));

        let on_disk = read_document(&path).unwrap();
        assert!(!on_disk.contains_key("game_path"));
        assert_eq!(on_disk["game_dir"], json!("/a/b"));
        assert_eq!(on_disk["window_size"], json!([800, 600]));
    }

    #[test]
    fn open_complete_primary_does_not_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let original = concat!(
            r#"{"game_dir":"","language":"en_US","background_image":"","#,
            r#""window_size":[1,1],"window_position":[0,0]}"#,
        );
        fs::write(&path, original).unwrap();
        let store = ConfigStore::open(&path, &[], &defaults());
        assert!(!store.report().wrote_back);
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn failed_update_keeps_in_memory_value() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let mut store = ConfigStore::open(blocker.join("config.json"), &[], &defaults());
        let res = store.update(|c| c.language = "en_US".into());
        assert!(res.is_err());
        assert_eq!(store.config().language, "en_US");
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn arb_config() -> impl Strategy<Value = Configuration> {
            (
                "[a-zA-Z0-9/ _.-]{0,24}",
                proptest::sample::select(vec!["pl_PL", "en_US", "de_DE"]),
                "[a-zA-Z0-9/ _.-]{0,24}",
                any::<[i32; 2]>(),
                any::<[i32; 2]>(),
                proptest::collection::btree_map("x_[a-z]{1,8}", any::<i64>(), 0..3),
            )
                .prop_map(|(dir, lang, bg, size, pos, extra)| Configuration {
                    game_dir: PathBuf::from(dir),
                    language: lang.to_string(),
                    background_image: PathBuf::from(bg),
                    window_size: size.into(),
                    window_position: pos.into(),
                    extra: extra.into_iter().map(|(k, v)| (k, Value::from(v))).collect(),
                })
        }

        proptest! {
            #[test]
            fn save_load_save_round_trip(cfg in arb_config()) {
                let dir = tempfile::tempdir().unwrap();
                let path = dir.path().join("config.json");
                save(&cfg, &path).unwrap();
                let loaded = load_document(&path, &[]);
                let (back, filled) = Configuration::from_document(loaded.document, &defaults());
                prop_assert!(!filled);
                save(&back, &path).unwrap();
                let again = load_document(&path, &[]);
                let (again, _) = Configuration::from_document(again.document, &defaults());
                prop_assert_eq!(again, cfg);
            }
        }
    }
}
