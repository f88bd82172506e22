//! Language catalogs and translation lookup.
//!
//! Two catalogs are held at any time: the active one, swapped wholesale on
//! every language change, and the `en_US` fallback loaded once at startup.
//! A lookup tries the active catalog, then the fallback, then returns the
//! key itself.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use wuwa_types::error::{LauncherError, Result};

/// Languages this build ships catalogs for, in display order.
pub const AVAILABLE_LANGUAGES: [&str; 2] = ["pl_PL", "en_US"];

/// Language of a fresh configuration.
pub const DEFAULT_LANGUAGE: &str = "pl_PL";

/// Language substituted when the requested one is unknown or unusable.
pub const FALLBACK_LANGUAGE: &str = "en_US";

/// File name of a catalog inside `<lang_dir>/<code>/`.
pub const CATALOG_FILE_NAME: &str = "messages.json";

/// Key -> template pairs for one language.
pub type Catalog = HashMap<String, String>;

/// Map a user- or config-supplied code onto an available language.
///
/// Surrounding whitespace is ignored, `-` is accepted for `_`, and the match
/// is case-insensitive (`en-us` -> `en_US`).
pub fn normalize_code(code: &str) -> Option<&'static str> {
    let wanted = code.trim().replace('-', "_");
    AVAILABLE_LANGUAGES
        .iter()
        .copied()
        .find(|lang| lang.eq_ignore_ascii_case(&wanted))
}

/// Load `<lang_dir>/<code>/messages.json`.
///
/// Entries whose value is not a string are skipped.
pub fn load_catalog(lang_dir: &Path, code: &str) -> Result<Catalog> {
    let path = lang_dir.join(code).join(CATALOG_FILE_NAME);
    let text = fs::read_to_string(&path)
        .map_err(|e| LauncherError::CatalogLoad(format!("{}: {e}", path.display())))?;
    let value: Value = serde_json::from_str(&text)
        .map_err(|e| LauncherError::CatalogLoad(format!("{}: {e}", path.display())))?;
    let Value::Object(entries) = value else {
        return Err(LauncherError::CatalogLoad(format!(
            "{}: expected a JSON object",
            path.display()
        )));
    };
    let mut catalog = Catalog::with_capacity(entries.len());
    for (key, value) in entries {
        match value {
            Value::String(template) => {
                catalog.insert(key, template);
            },
            other => log::warn!("{}: skipping non-string entry `{key}` ({other})", path.display()),
        }
    }
    Ok(catalog)
}

fn load_or_empty(lang_dir: &Path, code: &str) -> Catalog {
    match load_catalog(lang_dir, code) {
        Ok(catalog) => catalog,
        Err(e) => {
            log::warn!("{e}");
            Catalog::new()
        },
    }
}

/// Substitute `{name}` placeholders from `params`.
///
/// `{{` and `}}` produce literal braces. Returns `None` when a placeholder
/// names a missing parameter, is positional (`{}` / `{0}`), carries a
/// format spec or conversion, or when braces are unbalanced.
pub fn format_template(template: &str, params: &[(&str, &str)]) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            },
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next()? {
                        '}' => break,
                        '{' => return None,
                        ch => name.push(ch),
                    }
                }
                if !is_named_field(&name) {
                    return None;
                }
                let (_, value) = params.iter().find(|(key, _)| *key == name)?;
                out.push_str(value);
            },
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            },
            '}' => return None,
            ch => out.push(ch),
        }
    }
    Some(out)
}

fn is_named_field(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {
            chars.all(|c| c.is_alphanumeric() || c == '_')
        },
        _ => false,
    }
}

/// Translation resolver with a fixed fallback catalog.
#[derive(Debug)]
pub struct Localizer {
    lang_dir: PathBuf,
    current: &'static str,
    active: Catalog,
    fallback: Catalog,
    display_by_code: Vec<(&'static str, String)>,
    code_by_display: HashMap<String, &'static str>,
}

impl Localizer {
    /// Load the fallback catalog, then activate `initial`.
    pub fn new(lang_dir: impl Into<PathBuf>, initial: &str) -> Self {
        let lang_dir = lang_dir.into();
        let fallback = load_or_empty(&lang_dir, FALLBACK_LANGUAGE);
        let mut localizer = Self {
            lang_dir,
            current: FALLBACK_LANGUAGE,
            active: Catalog::new(),
            fallback,
            display_by_code: Vec::new(),
            code_by_display: HashMap::new(),
        };
        localizer.set_language(initial);
        localizer
    }

    /// Languages offered to the user.
    pub fn available(&self) -> &'static [&'static str] {
        &AVAILABLE_LANGUAGES
    }

    /// The language actually active.
    pub fn current(&self) -> &'static str {
        self.current
    }

    pub fn lang_dir(&self) -> &Path {
        &self.lang_dir
    }

    /// Switch the active catalog. Never fails; returns the code now active.
    ///
    /// Unknown codes and empty catalogs both end on the fallback language.
    pub fn set_language(&mut self, code: &str) -> &'static str {
        let mut target = normalize_code(code).unwrap_or_else(|| {
            log::warn!("Unknown language `{code}`, using {FALLBACK_LANGUAGE}");
            FALLBACK_LANGUAGE
        });
        let mut catalog = load_or_empty(&self.lang_dir, target);
        if catalog.is_empty() && target != FALLBACK_LANGUAGE {
            log::warn!("Catalog for {target} is empty, using {FALLBACK_LANGUAGE}");
            target = FALLBACK_LANGUAGE;
            catalog = load_or_empty(&self.lang_dir, target);
        }
        self.current = target;
        self.active = catalog;
        self.refresh_display_names();
        log::info!("Language set to {target}");
        target
    }

    /// Resolve `key` and substitute `params`.
    pub fn translate(&self, key: &str, params: &[(&str, &str)]) -> String {
        let template = [&self.active, &self.fallback]
            .into_iter()
            .find_map(|catalog| catalog.get(key).filter(|t| !t.is_empty()))
            .map_or(key, String::as_str);
        format_template(template, params).unwrap_or_else(|| template.to_string())
    }

    fn refresh_display_names(&mut self) {
        self.display_by_code = AVAILABLE_LANGUAGES
            .iter()
            .map(|&code| (code, self.translate(&format!("settings.language.{code}"), &[])))
            .collect();
        self.code_by_display = self
            .display_by_code
            .iter()
            .map(|(code, display)| (display.clone(), *code))
            .collect();
    }

    /// Human-readable name of `code` in the active language.
    pub fn display_name(&self, code: &str) -> String {
        self.display_by_code
            .iter()
            .find(|(c, _)| *c == code)
            .map_or_else(|| code.to_string(), |(_, display)| display.clone())
    }

    /// Reverse of [`display_name`](Self::display_name).
    pub fn code_for_display(&self, display: &str) -> Option<&'static str> {
        self.code_by_display.get(display).copied()
    }

    /// Display names of every available language, in order.
    pub fn language_options(&self) -> Vec<String> {
        self.display_by_code
            .iter()
            .map(|(_, display)| display.clone())
            .collect()
    }
}
