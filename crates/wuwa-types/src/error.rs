//! Error types for the launcher shell.

use std::io;

/// Errors produced by the launcher core and its collaborators.
///
/// `ConfigParse`, `CatalogLoad` and `Persist` are always recovered where
/// they occur. `Launch` and `Dialog` reach the user through the
/// notification service.
#[derive(Debug, thiserror::Error)]
pub enum LauncherError {
    #[error("config parse error: {0}")]
    ConfigParse(String),

    #[error("catalog load error: {0}")]
    CatalogLoad(String),

    #[error("persist error: {0}")]
    Persist(String),

    #[error("launch error: {0}")]
    Launch(String),

    #[error("dialog error: {0}")]
    Dialog(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, LauncherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_parse_display() {
        let e = LauncherError::ConfigParse("config.json: expected object".into());
        assert_eq!(
            format!("{e}"),
            "config parse error: config.json: expected object"
        );
    }

    #[test]
    fn catalog_load_display() {
        let e = LauncherError::CatalogLoad("pl_PL".into());
        assert_eq!(format!("{e}"), "catalog load error: pl_PL");
    }

    #[test]
    fn persist_display() {
        let e = LauncherError::Persist("disk full".into());
        assert_eq!(format!("{e}"), "persist error: disk full");
    }

    #[test]
    fn launch_display() {
        let e = LauncherError::Launch("not found".into());
        assert_eq!(format!("{e}"), "launch error: not found");
    }

    #[test]
    fn dialog_display() {
        let e = LauncherError::Dialog("COM unavailable".into());
        assert_eq!(format!("{e}"), "dialog error: COM unavailable");
    }

    #[test]
    fn io_error_from_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "read-only");
        let e: LauncherError = io_err.into();
        let msg = format!("{e}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("read-only"));
    }

    #[test]
    fn toml_error_from_conversion() {
        let toml_err = toml::from_str::<toml::Value>("[[[broken").unwrap_err();
        let e: LauncherError = toml_err.into();
        assert!(format!("{e}").contains("TOML parse error"));
    }

    #[test]
    fn json_error_from_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ nope").unwrap_err();
        let e: LauncherError = json_err.into();
        assert!(format!("{e}").contains("JSON error"));
    }

    #[test]
    fn result_alias_err() {
        let r: Result<()> = Err(LauncherError::Persist("oops".into()));
        assert!(r.is_err());
    }
}
