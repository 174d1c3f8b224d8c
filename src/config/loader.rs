//! Rule config loading.
//!
//! Errors carry the file they came from when there is one, so the CLI can
//! point at the offending `vale-edit.toml`.

use crate::config::schema::{EditorConfig, ValidationError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unable to read rules config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse rules config{}: {source}", origin(.path))]
    Toml {
        path: Option<PathBuf>,
        #[source]
        source: toml_edit::de::Error,
    },

    #[error("rules config{} is invalid: {source}", origin(.path))]
    Validation {
        path: Option<PathBuf>,
        #[source]
        source: ValidationError,
    },
}

fn origin(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|path| format!(" {}", path.display()))
        .unwrap_or_default()
}

/// Parse and validate a rules table, tagging failures with `file`.
fn parse(input: &str, file: Option<&Path>) -> Result<EditorConfig, ConfigError> {
    let path = || file.map(Path::to_path_buf);

    let config: EditorConfig = toml_edit::de::from_str(input)
        .map_err(|source| ConfigError::Toml { path: path(), source })?;
    config
        .validate()
        .map_err(|source| ConfigError::Validation { path: path(), source })?;

    tracing::debug!(rules = config.rules.len(), "rules config loaded");
    Ok(config)
}

pub fn load_from_str(input: &str) -> Result<EditorConfig, ConfigError> {
    parse(input, None)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<EditorConfig, ConfigError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&contents, Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{EditKind, GlobalKind, SpanKind};

    #[test]
    fn test_load_rules_table() {
        let config = load_from_str(
            r#"
exceptions = "styles/Headings.yml"

[rules]
"Acme.Contractions" = "substitute"
"Acme.Spacing" = "spacing"
"Acme.Headings" = "heading-case"
"#,
        )
        .unwrap();

        assert_eq!(config.exceptions.as_deref(), Some("styles/Headings.yml"));
        assert_eq!(
            config.rules["Acme.Contractions"],
            EditKind::Span(SpanKind::Substitute)
        );
        assert_eq!(config.rules["Acme.Spacing"], EditKind::Global(GlobalKind::Spacing));
    }

    #[test]
    fn test_unknown_kind_is_parse_error() {
        let err = load_from_str(
            r#"
[rules]
"Acme.Spelling" = "spellcheck"
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Toml { path: None, .. }));
    }

    #[test]
    fn test_validation_error_gets_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vale-edit.toml");
        fs::write(&path, "[rules]\n").unwrap();

        let err = load_from_path(&path).unwrap_err();
        match err {
            ConfigError::Validation { path: Some(p), .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_error_message_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vale-edit.toml");
        fs::write(&path, "[rules\n").unwrap();

        let err = load_from_path(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { path: Some(_), .. }));
        assert!(err.to_string().contains("vale-edit.toml"));
        let unnamed = load_from_str("[rules\n").unwrap_err();
        assert!(unnamed.to_string().starts_with("unable to parse rules config:"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_from_path("/nonexistent/vale-edit.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("unable to read rules config"));
    }
}
