//! Check name to edit kind registry.
//!
//! Built once before any document is processed and shared by reference;
//! nothing mutates it during a run.

use crate::config::schema::{EditKind, EditorConfig, GlobalKind, SpanKind};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Exceptions file used by the built-in Google style registry.
pub const DEFAULT_EXCEPTIONS_PATH: &str = ".vale/styles/Google/Headings.yml";

/// Similarity threshold for "did you mean" suggestions.
const SUGGESTION_THRESHOLD: f64 = 0.85;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    rules: BTreeMap<String, EditKind>,
    exceptions_path: Option<PathBuf>,
}

impl Default for Registry {
    /// Rule names of the Google style package shipped with Vale.
    fn default() -> Self {
        let rules = [
            ("Google.Contractions", EditKind::Span(SpanKind::Substitute)),
            ("Google.WordList", EditKind::Span(SpanKind::Substitute)),
            (
                "Google.HeadingPunctuation",
                EditKind::Span(SpanKind::StripHeadingPunctuation),
            ),
            ("Google.Headings", EditKind::Span(SpanKind::HeadingCase)),
            ("Google.Spacing", EditKind::Global(GlobalKind::Spacing)),
            ("Google.EOLWhitespace", EditKind::Global(GlobalKind::TrimLineEnd)),
        ]
        .into_iter()
        .map(|(check, kind)| (check.to_string(), kind))
        .collect();

        Self {
            rules,
            exceptions_path: Some(PathBuf::from(DEFAULT_EXCEPTIONS_PATH)),
        }
    }
}

impl From<EditorConfig> for Registry {
    fn from(config: EditorConfig) -> Self {
        Self {
            rules: config.rules,
            exceptions_path: config.exceptions.map(PathBuf::from),
        }
    }
}

impl Registry {
    pub fn new(rules: impl IntoIterator<Item = (String, EditKind)>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
            exceptions_path: None,
        }
    }

    pub fn kind(&self, check: &str) -> Option<EditKind> {
        self.rules.get(check).copied()
    }

    pub fn exceptions_path(&self) -> Option<&PathBuf> {
        self.exceptions_path.as_ref()
    }

    pub fn rules(&self) -> impl Iterator<Item = (&str, EditKind)> {
        self.rules.iter().map(|(check, kind)| (check.as_str(), *kind))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Closest configured check of the same style, if any is similar enough.
    pub fn suggest(&self, check: &str) -> Option<&str> {
        let (style, rule) = split_check(check);
        self.rules
            .keys()
            .filter_map(|known| {
                let (known_style, known_rule) = split_check(known);
                (known_style == style)
                    .then(|| (known, strsim::jaro_winkler(rule, known_rule)))
            })
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(known, _)| known.as_str())
    }
}

/// `Google.Spacing` -> (`Google`, `Spacing`)
fn split_check(check: &str) -> (&str, &str) {
    check.rsplit_once('.').unwrap_or(("", check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_covers_every_kind() {
        let registry = Registry::default();
        assert_eq!(
            registry.kind("Google.Contractions"),
            Some(EditKind::Span(SpanKind::Substitute))
        );
        assert_eq!(
            registry.kind("Google.Spacing"),
            Some(EditKind::Global(GlobalKind::Spacing))
        );
        assert_eq!(registry.kind("Google.Passive"), None);
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_suggest_close_name() {
        let registry = Registry::default();
        assert_eq!(registry.suggest("Google.Contraction"), Some("Google.Contractions"));
        assert_eq!(registry.suggest("Google.Headingz"), Some("Google.Headings"));
        assert_eq!(registry.suggest("Google.Passive"), None);
        assert_eq!(registry.suggest("write-good.Weasel"), None);
    }

    #[test]
    fn test_from_config() {
        let mut rules = BTreeMap::new();
        rules.insert("Acme.Trim".to_string(), EditKind::Global(GlobalKind::TrimLineEnd));
        let registry = Registry::from(EditorConfig {
            exceptions: None,
            rules,
        });

        assert_eq!(registry.exceptions_path(), None);
        assert_eq!(
            registry.rules().collect::<Vec<_>>(),
            vec![("Acme.Trim", EditKind::Global(GlobalKind::TrimLineEnd))]
        );
    }
}
