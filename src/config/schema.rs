use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

/// Edit kinds that rewrite a `[start, end)` segment of a line.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum SpanKind {
    /// Replace the segment with the alert's first `Params` entry
    Substitute,
    /// Drop trailing `. , ; : ! ?` from the segment
    StripHeadingPunctuation,
    /// Sentence-case the segment, honoring the exceptions list
    HeadingCase,
}

/// Edit kinds applied once to the whole line after all span edits.
///
/// The derived ordering is the application order.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum GlobalKind {
    Spacing,
    TrimLineEnd,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum EditKind {
    Span(SpanKind),
    Global(GlobalKind),
}

impl SpanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpanKind::Substitute => "substitute",
            SpanKind::StripHeadingPunctuation => "strip-heading-punctuation",
            SpanKind::HeadingCase => "heading-case",
        }
    }
}

impl GlobalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GlobalKind::Spacing => "spacing",
            GlobalKind::TrimLineEnd => "trim-line-end",
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditKind::Span(kind) => write!(f, "{} (span)", kind.as_str()),
            EditKind::Global(kind) => write!(f, "{} (line)", kind.as_str()),
        }
    }
}

/// On-disk form of `vale-edit.toml`.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct EditorConfig {
    /// Path to the Vale rule YAML holding the heading `exceptions` list
    #[serde(default)]
    pub exceptions: Option<String>,
    /// Vale check name to edit kind
    #[serde(default)]
    pub rules: BTreeMap<String, EditKind>,
}

impl EditorConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.rules.is_empty() {
            issues.push(ValidationIssue::EmptyRuleTable);
        }

        for check in self.rules.keys() {
            if check.trim().is_empty() {
                issues.push(ValidationIssue::BlankCheckName);
            } else if check.trim() != check {
                issues.push(ValidationIssue::PaddedCheckName {
                    check: check.clone(),
                });
            }
        }

        if let Some(path) = &self.exceptions {
            if path.trim().is_empty() {
                issues.push(ValidationIssue::BlankExceptionsPath);
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyRuleTable,
    BlankCheckName,
    PaddedCheckName { check: String },
    BlankExceptionsPath,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyRuleTable => write!(f, "config contains no rules"),
            ValidationIssue::BlankCheckName => write!(f, "rule with blank check name"),
            ValidationIssue::PaddedCheckName { check } => {
                write!(f, "check name '{check}' has surrounding whitespace")
            }
            ValidationIssue::BlankExceptionsPath => write!(f, "exceptions path is blank"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_kind_order_is_application_order() {
        assert!(GlobalKind::Spacing < GlobalKind::TrimLineEnd);
    }

    #[test]
    fn test_validate_collects_all_issues() {
        let mut rules = BTreeMap::new();
        rules.insert(" ".to_string(), EditKind::Global(GlobalKind::Spacing));
        rules.insert(" Google.Spacing".to_string(), EditKind::Global(GlobalKind::Spacing));
        let config = EditorConfig {
            exceptions: Some("".to_string()),
            rules,
        };

        let err = config.validate().unwrap_err();
        assert_eq!(err.issues.len(), 3);
        assert!(err.issues.contains(&ValidationIssue::BlankExceptionsPath));
    }

    #[test]
    fn test_validate_empty_rules() {
        let err = EditorConfig::default().validate().unwrap_err();
        assert_eq!(err.issues, vec![ValidationIssue::EmptyRuleTable]);
    }

    #[test]
    fn test_edit_kind_display() {
        assert_eq!(
            EditKind::Span(SpanKind::HeadingCase).to_string(),
            "heading-case (span)"
        );
        assert_eq!(
            EditKind::Global(GlobalKind::TrimLineEnd).to_string(),
            "trim-line-end (line)"
        );
    }
}
