use crate::config::EditKind;
use crate::edit::{EditError, Span};
use std::fmt;
use std::path::PathBuf;

/// What happened to one revision.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "EditOutcome should be checked for applied/skipped"]
pub enum EditOutcome {
    /// Edit was applied; `before`/`after` are the segment (span edits) or
    /// the whole line content (line edits)
    Applied {
        check: String,
        kind: EditKind,
        span: Option<Span>,
        before: String,
        after: String,
    },
    /// Edit was skipped; sibling edits were unaffected
    Skipped {
        check: String,
        span: Option<Span>,
        error: EditError,
    },
}

impl EditOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied { .. })
    }

    pub fn check(&self) -> &str {
        match self {
            EditOutcome::Applied { check, .. } | EditOutcome::Skipped { check, .. } => check,
        }
    }
}

impl fmt::Display for EditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOutcome::Applied {
                check,
                span: Some(span),
                before,
                after,
                ..
            } => write!(f, "{check} at {span}: '{before}' -> '{after}'"),
            EditOutcome::Applied {
                check, span: None, ..
            } => write!(f, "{check} on whole line"),
            EditOutcome::Skipped {
                check,
                span: Some(span),
                error,
            } => write!(f, "{check} at {span} skipped: {error}"),
            EditOutcome::Skipped {
                check,
                span: None,
                error,
            } => write!(f, "{check} skipped: {error}"),
        }
    }
}

/// All edit outcomes for one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineReport {
    /// 1-based line number
    pub line: usize,
    pub outcomes: Vec<EditOutcome>,
    pub changed: bool,
}

impl LineReport {
    pub fn applied(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_applied()).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.len() - self.applied()
    }
}

/// Result of revising one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    pub path: PathBuf,
    /// Revisions dropped for having no `Line`
    pub discarded: usize,
    pub lines: Vec<LineReport>,
    /// Source line numbers that fell outside the document
    pub out_of_bounds: Vec<i64>,
    pub original: String,
    pub revised: String,
    /// False for dry runs
    pub persisted: bool,
}

impl DocumentReport {
    pub fn applied(&self) -> usize {
        self.lines.iter().map(LineReport::applied).sum()
    }

    pub fn skipped(&self) -> usize {
        self.lines.iter().map(LineReport::skipped).sum()
    }

    pub fn changed(&self) -> bool {
        self.original != self.revised
    }
}
