//! Partition a line's revisions into span edits and line edits.

use crate::config::{EditKind, GlobalKind, Registry, SpanKind};
use crate::edit::{EditError, Span};
use crate::engine::report::EditOutcome;
use crate::revision::Revision;
use std::collections::BTreeMap;

/// A span-scoped revision that passed classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRevision {
    pub check: String,
    pub kind: SpanKind,
    pub span: Span,
    pub params: Vec<String>,
}

impl SpanRevision {
    /// First parameter, required by substitution.
    pub fn replacement(&self) -> Option<&str> {
        self.params.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedLine {
    /// Span edits in input order
    pub span_edits: Vec<SpanRevision>,
    /// Requested line edits, one per kind, with the first check that asked
    pub globals: BTreeMap<GlobalKind, String>,
    /// Revisions dropped during classification
    pub rejected: Vec<EditOutcome>,
}

/// Classify revisions for one line against the registry.
///
/// Unknown checks and span edits without a usable span are rejected; the
/// rest of the line is unaffected.
pub fn classify<'a>(
    revisions: impl IntoIterator<Item = &'a Revision>,
    registry: &Registry,
) -> ClassifiedLine {
    let mut classified = ClassifiedLine::default();

    for revision in revisions {
        let check = revision.check_name();

        if check.is_empty() {
            classified.rejected.push(reject(revision, EditError::MissingCheck));
            continue;
        }

        match registry.kind(check) {
            Some(EditKind::Span(kind)) => match revision.span() {
                Ok(span) => classified.span_edits.push(SpanRevision {
                    check: check.to_string(),
                    kind,
                    span,
                    params: revision
                        .action
                        .as_ref()
                        .and_then(|action| action.params.clone())
                        .unwrap_or_default(),
                }),
                Err(error) => classified.rejected.push(reject(revision, error)),
            },
            Some(EditKind::Global(kind)) => {
                classified
                    .globals
                    .entry(kind)
                    .or_insert_with(|| check.to_string());
            }
            None => {
                let error = EditError::UnknownCheck {
                    check: check.to_string(),
                    suggestion: registry.suggest(check).map(str::to_string),
                };
                classified.rejected.push(reject(revision, error));
            }
        }
    }

    classified
}

fn reject(revision: &Revision, error: EditError) -> EditOutcome {
    tracing::warn!(
        check = revision.check_name(),
        line = ?revision.line,
        %error,
        "revision rejected"
    );
    EditOutcome::Skipped {
        check: revision.check_name().to_string(),
        span: revision.span().ok(),
        error,
    }
}
