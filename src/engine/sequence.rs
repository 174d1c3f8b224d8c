//! Per-line edit sequencing.
//!
//! Span edits are applied right to left by their original start offset, so
//! a length-changing edit never moves the text a later (leftward) edit still
//! has to address. Line edits follow in [`GlobalKind`] order, then the
//! original line terminator is restored.

use crate::config::{EditKind, Exceptions, GlobalKind, SpanKind};
use crate::edit::{splice_with, EditError};
use crate::engine::classify::{ClassifiedLine, SpanRevision};
use crate::engine::report::EditOutcome;
use crate::ops;
use std::cmp::Reverse;

/// Revised line text plus what happened to each revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEdit {
    pub text: String,
    pub outcomes: Vec<EditOutcome>,
}

/// A span operation with the data it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SpanOp<'a> {
    Substitute { replacement: &'a str },
    StripHeadingPunctuation,
    HeadingCase,
}

impl<'a> SpanOp<'a> {
    fn resolve(revision: &'a SpanRevision) -> Result<Self, EditError> {
        match revision.kind {
            SpanKind::Substitute => revision
                .replacement()
                .map(|replacement| SpanOp::Substitute { replacement })
                .ok_or(EditError::MissingReplacement),
            SpanKind::StripHeadingPunctuation => Ok(SpanOp::StripHeadingPunctuation),
            SpanKind::HeadingCase => Ok(SpanOp::HeadingCase),
        }
    }

    fn rewrite(&self, segment: &str, exceptions: &Exceptions) -> String {
        match self {
            SpanOp::Substitute { replacement } => ops::substitute(segment, replacement),
            SpanOp::StripHeadingPunctuation => ops::strip_heading_punctuation(segment),
            SpanOp::HeadingCase => ops::heading_case(segment, exceptions),
        }
    }
}

fn apply_global(kind: GlobalKind, line: &str) -> String {
    match kind {
        GlobalKind::Spacing => ops::normalize_spacing(line),
        GlobalKind::TrimLineEnd => ops::trim_line_end(line),
    }
}

/// Split a line into content and its `\n` or `\r\n` terminator.
pub fn split_terminator(line: &str) -> (&str, &str) {
    if let Some(content) = line.strip_suffix("\r\n") {
        (content, "\r\n")
    } else if let Some(content) = line.strip_suffix('\n') {
        (content, "\n")
    } else {
        (line, "")
    }
}

/// Re-append the original terminator if the revised text lost it.
fn reconcile_terminator(mut text: String, terminator: &str) -> String {
    if !terminator.is_empty() && !text.ends_with('\n') {
        text.push_str(terminator);
    }
    text
}

/// Apply every classified revision to one line.
///
/// A failing edit is recorded and skipped; the line keeps every edit that
/// did apply.
pub fn apply_line(line: &str, classified: ClassifiedLine, exceptions: &Exceptions) -> LineEdit {
    let ClassifiedLine {
        mut span_edits,
        globals,
        rejected,
    } = classified;

    let (content, terminator) = split_terminator(line);
    let mut current = content.to_string();
    let mut outcomes = rejected;

    // Stable: equal starts keep input order.
    span_edits.sort_by_key(|revision| Reverse(revision.span.start));

    for revision in &span_edits {
        let applied = SpanOp::resolve(revision).and_then(|op| {
            splice_with(&current, revision.span, |segment| op.rewrite(segment, exceptions))
        });

        match applied {
            Ok(splice) => {
                tracing::debug!(
                    check = %revision.check,
                    span = %revision.span,
                    before = %splice.before,
                    after = %splice.after,
                    "applied span revision"
                );
                current = splice.line;
                outcomes.push(EditOutcome::Applied {
                    check: revision.check.clone(),
                    kind: EditKind::Span(revision.kind),
                    span: Some(revision.span),
                    before: splice.before,
                    after: splice.after,
                });
            }
            Err(error) => {
                tracing::warn!(
                    check = %revision.check,
                    span = %revision.span,
                    %error,
                    "skipping span revision"
                );
                outcomes.push(EditOutcome::Skipped {
                    check: revision.check.clone(),
                    span: Some(revision.span),
                    error,
                });
            }
        }
    }

    for (kind, check) in globals {
        let revised = apply_global(kind, &current);
        let before = std::mem::replace(&mut current, revised.clone());
        tracing::debug!(check = %check, kind = kind.as_str(), "applied line revision");
        outcomes.push(EditOutcome::Applied {
            check,
            kind: EditKind::Global(kind),
            span: None,
            before,
            after: revised,
        });
    }

    LineEdit {
        text: reconcile_terminator(current, terminator),
        outcomes,
    }
}
