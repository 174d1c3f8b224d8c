use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// A character span as Vale reports it: 1-based start, exclusive end.
///
/// `[1, 3]` covers the first three characters of a line. Offsets count
/// Unicode scalar values of the line content, never bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// 1-based starting character (inclusive)
    pub start: i64,
    /// Ending character (exclusive, 0-based)
    pub end: i64,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("no check configured for '{check}'{}", suggestion_suffix(.suggestion))]
    UnknownCheck {
        check: String,
        suggestion: Option<String>,
    },

    #[error("revision has no check name")]
    MissingCheck,

    #[error("span-scoped check has no span")]
    MissingSpan,

    #[error("span must be two integers, found {found:?}")]
    MalformedSpan { found: Vec<i64> },

    #[error("invalid span {span}: start must be at least 1 and not past the end")]
    InvalidSpan { span: Span },

    #[error("span {span} starts beyond line length {line_len}")]
    OutOfRange { span: Span, line_len: usize },

    #[error("missing replacement Params")]
    MissingReplacement,
}

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean '{name}'?)"),
        None => String::new(),
    }
}

impl Span {
    pub fn new(start: i64, end: i64) -> Self {
        Self { start, end }
    }

    /// Build a span from the raw `Span` array of an alert.
    pub fn from_raw(raw: &[i64]) -> Result<Self, EditError> {
        match raw {
            [start, end] => Ok(Self::new(*start, *end)),
            other => Err(EditError::MalformedSpan {
                found: other.to_vec(),
            }),
        }
    }

    /// Resolve to a 0-based half-open char range within `text`.
    ///
    /// The end is clamped to the text length; a start past the end of the
    /// text is out of range.
    pub fn char_range(&self, text: &str) -> Result<Range<usize>, EditError> {
        if self.start < 1 || self.start - 1 > self.end {
            return Err(EditError::InvalidSpan { span: *self });
        }

        let line_len = text.chars().count();
        let start = usize::try_from(self.start - 1)
            .map_err(|_| EditError::InvalidSpan { span: *self })?;
        if start > line_len {
            return Err(EditError::OutOfRange {
                span: *self,
                line_len,
            });
        }

        let end = usize::try_from(self.end).unwrap_or(usize::MAX);
        if end > line_len {
            tracing::debug!(span = %self, line_len, "clamping span end to line length");
        }

        Ok(start..end.min(line_len))
    }

    /// Resolve to a byte range within `text`, suitable for slicing.
    pub fn byte_range(&self, text: &str) -> Result<Range<usize>, EditError> {
        let chars = self.char_range(text)?;
        Ok(byte_offset(text, chars.start)..byte_offset(text, chars.end))
    }
}

/// Byte offset of the `char_idx`-th character, or the text length past the end.
fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .map(|(idx, _)| idx)
        .nth(char_idx)
        .unwrap_or(text.len())
}

/// Result of splicing a segment of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "Splice carries the revised line"]
pub struct Splice {
    /// The full line after the splice
    pub line: String,
    /// Segment text before rewriting
    pub before: String,
    /// Segment text after rewriting
    pub after: String,
}

/// The single span primitive: rewrite the segment at `span` with `rewrite`.
///
/// Every span-scoped operation compiles down to this. The line outside the
/// span is copied untouched.
pub fn splice_with<F>(line: &str, span: Span, rewrite: F) -> Result<Splice, EditError>
where
    F: FnOnce(&str) -> String,
{
    let range = span.byte_range(line)?;
    let before = &line[range.clone()];
    let after = rewrite(before);

    let mut revised = String::with_capacity(line.len() - before.len() + after.len());
    revised.push_str(&line[..range.start]);
    revised.push_str(&after);
    revised.push_str(&line[range.end..]);

    Ok(Splice {
        line: revised,
        before: before.to_string(),
        after,
    })
}
