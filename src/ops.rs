//! Leaf edit operations.
//!
//! Span operations rewrite only the segment they are given; the line-wide
//! operations take the whole line content. Each one assumes it is the only
//! edit being applied at that moment.

use crate::config::Exceptions;
use regex::Regex;
use std::sync::LazyLock;

/// Punctuation removed from the end of a heading segment.
pub const HEADING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?'];

static SPACE_BEFORE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" +([.,:;?!])").expect("static regex is valid"));
static SPACES_AFTER_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.,:;?!]) +").expect("static regex is valid"));
static SPACE_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("static regex is valid"));

fn is_spacing_punct(ch: char) -> bool {
    matches!(ch, '.' | ',' | ':' | ';' | '?' | '!')
}

/// Positional replacement; the segment's content is irrelevant.
pub fn substitute(_segment: &str, replacement: &str) -> String {
    replacement.to_string()
}

/// Remove trailing heading punctuation from the segment, keeping interior
/// punctuation.
pub fn strip_heading_punctuation(segment: &str) -> String {
    segment.trim_end_matches(HEADING_PUNCTUATION).to_string()
}

/// Sentence-case a heading segment.
///
/// The first word is capitalized, every later word lowercased, and words in
/// `exceptions` pass through as written. Words are rejoined with single
/// spaces.
pub fn heading_case(segment: &str, exceptions: &Exceptions) -> String {
    segment
        .split_whitespace()
        .enumerate()
        .map(|(idx, word)| {
            if exceptions.contains(word) {
                word.to_string()
            } else if idx == 0 {
                capitalize(word)
            } else {
                word.to_lowercase()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// First character uppercased, the rest lowercased.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => {
            let rest = chars.as_str().to_lowercase();
            first.to_uppercase().chain(rest.chars()).collect()
        }
        None => String::new(),
    }
}

/// Standardize spacing around `. , : ; ? !` and trim the line.
///
/// Spaces before punctuation are dropped, a space is inserted after
/// punctuation that runs straight into a word, and runs of spaces collapse
/// to one.
///
/// The collapse covers every interior run, not only runs after punctuation,
/// so aligned Markdown table cells lose their padding. Trailing two-space
/// hard line breaks are removed by the final trim. Map a check to `spacing`
/// only where that layout does not matter.
pub fn normalize_spacing(line: &str) -> String {
    let line = SPACE_BEFORE_PUNCT.replace_all(line, "$1");
    let line = space_after_punctuation(&line);
    let line = SPACES_AFTER_PUNCT.replace_all(&line, "$1 ");
    let line = SPACE_RUNS.replace_all(&line, " ");
    line.trim().to_string()
}

/// Insert one space after punctuation unless it is followed by end of line,
/// whitespace, more punctuation, or an asterisk.
fn space_after_punctuation(line: &str) -> String {
    let mut out = String::with_capacity(line.len() + 8);
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        out.push(ch);
        if !is_spacing_punct(ch) {
            continue;
        }
        match chars.peek() {
            None => {}
            Some(&next) if next == ' ' || next == '\t' || next == '\n' => {}
            Some(&next) if next == '*' || is_spacing_punct(next) => {}
            Some(_) => out.push(' '),
        }
    }
    out
}

/// Remove trailing whitespace.
pub fn trim_line_end(line: &str) -> String {
    line.trim_end().to_string()
}
