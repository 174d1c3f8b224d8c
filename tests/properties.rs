//! Property tests for offset stability and normalization idempotence

use proptest::prelude::*;
use vale_edit::ops::{normalize_spacing, trim_line_end};
use vale_edit::{apply_line, classify, EditKind, Exceptions, Registry, Revision, SpanKind};

fn substitution_registry() -> Registry {
    Registry::new([(
        "Test.Substitute".to_string(),
        EditKind::Span(SpanKind::Substitute),
    )])
}

/// A line with non-overlapping substitutions at distinct starts, plus the
/// line expected from splicing each replacement into the original.
fn spliced_line() -> impl Strategy<Value = (String, Vec<Revision>, String)> {
    (
        prop::collection::vec(("[a-z ]{1,4}", "[A-Z]{1,4}", "[0-9]{0,5}"), 1..6),
        "[a-z ]{0,4}",
    )
        .prop_map(|(parts, tail)| {
            let mut line = String::new();
            let mut expected = String::new();
            let mut revisions = Vec::new();

            for (gap, target, replacement) in parts {
                line.push_str(&gap);
                expected.push_str(&gap);

                let start = line.chars().count() as i64 + 1;
                line.push_str(&target);
                let end = line.chars().count() as i64;

                expected.push_str(&replacement);
                revisions.push(
                    Revision::new(1, "Test.Substitute")
                        .with_span(start, end)
                        .with_replacement(replacement),
                );
            }

            line.push_str(&tail);
            expected.push_str(&tail);
            (line, revisions, expected)
        })
}

proptest! {
    #[test]
    fn prop_span_edits_match_original_offsets((line, revisions, expected) in spliced_line()) {
        let registry = substitution_registry();
        let exceptions = Exceptions::default();

        let edit = apply_line(&line, classify(&revisions, &registry), &exceptions);
        prop_assert_eq!(&edit.text, &expected);

        let reversed: Vec<Revision> = revisions.iter().rev().cloned().collect();
        let edit = apply_line(&line, classify(&reversed, &registry), &exceptions);
        prop_assert_eq!(edit.text, expected);
    }

    #[test]
    fn prop_trim_line_end_idempotent(line in "[a-z \t.,]{0,40}") {
        let once = trim_line_end(&line);
        prop_assert_eq!(trim_line_end(&once), once);
    }

    #[test]
    fn prop_normalize_spacing_idempotent(line in "[a-zA-Z .,;:!?*\t]{0,40}") {
        let once = normalize_spacing(&line);
        prop_assert_eq!(normalize_spacing(&once), once);
    }

    #[test]
    fn prop_malformed_revision_is_isolated(
        (line, revisions, expected) in spliced_line(),
        bad_start in 2i64..40,
    ) {
        let registry = substitution_registry();
        let exceptions = Exceptions::default();

        let mut with_bad = revisions.clone();
        with_bad.push(
            Revision::new(1, "Test.Substitute")
                .with_span(bad_start, bad_start - 2)
                .with_replacement("!"),
        );
        with_bad.push(Revision::new(1, "Test.Substitute").with_span(1, 1));

        let edit = apply_line(&line, classify(&with_bad, &registry), &exceptions);
        prop_assert_eq!(edit.text, expected);
        prop_assert_eq!(edit.outcomes.iter().filter(|o| !o.is_applied()).count(), 2);
    }
}
