//! Document edit driver.
//!
//! Groups revisions by line, runs the line sequencer over affected lines in
//! ascending order, and hands the document back to the store.

use crate::config::{Exceptions, Registry};
use crate::engine::classify::classify;
use crate::engine::report::{DocumentReport, LineReport};
use crate::engine::sequence::apply_line;
use crate::engine::store::{Document, DocumentStore, StoreError};
use crate::revision::{Revision, RevisionBatch};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("unable to load {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: StoreError,
    },

    #[error("unable to write revisions to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: StoreError,
    },
}

/// Revisions of one document grouped by their 1-based source line.
#[derive(Debug, Default)]
struct LineGroups<'a> {
    lines: BTreeMap<i64, Vec<&'a Revision>>,
    discarded: usize,
}

fn group_by_line(revisions: &[Revision]) -> LineGroups<'_> {
    let mut groups = LineGroups::default();
    for revision in revisions {
        match revision.line {
            Some(line) => groups.lines.entry(line).or_default().push(revision),
            None => groups.discarded += 1,
        }
    }
    groups
}

/// Applies revision batches with a fixed registry and exceptions list.
#[derive(Debug, Clone, Copy)]
pub struct Engine<'a> {
    registry: &'a Registry,
    exceptions: &'a Exceptions,
}

impl<'a> Engine<'a> {
    pub fn new(registry: &'a Registry, exceptions: &'a Exceptions) -> Self {
        Self {
            registry,
            exceptions,
        }
    }

    /// Apply `revisions` to an in-memory document.
    ///
    /// Lines outside the document are recorded and left alone. The returned
    /// report has `persisted == false`.
    pub fn revise(
        &self,
        path: &Path,
        document: &mut Document,
        revisions: &[Revision],
    ) -> DocumentReport {
        let original = document.to_text();
        let groups = group_by_line(revisions);
        let mut lines = Vec::new();
        let mut out_of_bounds = Vec::new();

        if groups.discarded > 0 {
            tracing::warn!(
                path = %path.display(),
                count = groups.discarded,
                "discarding revisions without a line number"
            );
        }

        for (line, line_revisions) in groups.lines {
            let current = line
                .checked_sub(1)
                .and_then(|index| usize::try_from(index).ok())
                .and_then(|idx| document.line(idx).map(|text| (idx, text)));

            let Some((idx, text)) = current else {
                tracing::warn!(path = %path.display(), line, "line out of bounds, skipping");
                out_of_bounds.push(line);
                continue;
            };

            let classified = classify(line_revisions, self.registry);
            let edit = apply_line(text, classified, self.exceptions);
            let changed = edit.text != text;

            document.set_line(idx, edit.text);
            lines.push(LineReport {
                line: idx + 1,
                outcomes: edit.outcomes,
                changed,
            });
        }

        DocumentReport {
            path: path.to_path_buf(),
            discarded: groups.discarded,
            lines,
            out_of_bounds,
            original,
            revised: document.to_text(),
            persisted: false,
        }
    }

    /// Load one document, revise it, and persist it through `store`.
    pub fn apply_document<S: DocumentStore + ?Sized>(
        &self,
        store: &S,
        path: &Path,
        revisions: &[Revision],
    ) -> Result<DocumentReport, DocumentError> {
        let mut document = store.load(path).map_err(|source| DocumentError::Load {
            path: path.to_path_buf(),
            source,
        })?;

        let mut report = self.revise(path, &mut document, revisions);

        report.persisted = store
            .persist(path, &document)
            .map_err(|source| DocumentError::Persist {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(report)
    }

    /// Apply every document of a batch, in path order.
    ///
    /// One document failing does not stop the others.
    pub fn apply_batch<S: DocumentStore + ?Sized>(
        &self,
        store: &S,
        batch: &RevisionBatch,
    ) -> Vec<(PathBuf, Result<DocumentReport, DocumentError>)> {
        batch
            .documents
            .iter()
            .map(|(path, revisions)| {
                let result = self.apply_document(store, path, revisions);
                if let Err(err) = &result {
                    tracing::warn!(path = %path.display(), error = %err, "document skipped");
                }
                (path.clone(), result)
            })
            .collect()
    }
}
