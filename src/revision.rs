//! Vale JSON alerts as revision records.
//!
//! Vale's `--output=JSON` maps each document path to its alerts. Only
//! `Line`, `Check`, `Span` and `Action.Params` drive edits; the remaining
//! fields are kept for reporting.

use crate::edit::{EditError, Span};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// One requested edit.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Revision {
    /// 1-based line number
    #[serde(default)]
    pub line: Option<i64>,
    #[serde(default)]
    pub check: Option<String>,
    /// `[start, end]`, 1-based start and exclusive end
    #[serde(default)]
    pub span: Option<Vec<i64>>,
    #[serde(default)]
    pub action: Option<Action>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default, rename = "Match")]
    pub matched: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Action {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub params: Option<Vec<String>>,
}

impl Revision {
    /// Revision for `check` at `line`, without span or parameters.
    pub fn new(line: i64, check: impl Into<String>) -> Self {
        Self {
            line: Some(line),
            check: Some(check.into()),
            ..Self::default()
        }
    }

    pub fn with_span(mut self, start: i64, end: i64) -> Self {
        self.span = Some(vec![start, end]);
        self
    }

    pub fn with_replacement(mut self, replacement: impl Into<String>) -> Self {
        self.action = Some(Action {
            name: Some("replace".to_string()),
            params: Some(vec![replacement.into()]),
        });
        self
    }

    /// The span payload, validated as a start/end pair.
    pub fn span(&self) -> Result<Span, EditError> {
        match &self.span {
            Some(raw) => Span::from_raw(raw),
            None => Err(EditError::MissingSpan),
        }
    }

    /// First `Params` entry of the action. An empty string is a valid
    /// replacement; no entry at all is not.
    pub fn replacement(&self) -> Option<&str> {
        self.action
            .as_ref()
            .and_then(|action| action.params.as_ref())
            .and_then(|params| params.first())
            .map(String::as_str)
    }

    pub fn check_name(&self) -> &str {
        self.check.as_deref().unwrap_or("")
    }
}

/// All revisions of one Vale run, keyed by document path.
#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct RevisionBatch {
    pub documents: BTreeMap<PathBuf, Vec<Revision>>,
}

#[derive(Error, Debug)]
pub enum BatchError {
    #[error("unable to find JSON at {path}")]
    NotFound { path: PathBuf },

    #[error("unable to read JSON at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to parse JSON{}: {source}", path_suffix(.path))]
    Json {
        path: Option<PathBuf>,
        source: serde_json::Error,
    },
}

fn path_suffix(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" at {}", path.display()),
        None => String::new(),
    }
}

impl RevisionBatch {
    pub fn from_json(input: &str) -> Result<Self, BatchError> {
        serde_json::from_str(input).map_err(|source| BatchError::Json { path: None, source })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BatchError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                BatchError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                BatchError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        serde_json::from_str(&contents).map_err(|source| BatchError::Json {
            path: Some(path.to_path_buf()),
            source,
        })
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn revision_count(&self) -> usize {
        self.documents.values().map(Vec::len).sum()
    }
}
