//! Heading case exceptions loaded from a Vale rule file.

use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Words that heading case normalization leaves exactly as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exceptions {
    words: HashSet<String>,
}

#[derive(Error, Debug)]
pub enum ExceptionsError {
    #[error("unable to find exceptions file at {path}")]
    NotFound { path: PathBuf },

    #[error("unable to read exceptions file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to parse exceptions file at {path}: {source}")]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    exceptions: Option<Vec<String>>,
}

impl Exceptions {
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Parse the `exceptions` list of a Vale rule YAML document.
    ///
    /// A document without the key yields an empty set.
    pub fn from_yaml(input: &str) -> Result<Self, serde_yaml::Error> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        let rule: Option<RuleFile> = serde_yaml::from_str(input)?;
        let words = rule.and_then(|r| r.exceptions).unwrap_or_default();
        Ok(words.into_iter().collect())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ExceptionsError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ExceptionsError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ExceptionsError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Self::from_yaml(&contents).map_err(|source| ExceptionsError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the exceptions list, falling back to an empty set on any failure.
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(exceptions) => exceptions,
            Err(err) => {
                tracing::warn!(error = %err, "using empty heading exceptions");
                Self::default()
            }
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Exceptions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(Into::into).collect(),
        }
    }
}
