//! Document loading and persistence.
//!
//! The filesystem store overwrites documents in place. There is no backup:
//! once a document is persisted its previous content is gone.

use crate::safety::{RootGuard, SafetyError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A text document as terminator-preserving lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.split_inclusive('\n').map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn set_line(&mut self, index: usize, text: String) {
        if let Some(line) = self.lines.get_mut(index) {
            *line = text;
        }
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    pub fn to_text(&self) -> String {
        self.lines.concat()
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("unable to find {0}")]
    NotFound(PathBuf),

    #[error("File I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Safety(#[from] SafetyError),
}

/// Where documents come from and go back to.
pub trait DocumentStore {
    fn load(&self, path: &Path) -> Result<Document, StoreError>;

    /// Write the document back. Returns whether anything was written.
    fn persist(&self, path: &Path, document: &Document) -> Result<bool, StoreError>;
}

/// Reads and overwrites files on disk.
#[derive(Debug, Clone, Default)]
pub struct FsStore {
    guard: Option<RootGuard>,
    dry_run: bool,
}

impl FsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject documents outside `guard`'s root.
    pub fn with_guard(mut self, guard: RootGuard) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Load documents but never write them.
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The file a document path refers to, with symlinks followed so writes
    /// land on the link target rather than replacing the link.
    fn resolve(&self, path: &Path) -> Result<PathBuf, StoreError> {
        match &self.guard {
            Some(guard) => guard.validate_path(path).map_err(|err| match err {
                SafetyError::Canonicalize(source)
                    if source.kind() == std::io::ErrorKind::NotFound =>
                {
                    StoreError::NotFound(path.to_path_buf())
                }
                other => StoreError::Safety(other),
            }),
            None => fs::canonicalize(path).map_err(|source| {
                if source.kind() == std::io::ErrorKind::NotFound {
                    StoreError::NotFound(path.to_path_buf())
                } else {
                    StoreError::Io {
                        path: path.to_path_buf(),
                        source,
                    }
                }
            }),
        }
    }
}

impl DocumentStore for FsStore {
    fn load(&self, path: &Path) -> Result<Document, StoreError> {
        let resolved = self.resolve(path)?;
        let text = fs::read_to_string(&resolved).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                StoreError::NotFound(path.to_path_buf())
            } else {
                StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        Ok(Document::parse(&text))
    }

    fn persist(&self, path: &Path, document: &Document) -> Result<bool, StoreError> {
        if self.dry_run {
            return Ok(false);
        }
        // Re-check right before the write.
        let resolved = self.resolve(path)?;
        atomic_write(&resolved, document.to_text().as_bytes()).map_err(|source| {
            StoreError::Io {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(true)
    }
}

/// Atomic file write: tempfile + fsync + rename.
///
/// Either the full write succeeds or nothing changes.
fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(content)?;
    temp.as_file().sync_all()?;

    // Keep the original file's permissions.
    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file().set_permissions(metadata.permissions())?;
    }

    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_preserves_terminators() {
        let text = "# Title\r\n\nbody\nlast";
        let document = Document::parse(text);
        assert_eq!(document.len(), 4);
        assert_eq!(document.line(0), Some("# Title\r\n"));
        assert_eq!(document.line(3), Some("last"));
        assert_eq!(document.to_text(), text);
    }

    #[test]
    fn test_empty_document_has_no_lines() {
        assert!(Document::parse("").is_empty());
    }

    #[test]
    fn test_set_line_out_of_bounds_is_ignored() {
        let mut document = Document::parse("one\n");
        document.set_line(5, "six\n".to_string());
        assert_eq!(document.to_text(), "one\n");
    }

    #[test]
    fn test_fs_store_round_trip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("doc.md");
        fs::write(&path, "one\ntwo\n").unwrap();

        let store = FsStore::new();
        let mut document = store.load(&path).unwrap();
        document.set_line(1, "TWO\n".to_string());
        assert!(store.persist(&path, &document).unwrap());

        assert_eq!(fs::read_to_string(&path).unwrap(), "one\nTWO\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_persist_through_symlink() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = temp_dir.path().join("real.md");
        let link = temp_dir.path().join("link.md");
        fs::write(&target, "x  \n").unwrap();
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let store = FsStore::new();
        let mut document = store.load(&link).unwrap();
        document.set_line(0, "x\n".to_string());
        assert!(store.persist(&link, &document).unwrap());

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&target).unwrap(), "x\n");
    }

    #[test]
    fn test_dry_run_never_writes() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("doc.md");
        fs::write(&path, "one\n").unwrap();

        let store = FsStore::new().dry_run(true);
        let document = Document::parse("changed\n");
        assert!(!store.persist(&path, &document).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "one\n");
    }

    #[test]
    fn test_load_missing_file() {
        let store = FsStore::new();
        let err = store.load(Path::new("/nonexistent/doc.md")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn test_guard_rejects_outside_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("site");
        fs::create_dir_all(&root).unwrap();
        let outside = temp_dir.path().join("doc.md");
        fs::write(&outside, "one\n").unwrap();

        let store = FsStore::new().with_guard(RootGuard::new(&root).unwrap());
        let err = store.load(&outside).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Safety(SafetyError::OutsideRoot { .. })
        ));
    }
}
