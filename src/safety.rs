use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directories under the root that documents may never resolve into.
const FORBIDDEN_DIRS: &[&str] = &[".git"];

/// Confines document rewrites to one directory tree.
#[derive(Debug, Clone)]
pub struct RootGuard {
    /// Canonical root directory
    root: PathBuf,
    /// Canonical paths to forbidden directories
    forbidden_paths: Vec<PathBuf>,
}

#[derive(Error, Debug)]
pub enum SafetyError {
    #[error("Path is outside root: {path} (root: {root})")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    #[error("Path is in forbidden directory: {path} (forbidden: {forbidden})")]
    ForbiddenPath { path: PathBuf, forbidden: PathBuf },

    #[error("Failed to canonicalize path: {0}")]
    Canonicalize(#[from] std::io::Error),
}

impl RootGuard {
    /// Create a guard for `root`, canonicalized so symlinks resolve.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, SafetyError> {
        let root = root.as_ref().canonicalize()?;

        let forbidden_paths = FORBIDDEN_DIRS
            .iter()
            .filter_map(|dir| root.join(dir).canonicalize().ok())
            .collect();

        Ok(Self {
            root,
            forbidden_paths,
        })
    }

    /// Check that a document path is safe to rewrite.
    ///
    /// Relative paths resolve against the root. Returns the canonical path.
    pub fn validate_path(&self, path: impl AsRef<Path>) -> Result<PathBuf, SafetyError> {
        let path = path.as_ref();

        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };

        let canonical = absolute.canonicalize()?;
        self.check_canonical(&canonical)?;

        Ok(canonical)
    }

    fn check_canonical(&self, canonical: &Path) -> Result<(), SafetyError> {
        if !canonical.starts_with(&self.root) {
            return Err(SafetyError::OutsideRoot {
                path: canonical.to_path_buf(),
                root: self.root.clone(),
            });
        }

        for forbidden in &self.forbidden_paths {
            if canonical.starts_with(forbidden) {
                return Err(SafetyError::ForbiddenPath {
                    path: canonical.to_path_buf(),
                    forbidden: forbidden.clone(),
                });
            }
        }

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_validate_path_inside_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        let guard = RootGuard::new(root).unwrap();

        let file = root.join("docs/index.md");
        fs::create_dir_all(file.parent().unwrap()).unwrap();
        fs::write(&file, b"# Title\n").unwrap();

        assert!(guard.validate_path(&file).is_ok());
        assert!(guard.validate_path("docs/index.md").is_ok());
    }

    #[test]
    fn test_validate_path_outside_root() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("site");
        fs::create_dir_all(&root).unwrap();
        let guard = RootGuard::new(&root).unwrap();

        let outside = temp_dir.path().join("notes.md");
        fs::write(&outside, b"").unwrap();

        let result = guard.validate_path(&outside);
        assert!(matches!(result, Err(SafetyError::OutsideRoot { .. })));
    }

    #[test]
    fn test_validate_path_in_git_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join(".git/COMMIT_EDITMSG"), b"msg\n").unwrap();

        let guard = RootGuard::new(root).unwrap();
        let result = guard.validate_path(".git/COMMIT_EDITMSG");
        assert!(matches!(result, Err(SafetyError::ForbiddenPath { .. })));
    }

    #[test]
    fn test_missing_file_fails_canonicalize() {
        let temp_dir = tempfile::tempdir().unwrap();
        let guard = RootGuard::new(temp_dir.path()).unwrap();

        let result = guard.validate_path("missing.md");
        assert!(matches!(result, Err(SafetyError::Canonicalize(_))));
    }

    #[test]
    #[cfg(unix)]
    fn test_validate_symlink_escape() {
        use std::os::unix::fs::symlink;

        let temp_dir = tempfile::tempdir().unwrap();
        let root = temp_dir.path().join("site");
        fs::create_dir_all(&root).unwrap();

        let outside = temp_dir.path().join("outside.md");
        fs::write(&outside, b"").unwrap();

        let link = root.join("escape.md");
        symlink(&outside, &link).unwrap();

        let guard = RootGuard::new(&root).unwrap();
        let result = guard.validate_path(&link);

        assert!(matches!(result, Err(SafetyError::OutsideRoot { .. })));
    }
}
