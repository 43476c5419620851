//! # File Storage Errors

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// File storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Target could not be opened (permissions, missing parent, disk full)
    #[error("Failed to create {}: {source}", .path.display())]
    Create { path: PathBuf, source: io::Error },

    /// Existing target kept its contents; its mode could not be changed
    #[error("Failed to set permissions on {}: {source}", .path.display())]
    Permissions { path: PathBuf, source: io::Error },

    #[error("Failed to truncate {}: {source}", .path.display())]
    Truncate { path: PathBuf, source: io::Error },

    /// Copy into the target failed part way
    #[error("Failed to write {}: {source}", .path.display())]
    Copy { path: PathBuf, source: io::Error },

    #[error("Failed to stat {}: {source}", .path.display())]
    Stat { path: PathBuf, source: io::Error },

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("Failed to read directory {}: {source}", .path.display())]
    ReadDir { path: PathBuf, source: io::Error },

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),
}

impl StorageError {
    /// Path the failed operation targeted
    pub fn path(&self) -> &Path {
        match self {
            StorageError::Create { path, .. }
            | StorageError::Permissions { path, .. }
            | StorageError::Truncate { path, .. }
            | StorageError::Copy { path, .. }
            | StorageError::Stat { path, .. }
            | StorageError::CreateDir { path, .. }
            | StorageError::ReadDir { path, .. } => path,
            StorageError::NotADirectory(path) => path,
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        500
    }
}

/// One path that could not be removed
#[derive(Debug, Error)]
#[error("remove {}: {source}", .path.display())]
pub struct DeleteFailure {
    pub path: PathBuf,
    pub source: io::Error,
}

/// Every failure from one batch deletion.
///
/// Ordered most recently encountered first.
#[derive(Debug, Default)]
pub struct DeleteErrors {
    failures: Vec<DeleteFailure>,
}

impl DeleteErrors {
    pub(crate) fn push(&mut self, failure: DeleteFailure) {
        self.failures.insert(0, failure);
    }

    pub fn failures(&self) -> &[DeleteFailure] {
        &self.failures
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeleteFailure> {
        self.failures.iter()
    }

    pub fn into_failures(self) -> Vec<DeleteFailure> {
        self.failures
    }
}

impl fmt::Display for DeleteErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for DeleteErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.failures
            .first()
            .map(|f| f as &(dyn std::error::Error + 'static))
    }
}

impl IntoIterator for DeleteErrors {
    type Item = DeleteFailure;
    type IntoIter = std::vec::IntoIter<DeleteFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}

impl<'a> IntoIterator for &'a DeleteErrors {
    type Item = &'a DeleteFailure;
    type IntoIter = std::slice::Iter<'a, DeleteFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure(path: &str, msg: &str) -> DeleteFailure {
        DeleteFailure {
            path: PathBuf::from(path),
            source: io::Error::new(io::ErrorKind::PermissionDenied, msg.to_string()),
        }
    }

    #[test]
    fn test_most_recent_first() {
        let mut errors = DeleteErrors::default();
        errors.push(failure("/a", "first"));
        errors.push(failure("/b", "second"));

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.failures()[0].path, PathBuf::from("/b"));
        assert_eq!(errors.to_string(), "remove /b: second; remove /a: first");
    }

    #[test]
    fn test_source_is_latest_failure() {
        use std::error::Error;

        let mut errors = DeleteErrors::default();
        assert!(errors.source().is_none());
        errors.push(failure("/a", "denied"));
        assert_eq!(errors.source().unwrap().to_string(), "remove /a: denied");
    }

    #[test]
    fn test_storage_error_path() {
        let err = StorageError::Create {
            path: PathBuf::from("/x/y"),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.path(), Path::new("/x/y"));
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_string(), "Failed to create /x/y: missing");
    }
}
