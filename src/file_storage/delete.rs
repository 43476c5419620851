//! # Batch Deletion
//!
//! Removes every path it is given, collecting failures instead of stopping
//! at the first one. A path that is already gone counts as removed.

use std::fs;
use std::io;
use std::path::Path;

use super::errors::{DeleteErrors, DeleteFailure};

/// Remove each path in `paths`.
///
/// Files and empty directories are removed. Paths that do not exist are
/// skipped. Every other failure is collected into [`DeleteErrors`].
pub fn delete_all<I, P>(paths: I) -> Result<(), DeleteErrors>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut errors = DeleteErrors::default();

    for path in paths {
        let path = path.as_ref();
        match remove_path(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "already absent");
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to remove");
                errors.push(DeleteFailure {
                    path: path.to_path_buf(),
                    source: e,
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn remove_path(path: &Path) -> io::Result<()> {
    // symlink_metadata so a link to a directory is unlinked, not followed
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}
