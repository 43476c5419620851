//! Path helpers

use std::fs::{self, DirBuilder};
use std::io;
use std::path::{Path, PathBuf};

use super::errors::{StorageError, StorageResult};

/// Owner-only; directories need the execute bit to be entered
pub const DEFAULT_DIR_MODE: u32 = 0o700;

/// Whether `path` exists, without following a final symlink.
///
/// Errors other than not-found (e.g. permission denied on a parent) are
/// returned rather than guessed at.
pub fn path_exists<P: AsRef<Path>>(path: P) -> StorageResult<bool> {
    let path = path.as_ref();
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(source) => Err(StorageError::Stat {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Create `path` and any missing parents with `mode`; no-op if it is
/// already a directory.
pub fn ensure_dir<P: AsRef<Path>>(path: P, mode: u32) -> StorageResult<()> {
    let path = path.as_ref();

    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => return Ok(()),
        Ok(_) => return Err(StorageError::NotADirectory(path.to_path_buf())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(StorageError::Stat {
                path: path.to_path_buf(),
                source,
            })
        }
    }

    let mut builder = DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(path).map_err(|source| StorageError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// Regular files directly inside `dir` whose name ends with `ext`
/// (e.g. `".json"`), sorted. A missing `dir` yields no files.
pub fn files_by_ext<P: AsRef<Path>>(dir: P, ext: &str) -> StorageResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let read_err = |source| StorageError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(read_err(e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(read_err)?.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.ends_with(ext))
            .unwrap_or(false);
        if matches && path.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// MIME type guessed from the file name's extension
pub fn type_by_filename(filename: &str) -> Option<String> {
    mime_guess::from_path(filename)
        .first_raw()
        .map(str::to_string)
}
