//! # File Persistence
//!
//! Writes a byte stream to a path, creating or truncating it, with a fixed
//! permission mode. No temp-file-and-rename: a failed copy leaves whatever
//! was written so far.

use std::fs::{File, OpenOptions};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use super::errors::{StorageError, StorageResult};

/// Owner read/write only
pub const DEFAULT_FILE_MODE: u32 = 0o600;

/// A file written by [`FilePersister`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedFile {
    pub path: PathBuf,
    /// Bytes copied into the file
    pub size: u64,
    pub mode: u32,
}

/// Writes streams to disk with a fixed permission mode
#[derive(Debug, Clone, Copy)]
pub struct FilePersister {
    mode: u32,
}

impl Default for FilePersister {
    fn default() -> Self {
        Self::new(DEFAULT_FILE_MODE)
    }
}

impl FilePersister {
    /// Create a persister; `mode` only has effect on Unix
    pub fn new(mode: u32) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> u32 {
        self.mode
    }

    /// Copy `source` into `path`. The file handle is closed before returning.
    pub fn persist<P: AsRef<Path>, R: Read>(&self, path: P, source: R) -> StorageResult<PersistedFile> {
        let (persisted, file) = self.persist_returning_file(path, source)?;
        drop(file);
        Ok(persisted)
    }

    pub fn persist_bytes<P: AsRef<Path>>(&self, path: P, bytes: &[u8]) -> StorageResult<PersistedFile> {
        self.persist(path, bytes)
    }

    /// Copy `source` into `path` and hand the open read/write handle to the
    /// caller, positioned at the end of the written data.
    pub fn persist_returning_file<P: AsRef<Path>, R: Read>(
        &self,
        path: P,
        mut source: R,
    ) -> StorageResult<(PersistedFile, File)> {
        let path = path.as_ref();
        let mut file = self.open(path)?;

        let size = io::copy(&mut source, &mut file).map_err(|source| StorageError::Copy {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), size, "file persisted");

        Ok((
            PersistedFile {
                path: path.to_path_buf(),
                size,
                mode: self.mode,
            },
            file,
        ))
    }

    fn open(&self, path: &Path) -> StorageResult<File> {
        let mut options = OpenOptions::new();
        // Truncated only once the mode is settled
        options.read(true).write(true).create(true).truncate(false);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(self.mode);
        }

        let file = options.open(path).map_err(|source| StorageError::Create {
            path: path.to_path_buf(),
            source,
        })?;

        let metadata = file.metadata().map_err(|source| StorageError::Stat {
            path: path.to_path_buf(),
            source,
        })?;

        // Creation mode is filtered by the umask and ignored for existing files
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if metadata.permissions().mode() & 0o7777 != self.mode & 0o7777 {
                file.set_permissions(std::fs::Permissions::from_mode(self.mode))
                    .map_err(|source| StorageError::Permissions {
                        path: path.to_path_buf(),
                        source,
                    })?;
            }
        }

        // Devices such as /dev/null cannot be truncated
        if metadata.is_file() {
            file.set_len(0).map_err(|source| StorageError::Truncate {
                path: path.to_path_buf(),
                source,
            })?;
        }

        Ok(file)
    }
}

/// Persist with the default owner-only mode
pub fn persist<P: AsRef<Path>, R: Read>(path: P, source: R) -> StorageResult<PersistedFile> {
    FilePersister::default().persist(path, source)
}
