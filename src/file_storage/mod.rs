//! # File Storage Module
//!
//! Writing verified uploads to disk, removing them again, and the small
//! path helpers around both.
//!
//! ## Guarantees
//! - Persisted files are created owner read/write only
//! - Persisting truncates; there is no append mode and no atomic rename
//! - Batch deletion attempts every path and treats "not found" as success

pub mod delete;
pub mod errors;
pub mod paths;
pub mod persist;

pub use delete::delete_all;
pub use errors::{DeleteErrors, DeleteFailure, StorageError, StorageResult};
pub use paths::{ensure_dir, files_by_ext, path_exists, type_by_filename, DEFAULT_DIR_MODE};
pub use persist::{persist, FilePersister, PersistedFile, DEFAULT_FILE_MODE};
