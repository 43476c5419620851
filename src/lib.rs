//! svcutil - shared utilities for small HTTP services
//!
//! Time-ordered identifiers, SHA-256 verified upload ingestion, and the
//! file persistence and cleanup around it.

pub mod cli;
pub mod clock;
pub mod config;
pub mod encoding;
pub mod file_storage;
pub mod id;
pub mod ingest;
pub mod integrity;
pub mod web;

pub use config::{Config, UploadConfig};
pub use file_storage::{delete_all, persist, DeleteErrors, FilePersister, PersistedFile, StorageError};
pub use id::{new_id, Id, IdError, IdGenerator};
pub use ingest::{ingest, FileIngestor, IngestError};
pub use integrity::{sha256_hex, verify};
