//! # Upload Ingestion
//!
//! Reads an uploaded stream fully into memory and verifies it against the
//! claimed SHA-256 checksum before handing the bytes back. No disk I/O
//! happens here; persistence is a separate step.
//!
//! Transport failures (the stream broke) and integrity failures (the bytes
//! arrived but are not what the client said it sent) are distinct variants
//! so callers can decide whether a retry makes sense.

pub mod errors;
pub mod ingestor;

pub use errors::{IngestError, IngestResult};
pub use ingestor::{ingest, FileIngestor};
