//! Read-then-verify ingestion

use std::io::Read;

use super::errors::{IngestError, IngestResult};
use crate::integrity::IntegrityCheck;

/// Reads uploads into memory and verifies their checksum
#[derive(Debug, Clone, Copy, Default)]
pub struct FileIngestor {
    max_bytes: Option<u64>,
}

impl FileIngestor {
    /// Create an ingestor; `None` accepts uploads of any size
    pub fn new(max_bytes: Option<u64>) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> Option<u64> {
        self.max_bytes
    }

    /// Read `reader` to the end, then verify against `claimed`.
    ///
    /// Nothing is returned unless the whole stream was read and its digest
    /// matches.
    pub fn ingest<R: Read>(&self, reader: R, claimed: &str) -> IngestResult<Vec<u8>> {
        let bytes = self.read_all(reader)?;
        self.verify_bytes(bytes, claimed)
    }

    /// Verify a buffer that is already in memory
    pub fn verify_bytes(&self, bytes: Vec<u8>, claimed: &str) -> IngestResult<Vec<u8>> {
        self.check_size(bytes.len() as u64)?;

        IntegrityCheck::run(bytes, claimed)
            .into_verified()
            .map_err(|(expected, actual)| {
                tracing::warn!(%expected, %actual, "upload checksum mismatch");
                IngestError::Integrity { expected, actual }
            })
    }

    fn read_all<R: Read>(&self, reader: R) -> IngestResult<Vec<u8>> {
        let mut buf = Vec::new();

        match self.max_bytes {
            // One byte past the limit is enough to tell it was exceeded
            Some(limit) => {
                reader
                    .take(limit.saturating_add(1))
                    .read_to_end(&mut buf)
                    .map_err(IngestError::Transport)?;
            }
            None => {
                let mut reader = reader;
                reader.read_to_end(&mut buf).map_err(IngestError::Transport)?;
            }
        }

        self.check_size(buf.len() as u64)?;
        Ok(buf)
    }

    fn check_size(&self, len: u64) -> IngestResult<()> {
        match self.max_bytes {
            Some(limit) if len > limit => Err(IngestError::TooLarge { limit }),
            _ => Ok(()),
        }
    }
}

/// Ingest with no size limit
pub fn ingest<R: Read>(reader: R, claimed: &str) -> IngestResult<Vec<u8>> {
    FileIngestor::default().ingest(reader, claimed)
}
