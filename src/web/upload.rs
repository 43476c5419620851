//! Multipart upload extraction
//!
//! Pulls the file field and its checksum field out of a multipart body and
//! runs them through [`FileIngestor`]. Field order does not matter; unknown
//! fields are skipped.

use std::io;

use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;

use crate::config::UploadConfig;
use crate::ingest::{FileIngestor, IngestError, IngestResult};

/// A file whose contents matched its claimed checksum
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedUpload {
    /// Client-supplied file name, if any
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub checksum: String,
    pub bytes: Vec<u8>,
}

/// Read the whole multipart body and verify the file against its checksum
pub async fn read_verified_upload(
    multipart: &mut Multipart,
    ingestor: &FileIngestor,
    fields: &UploadConfig,
) -> IngestResult<VerifiedUpload> {
    let mut file: Option<(Option<String>, Option<String>, Vec<u8>)> = None;
    let mut checksum: Option<String> = None;

    while let Some(mut field) = multipart.next_field().await.map_err(transport)? {
        let name = field.name().unwrap_or_default().to_string();

        if name == fields.file_field {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);

            let mut data = Vec::new();
            while let Some(chunk) = field.chunk().await.map_err(transport)? {
                data.extend_from_slice(&chunk);
                if let Some(limit) = ingestor.max_bytes() {
                    if data.len() as u64 > limit {
                        return Err(IngestError::TooLarge { limit });
                    }
                }
            }

            file = Some((file_name, content_type, data));
        } else if name == fields.checksum_field {
            checksum = Some(field.text().await.map_err(transport)?);
        }
    }

    let (file_name, content_type, data) =
        file.ok_or_else(|| IngestError::MissingField(fields.file_field.clone()))?;
    let checksum = checksum
        .filter(|c| !c.is_empty())
        .ok_or_else(|| IngestError::MissingField(fields.checksum_field.clone()))?;

    let bytes = ingestor.verify_bytes(data, &checksum)?;

    Ok(VerifiedUpload {
        file_name,
        content_type,
        checksum,
        bytes,
    })
}

fn transport(e: MultipartError) -> IngestError {
    IngestError::Transport(io::Error::new(io::ErrorKind::Other, e.to_string()))
}
