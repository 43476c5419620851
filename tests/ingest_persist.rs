//! Ingest-then-persist pipeline tests
//!
//! - Verified bytes reach disk unchanged
//! - Mismatched uploads never yield a buffer and never touch disk
//! - Persisting overwrites completely

use std::fs;
use std::io::{self, Read};

use svcutil::file_storage::{ensure_dir, FilePersister, StorageError, DEFAULT_DIR_MODE};
use svcutil::ingest::{ingest, FileIngestor, IngestError};
use svcutil::integrity::sha256_hex;
use svcutil::{new_id, Config};
use tempfile::TempDir;

/// Delivers the payload in small pieces, like a socket
struct Trickle<'a> {
    data: &'a [u8],
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.data.len().min(buf.len()).min(3);
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

#[test]
fn test_upload_flow_stores_verified_bytes_under_new_id() {
    let temp = TempDir::new().unwrap();
    let config = Config {
        storage_root: temp.path().join("files"),
        ..Config::default()
    };
    ensure_dir(&config.storage_root, config.dir_mode).unwrap();

    let payload = b"quarterly report, final version";
    let bytes = config
        .ingestor()
        .ingest(Trickle { data: payload }, &sha256_hex(payload))
        .unwrap();

    let id = new_id().unwrap();
    let path = config.storage_root.join(id.to_string());
    let persisted = config.persister().persist_bytes(&path, &bytes).unwrap();

    assert_eq!(persisted.size, payload.len() as u64);
    assert_eq!(fs::read(&path).unwrap(), payload);
}

#[test]
fn test_mismatch_never_reaches_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("upload");

    let result = ingest(&b"bytes as received"[..], &sha256_hex(b"bytes as sent"));
    let err = match result {
        Ok(bytes) => panic!("mismatched upload returned {} bytes", bytes.len()),
        Err(e) => e,
    };

    assert!(matches!(err, IngestError::Integrity { .. }));
    assert!(!err.is_retryable());
    assert!(!path.exists());
}

#[test]
fn test_uppercase_checksum_is_a_mismatch() {
    let payload = b"case matters";
    let err = ingest(&payload[..], &sha256_hex(payload).to_uppercase()).unwrap_err();
    assert!(matches!(err, IngestError::Integrity { .. }));
}

#[test]
fn test_overwrite_shrinks_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("existing");
    fs::write(&path, vec![0u8; 100]).unwrap();

    let persisted = FilePersister::default().persist(&path, &b"hello"[..]).unwrap();

    assert_eq!(persisted.size, 5);
    assert_eq!(fs::metadata(&path).unwrap().len(), 5);
    assert_eq!(fs::read(&path).unwrap(), b"hello");
}

#[test]
fn test_persist_into_missing_directory_fails() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("missing/parent/file");

    let err = FilePersister::default().persist(&path, &b"x"[..]).unwrap_err();
    assert!(matches!(err, StorageError::Create { .. }));

    ensure_dir(path.parent().unwrap(), DEFAULT_DIR_MODE).unwrap();
    FilePersister::default().persist(&path, &b"x"[..]).unwrap();
}

#[test]
fn test_limit_applies_before_verification() {
    let payload = vec![1u8; 2048];
    let err = FileIngestor::new(Some(1024))
        .ingest(&payload[..], &sha256_hex(&payload))
        .unwrap_err();
    assert!(matches!(err, IngestError::TooLarge { limit: 1024 }));
}
