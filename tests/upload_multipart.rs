//! Multipart upload extraction tests
//!
//! Bodies are built by hand so field order, names and truncation can be
//! controlled exactly.

use axum::body::Body;
use axum::extract::{FromRequest, Multipart};
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;

use svcutil::config::UploadConfig;
use svcutil::ingest::{FileIngestor, IngestError};
use svcutil::integrity::sha256_hex;
use svcutil::web::{read_verified_upload, ApiError};

const BOUNDARY: &str = "svcutil-test-boundary";

enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a str, &'a [u8]),
}

fn body(parts: &[Part<'_>], terminated: bool) -> Vec<u8> {
    let mut out = Vec::new();
    for part in parts {
        out.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::Text(name, value) => {
                out.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
                );
                out.extend_from_slice(value.as_bytes());
            }
            Part::File(name, filename, data) => {
                out.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                         Content-Type: text/plain\r\n\r\n",
                        name, filename
                    )
                    .as_bytes(),
                );
                out.extend_from_slice(data);
            }
        }
        out.extend_from_slice(b"\r\n");
    }
    if terminated {
        out.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    }
    out
}

async fn multipart(body: Vec<u8>) -> Multipart {
    let request = Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap();

    Multipart::from_request(request, &()).await.unwrap()
}

#[tokio::test]
async fn test_verified_upload_checksum_first() {
    let data = b"hello multipart";
    let checksum = sha256_hex(data);
    let mut mp = multipart(body(
        &[
            Part::Text("checksum", &checksum),
            Part::File("file", "greeting.txt", data),
        ],
        true,
    ))
    .await;

    let upload = read_verified_upload(&mut mp, &FileIngestor::default(), &UploadConfig::default())
        .await
        .unwrap();

    assert_eq!(upload.bytes, data);
    assert_eq!(upload.checksum, checksum);
    assert_eq!(upload.file_name.as_deref(), Some("greeting.txt"));
    assert_eq!(upload.content_type.as_deref(), Some("text/plain"));
}

#[tokio::test]
async fn test_verified_upload_file_first_with_extra_fields() {
    let data = b"order does not matter";
    let checksum = sha256_hex(data);
    let mut mp = multipart(body(
        &[
            Part::File("file", "a.txt", data),
            Part::Text("note", "ignored"),
            Part::Text("checksum", &checksum),
        ],
        true,
    ))
    .await;

    let upload = read_verified_upload(&mut mp, &FileIngestor::default(), &UploadConfig::default())
        .await
        .unwrap();
    assert_eq!(upload.bytes, data);
}

#[tokio::test]
async fn test_corrupted_upload_is_integrity_error() {
    let mut mp = multipart(body(
        &[
            Part::Text("checksum", &sha256_hex(b"what the client sent")),
            Part::File("file", "a.txt", b"what the server got"),
        ],
        true,
    ))
    .await;

    let err = read_verified_upload(&mut mp, &FileIngestor::default(), &UploadConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, IngestError::Integrity { .. }));

    let response = ApiError::from(err).into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_missing_checksum_field() {
    let mut mp = multipart(body(&[Part::File("file", "a.txt", b"data")], true)).await;

    let err = read_verified_upload(&mut mp, &FileIngestor::default(), &UploadConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, IngestError::MissingField(ref f) if f == "checksum"));
}

#[tokio::test]
async fn test_missing_file_field() {
    let mut mp = multipart(body(&[Part::Text("checksum", "abc")], true)).await;

    let err = read_verified_upload(&mut mp, &FileIngestor::default(), &UploadConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, IngestError::MissingField(ref f) if f == "file"));
}

#[tokio::test]
async fn test_custom_field_names() {
    let data = b"renamed fields";
    let checksum = sha256_hex(data);
    let fields = UploadConfig {
        file_field: "blob".to_string(),
        checksum_field: "sha256".to_string(),
    };
    let mut mp = multipart(body(
        &[
            Part::File("blob", "b.bin", data),
            Part::Text("sha256", &checksum),
        ],
        true,
    ))
    .await;

    let upload = read_verified_upload(&mut mp, &FileIngestor::default(), &fields)
        .await
        .unwrap();
    assert_eq!(upload.bytes, data);
}

#[tokio::test]
async fn test_oversized_upload_rejected() {
    let data = vec![b'x'; 4096];
    let checksum = sha256_hex(&data);
    let mut mp = multipart(body(
        &[
            Part::Text("checksum", &checksum),
            Part::File("file", "big.bin", &data),
        ],
        true,
    ))
    .await;

    let err = read_verified_upload(&mut mp, &FileIngestor::new(Some(1024)), &UploadConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, IngestError::TooLarge { limit: 1024 }));
}

#[tokio::test]
async fn test_truncated_body_is_transport_error() {
    let mut mp = multipart(body(
        &[
            Part::Text("checksum", &sha256_hex(b"data")),
            Part::File("file", "a.txt", b"data"),
        ],
        false,
    ))
    .await;

    let err = read_verified_upload(&mut mp, &FileIngestor::default(), &UploadConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, IngestError::Transport(_)));
    assert!(err.is_retryable());
}
