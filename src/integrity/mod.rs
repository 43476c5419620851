//! # Integrity Verification
//!
//! SHA-256 digests of upload contents, compared against the checksum the
//! client claims. The algorithm is fixed and not negotiated per request.

mod checksum;

pub use checksum::{sha256_hex, verify, IntegrityCheck, Sha256Reader};
