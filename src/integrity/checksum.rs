//! SHA-256 checksum computation and comparison

use std::io::{self, Read};

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Lowercase hex SHA-256 of `data`
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// True iff `sha256_hex(data)` equals `claimed` exactly.
///
/// Case-sensitive; callers normalize case beforehand if they accept
/// uppercase hex.
pub fn verify(data: &[u8], claimed: &str) -> bool {
    digest_matches(&sha256_hex(data), claimed)
}

fn digest_matches(actual: &str, claimed: &str) -> bool {
    // ct_eq on slices of unequal length is false
    actual.as_bytes().ct_eq(claimed.as_bytes()).into()
}

/// Outcome of checking a buffer against a claimed digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrityCheck {
    bytes: Vec<u8>,
    actual: String,
    expected: String,
    matched: bool,
}

impl IntegrityCheck {
    /// Digest `bytes` and compare against `claimed`
    pub fn run(bytes: Vec<u8>, claimed: &str) -> Self {
        let actual = sha256_hex(&bytes);
        let matched = digest_matches(&actual, claimed);
        Self {
            bytes,
            actual,
            expected: claimed.to_string(),
            matched,
        }
    }

    pub fn matched(&self) -> bool {
        self.matched
    }

    /// Digest computed from the bytes
    pub fn actual(&self) -> &str {
        &self.actual
    }

    /// Digest the caller claimed
    pub fn expected(&self) -> &str {
        &self.expected
    }

    /// The verified bytes, or `(expected, actual)` on mismatch.
    ///
    /// The buffer is dropped on mismatch.
    pub fn into_verified(self) -> Result<Vec<u8>, (String, String)> {
        if self.matched {
            Ok(self.bytes)
        } else {
            Err((self.expected, self.actual))
        }
    }
}

/// Wraps a reader and hashes everything read through it
pub struct Sha256Reader<R> {
    inner: R,
    hasher: Sha256,
    len: u64,
}

impl<R: Read> Sha256Reader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            hasher: Sha256::new(),
            len: 0,
        }
    }

    /// Bytes read so far
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Raw digest of everything read so far
    pub fn finalize(self) -> [u8; 32] {
        self.hasher.finalize().into()
    }

    /// Lowercase hex digest of everything read so far
    pub fn finalize_hex(self) -> String {
        format!("{:x}", self.hasher.finalize())
    }
}

impl<R: Read> Read for Sha256Reader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        self.len += n as u64;
        Ok(n)
    }
}
