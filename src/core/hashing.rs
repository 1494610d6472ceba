// ─── Hashing ───
// SHA-1 / SHA-256 digests of buffers and files, rendered as lowercase hex.

use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::core::error::{ResolverError, ResolverResult};

const BUF_SIZE: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha1,
    Sha256,
}

impl HashAlgorithm {
    pub fn name(&self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "SHA-1",
            HashAlgorithm::Sha256 => "SHA-256",
        }
    }

    pub fn hasher(&self) -> Hasher {
        match self {
            HashAlgorithm::Sha1 => Hasher::Sha1(Sha1::new()),
            HashAlgorithm::Sha256 => Hasher::Sha256(Sha256::new()),
        }
    }

    /// Digest of an in-memory buffer.
    pub fn hash_bytes(&self, bytes: &[u8]) -> String {
        let mut hasher = self.hasher();
        hasher.update(bytes);
        hasher.finalize_hex()
    }

    /// Digest of a file, read in bounded chunks.
    pub fn hash_file(&self, path: &Path) -> ResolverResult<String> {
        let mut file = File::open(path).map_err(|e| ResolverError::io(path, e))?;
        let mut hasher = self.hasher();
        let mut buf = vec![0u8; BUF_SIZE];
        loop {
            let n = file.read(&mut buf).map_err(|e| ResolverError::io(path, e))?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }
        Ok(hasher.finalize_hex())
    }
}

/// Incremental hasher, used when hashing a body while it streams to disk.
pub enum Hasher {
    Sha1(Sha1),
    Sha256(Sha256),
}

impl Hasher {
    pub fn update(&mut self, bytes: &[u8]) {
        match self {
            Hasher::Sha1(h) => h.update(bytes),
            Hasher::Sha256(h) => h.update(bytes),
        }
    }

    pub fn finalize_hex(self) -> String {
        match self {
            Hasher::Sha1(h) => hex::encode(h.finalize()),
            Hasher::Sha256(h) => hex::encode(h.finalize()),
        }
    }
}

/// An expected digest together with the algorithm that produced it.
#[derive(Debug, Clone)]
pub struct Hash {
    pub algorithm: HashAlgorithm,
    pub hex_digest: String,
}

impl Hash {
    pub fn new(hex_digest: impl Into<String>, algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            hex_digest: hex_digest.into(),
        }
    }

    pub fn sha1(hex_digest: impl Into<String>) -> Self {
        Self::new(hex_digest, HashAlgorithm::Sha1)
    }

    pub fn sha256(hex_digest: impl Into<String>) -> Self {
        Self::new(hex_digest, HashAlgorithm::Sha256)
    }

    /// Case-insensitive comparison against a computed hex digest.
    pub fn matches(&self, actual_hex: &str) -> bool {
        self.hex_digest.eq_ignore_ascii_case(actual_hex)
    }

    /// Recompute the digest of `path` and compare.
    pub fn verify(&self, path: &Path) -> ResolverResult<bool> {
        let actual = self.algorithm.hash_file(path)?;
        Ok(self.matches(&actual))
    }
}

impl PartialEq for Hash {
    fn eq(&self, other: &Self) -> bool {
        self.algorithm == other.algorithm && self.matches(&other.hex_digest)
    }
}

impl Eq for Hash {}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algorithm.name(), self.hex_digest)
    }
}
