//! Content fingerprints for the before/after audit trail.

use std::fs;
use std::path::Path;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::MottleError;

/// Hex SHA-256 digests of one source file before and after the pipeline.
/// Purely observational; never drives control flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FingerprintPair {
    pub original: String,
    pub modified: String,
}

/// Hash a file's raw bytes. Format-agnostic: the digest covers the bytes on
/// disk, not any decoded representation.
pub fn file_digest(path: &Path) -> Result<String, MottleError> {
    let data = fs::read(path)?;
    Ok(hex::encode(Sha256::digest(&data)))
}
