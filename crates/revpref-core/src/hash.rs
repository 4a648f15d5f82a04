//! Content hashing for datasets and reports.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::dataset::Dataset;
use crate::errors::RpError;
use crate::io::DatasetFile;

/// Hex-encoded SHA-256 of the compact JSON encoding of `value`.
pub fn hash_json<T: Serialize>(value: &T) -> Result<String, RpError> {
    let json =
        serde_json::to_vec(value).map_err(|err| RpError::serde("serialize", err.to_string()))?;
    let mut hasher = Sha256::new();
    hasher.update(json);
    Ok(format!("{:x}", hasher.finalize()))
}

/// Canonical content hash of a dataset.
pub fn dataset_hash(dataset: &Dataset) -> Result<String, RpError> {
    hash_json(&DatasetFile::from(dataset))
}
