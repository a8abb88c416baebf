//! Flat-file persistence
//!
//! Each store serializes its whole collection as a single JSON array and
//! rewrites the file on every mutation. The rewrite is a plain overwrite, not
//! crash-atomic; a crash mid-write can leave a truncated file. That limitation
//! is part of the store's contract and is kept on purpose.

use crate::error::StorageError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Read a whole collection from `path`.
///
/// A missing or unreadable file is an error: load failures are fatal to store
/// construction, there is no empty-collection fallback.
pub fn load_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StorageError> {
    let bytes = fs::read(path).map_err(|source| StorageError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| StorageError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Overwrite `path` with the whole collection as one JSON array.
pub fn save_collection<T: Serialize>(path: &Path, records: &[T]) -> Result<(), StorageError> {
    let bytes = serde_json::to_vec_pretty(records).map_err(|source| StorageError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, bytes).map_err(|source| StorageError::Write {
        path: path.to_path_buf(),
        source,
    })
}
