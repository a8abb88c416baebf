//! Error types for the persistence, store, and configuration layers.

use crate::types::CourseId;
use std::path::PathBuf;
use thiserror::Error;

/// Failures in the flat-file persistence layer.
///
/// A read failure at load time is fatal to store construction. A write failure
/// surfaces after the in-memory mutation has already happened; there is no
/// rollback, the file simply lags the map until the next successful save.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed collection in {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode collection for {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Outcomes of store operations that address a specific record.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No course with the addressed id exists.
    #[error("course {0} does not exist")]
    CourseNotFound(CourseId),

    /// No user with the addressed name exists.
    #[error("user {0:?} does not exist")]
    UserNotFound(String),

    /// Create addressed a username that is already taken. A conflict, distinct
    /// from absence: the existing record is left untouched.
    #[error("user {0:?} already exists")]
    UserExists(String),

    /// A cross-store operation ran before [`crate::store::wire`] connected the
    /// peers, or after the peer was dropped.
    #[error("store has no {0} peer attached")]
    NotWired(&'static str),

    /// The backing file could not be rewritten; the in-memory mutation stands.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid logging settings: {0}")]
    Logging(String),
}
