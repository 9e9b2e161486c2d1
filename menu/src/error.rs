use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// The remote document was not valid JSON or did not match the menu schema.
#[derive(Error, Debug)]
#[error("malformed menu document: {0}")]
pub struct DecodeError(#[from] serde_json::Error);

/// The local snapshot could not be read or committed. A failed commit leaves
/// the previously committed snapshot in place.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("failed to read snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("snapshot {path} is corrupted: {source}")]
    Corrupted {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to encode snapshot: {0}")]
    Encode(serde_json::Error),

    #[error("failed to commit snapshot {path}: {source}")]
    Commit {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Everything that can go wrong during one fetch-decode-replace cycle.
/// Whichever variant fires, the store keeps what it held before the cycle.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("remote menu source answered {0}")]
    Status(StatusCode),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
