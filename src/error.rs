//! Error types for the content pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading content or writing build artifacts
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Duplicate post id `{id}`: {first:?} and {second:?}")]
    DuplicateId {
        id: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config {path:?}: {message}")]
    Config { path: PathBuf, message: String },
}
