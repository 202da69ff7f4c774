//! Output sink trait and error types

use crate::model::{Category, Record, Version};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Destination for category artifacts
///
/// One artifact exists per (version, category). Writing the same key again
/// replaces the earlier artifact.
pub trait OutputSink: Send + Sync {
    /// Persists the records of one category
    ///
    /// # Returns
    ///
    /// The location the artifact was written to
    fn write(&self, version: Version, category: Category, records: &[Record]) -> OutputResult<PathBuf>;
}
