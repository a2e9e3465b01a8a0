//! Ingestion error types

use std::path::PathBuf;

use thiserror::Error;

/// Failure while building the content store
///
/// Every variant is fatal: a store is either fully loaded or not built at all.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Content root does not exist or is not a directory
    #[error("content root {} is not a directory", .0.display())]
    RootNotDirectory(PathBuf),

    /// Directory traversal failed
    #[error("failed to walk content tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// A document could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document is not valid JSON (strict loading only)
    #[error("invalid JSON in {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
