//! Crate-level error type
//!
//! Startup failures (content ingestion, binding the listener) surface through
//! this type. Per-request and per-connection failures have their own error
//! types in `query` and `hub` and never reach here.

use thiserror::Error;

use crate::content::LoadError;

/// Result alias used by fallible startup paths
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Content tree could not be ingested
    #[error("content store: {0}")]
    Content(#[from] LoadError),

    /// Socket or other I/O failure outside ingestion
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
