//! # Error Module
//!
//! The crate-wide error type. World generation, meshing and streaming are total and never
//! produce errors; only the outer surfaces (configuration loading, snapshot restoration)
//! return a [`Result`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration or restoring world snapshots.
#[derive(Debug, Error)]
pub enum WorldError {
    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that was being read
        path: PathBuf,
        /// The underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// JSON input did not match the expected shape.
    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A configuration value is outside its accepted range.
    #[error("invalid world configuration: {0}")]
    InvalidConfig(String),

    /// A snapshot referenced a block id with no `BlockType`.
    #[error("unknown block id {0}")]
    UnknownBlockId(u8),
}

/// Convenience alias used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, WorldError>;
