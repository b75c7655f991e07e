//! Error types for loading, configuring and persisting comparisons.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the I/O edges of the comparison pipeline.
///
/// The comparator itself never fails; every variant here comes from the
/// filesystem, JSON encoding or configuration.
#[derive(Debug, Error)]
pub enum BenchError {
    /// A discovery pattern is not a valid glob.
    #[error("invalid file pattern {pattern}: {source}")]
    Pattern {
        /// The rejected pattern.
        pattern: String,
        /// Underlying glob error.
        #[source]
        source: glob::PatternError,
    },

    /// A report or comparison file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// A file was read but is not valid JSON for the expected type.
    #[error("failed to parse JSON {}: {source}", .path.display())]
    Parse {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The comparison could not be encoded.
    #[error("failed to encode JSON: {0}")]
    Encode(#[source] serde_json::Error),

    /// An output file or directory could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// Settings could not be assembled.
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result type for fallible pipeline operations.
pub type Result<T> = std::result::Result<T, BenchError>;
