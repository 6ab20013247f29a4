//! Error types.
//!
//! Queries against absent nodes are not errors; they simply answer "not
//! connected". The only graph-level failure is asking for a hop threshold the
//! engine has no set-intersection test for.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Contract violations raised by the graph engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The requested degree is not one of 0, 1, 2 or 4.
    #[error("unsupported degree of separation {hops}: expected one of 0, 1, 2, 4")]
    UnsupportedDegree {
        /// The rejected hop count.
        hops: u32,
    },
}

/// A transaction record that could not be turned into an edge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The record has fewer than the three leading fields (time, id1, id2).
    #[error("malformed record: expected at least 3 fields, found {found}")]
    MissingField {
        /// Number of comma-separated fields present.
        found: usize,
    },
    /// An id column does not hold an integer.
    #[error("malformed record: {field} is not an integer id: {value:?}")]
    InvalidId {
        /// Column name (`id1` or `id2`).
        field: &'static str,
        /// The offending text, trimmed.
        value: String,
    },
}

/// Failures of an end-to-end run.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading or writing one of the run's files failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The configuration file is not valid JSON for [`crate::Config`].
    #[error("invalid configuration {path}: {source}")]
    Config {
        /// Configuration file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// A run needs exactly one output path per feature.
    #[error("expected {expected} output paths, got {found}")]
    OutputCount {
        /// Number of features.
        expected: usize,
        /// Number of paths supplied.
        found: usize,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for pipeline operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
