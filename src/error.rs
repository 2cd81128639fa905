//! Error taxonomy for the analysis core.
//!
//! Per-file failures (IO, decode, parse, git) are caught at the point of
//! use and attached to the relevant `File` node as a warning string —
//! they never reach this type (see [`crate::model::File::warnings`]).
//! `AnalysisError` exists for the two places that must fail the whole
//! run: configuration validation (fail-fast, before analysis begins)
//! and `GitCache`'s internal plumbing.

use std::path::PathBuf;

/// Errors that abort a run rather than being captured per-file.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Decoding never hard-fails today — [`crate::reader`] always falls
    /// back to a lossy UTF-8 decode — but the variant is kept so a future
    /// strict mode has somewhere to report an unrecoverable decode error.
    #[error("decode error at {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("git error: {0}")]
    Git(String),
}

impl From<git2::Error> for AnalysisError {
    fn from(err: git2::Error) -> Self {
        AnalysisError::Git(err.message().to_string())
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
