//! Error types for motif_mark
//!
//! Every failure aborts the run: there is no partial-success mode, so the
//! variants here carry enough context for a single clear message.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type
#[derive(Error, Debug)]
pub enum MotifMarkError {
    /// A motif contains a character outside the IUPAC alphabet
    #[error("invalid IUPAC character '{character}' in motif '{motif}'")]
    InvalidMotifCharacter { character: char, motif: String },

    /// FASTA input without a header before sequence data, or with no records
    #[error("malformed FASTA: {reason}")]
    MalformedFasta { reason: String },

    /// Motif input had no motifs after blank lines were dropped
    #[error("no motifs found in motif input")]
    EmptyMotifList,

    /// A required input path was not given
    #[error("missing required input: {0}")]
    MissingInput(&'static str),

    #[error("failed to access '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl MotifMarkError {
    pub fn malformed_fasta(reason: impl Into<String>) -> Self {
        Self::MalformedFasta {
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, MotifMarkError>;
