//! Error types for casecheck
//!
//! Only a casing violation surfaces as a hard error. Filesystem read
//! failures are absorbed by the listing cache, and a file that does not
//! exist at all is left to the host's own resolution errors.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for casecheck operations
pub type CaseCheckResult<T> = Result<T, CaseCheckError>;

/// All errors that can occur in casecheck
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaseCheckError {
    #[error("`{path}` does not match the corresponding path on disk. Found `{corrected}`")]
    CaseMismatch {
        /// The path the build requested
        path: PathBuf,
        /// The casing the filesystem actually reports for the offending segment
        corrected: String,
    },
}

impl CaseCheckError {
    /// Create a case mismatch error
    pub fn mismatch(path: impl Into<PathBuf>, corrected: impl Into<String>) -> Self {
        Self::CaseMismatch {
            path: path.into(),
            corrected: corrected.into(),
        }
    }

    /// The on-disk name the offending segment should have used
    pub fn corrected(&self) -> &str {
        match self {
            Self::CaseMismatch { corrected, .. } => corrected,
        }
    }
}
