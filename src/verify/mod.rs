//! Case-verification walk
//!
//! Walks a resolved path upward segment by segment, checking each one
//! against what the filesystem actually reports for its parent
//! directory. Everything at or above the filesystem root is trusted, as
//! is the current-directory sentinel of relative paths.

use crate::cache::DirListingCache;
use crate::path;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::trace;

/// Outcome of verifying one resolved path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationResult {
    /// Every segment matches the on-disk casing
    Confirmed,
    /// A segment exists on disk under a different casing
    Mismatch {
        /// The candidate path at the offending segment
        path: PathBuf,
        /// The casing the filesystem actually reports
        corrected: String,
    },
    /// No case-variant of a segment exists at all; not a casing error
    Nonexistent,
}

/// Verifies resolved paths against on-disk casing via the listing cache
pub struct CaseVerifier {
    cache: Arc<DirListingCache>,
}

impl CaseVerifier {
    /// Create a verifier over a shared listing cache
    pub fn new(cache: Arc<DirListingCache>) -> Self {
        Self { cache }
    }

    /// Check every segment of `filepath` against its parent's listing
    ///
    /// Ascends from the leaf toward the root, pulling one cached listing
    /// per level. Returns the first mismatch found, `Nonexistent` when no
    /// case-variant of a segment exists, and `Confirmed` otherwise. The
    /// walk only reads cache entries; population happens inside
    /// [`DirListingCache::list`].
    pub async fn verify(&self, filepath: &Path) -> VerificationResult {
        let mut current = filepath.to_path_buf();

        loop {
            let Some((dir, name)) = path::split(&current) else {
                // Nothing left to check below the root.
                return VerificationResult::Confirmed;
            };

            if path::at_root(&dir) {
                return VerificationResult::Confirmed;
            }

            let listing = self.cache.list(&dir).await;
            let wanted = path::nfc(&name);

            if listing.iter().any(|entry| *entry == wanted) {
                trace!(path = %current.display(), "segment casing confirmed");
                current = dir;
                continue;
            }

            // First case-insensitive match in listing order wins.
            return match listing.iter().find(|entry| path::eq_ignore_case(entry, &wanted)) {
                Some(real) => VerificationResult::Mismatch {
                    path: current,
                    corrected: real.clone(),
                },
                None => VerificationResult::Nonexistent,
            };
        }
    }
}
