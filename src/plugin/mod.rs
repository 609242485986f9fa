//! Host-facing plugin surface
//!
//! Wires the verifier and listing cache to a build tool's lifecycle: a
//! per-resolution hook, an optional batch check at emit time, and a
//! completion hook that drops all pass state. The host decides how to
//! fail the build; this module only reports mismatches.

use crate::cache::DirListingCache;
use crate::config::{Logger, Options, StdoutLogger};
use crate::error::{CaseCheckError, CaseCheckResult};
use crate::fs::{DirectoryLister, TokioDirectoryLister};
use crate::path;
use crate::verify::{CaseVerifier, VerificationResult};
use futures_util::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Why the host resolved a path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionKind {
    /// The resolution is creating a new module
    NewModule,
    /// The resolution points at an already-known module
    ExistingModule,
}

/// A path the host's resolver produced, with its resolution context
#[derive(Debug, Clone)]
pub struct ResolvedModule {
    /// The resolved request; may still carry a loader query suffix
    pub request: String,
    /// Whether this resolution creates a new module
    pub kind: ResolutionKind,
}

impl ResolvedModule {
    /// Wrap a resolved request string with its context
    pub fn new(request: impl Into<String>, kind: ResolutionKind) -> Self {
        Self {
            request: request.into(),
            kind,
        }
    }
}

/// Case-sensitive path verification for one build pass at a time
///
/// Owns the pass-scoped cache state. Construct once at plugin
/// attachment, call the hooks as the host fires its lifecycle events,
/// and let [`build_complete`](Self::build_complete) clear state between
/// passes.
pub struct CaseSensitivePaths {
    options: Options,
    logger: Arc<dyn Logger>,
    cache: Arc<DirListingCache>,
    verifier: CaseVerifier,
}

impl CaseSensitivePaths {
    /// Plugin over the real filesystem
    pub fn new(options: Options) -> Self {
        Self::with_lister(options, Arc::new(TokioDirectoryLister))
    }

    /// Plugin over a custom listing source (virtual filesystems, tests)
    pub fn with_lister(options: Options, lister: Arc<dyn DirectoryLister>) -> Self {
        let cache = Arc::new(DirListingCache::new(lister));
        let verifier = CaseVerifier::new(Arc::clone(&cache));
        Self {
            options,
            logger: Arc::new(StdoutLogger),
            cache,
            verifier,
        }
    }

    /// Route diagnostics into a host-provided sink instead of stdout
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    /// Whether the host should defer checking to [`before_emit`](Self::before_emit)
    pub fn use_before_emit_hook(&self) -> bool {
        self.options.use_before_emit_hook
    }

    /// Hook: a path has been resolved
    ///
    /// Rejects the resolution when a segment's casing differs from what
    /// the filesystem reports. A path that does not exist at all is not
    /// this plugin's error and passes through untouched.
    pub async fn after_resolve(&self, resolution: &ResolvedModule) -> CaseCheckResult<()> {
        let candidate = PathBuf::from(path::clean_request(&resolution.request));
        if self.options.debug {
            self.logger.log(&format!(
                "[casecheck] checking `{}` against the file system",
                candidate.display()
            ));
        }

        match self.verifier.verify(&candidate).await {
            VerificationResult::Mismatch { corrected, .. } => {
                Err(CaseCheckError::mismatch(candidate, corrected))
            }
            VerificationResult::Confirmed | VerificationResult::Nonexistent => Ok(()),
        }
    }

    /// Hook: batch-verify the pass's known file dependencies
    ///
    /// The alternate integration point selected by
    /// [`Options::use_before_emit_hook`]: one error per mismatched
    /// dependency, in input order. An empty vec means every dependency
    /// matched its on-disk casing.
    pub async fn before_emit<I>(&self, dependencies: I) -> Vec<CaseCheckError>
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let dependencies: Vec<PathBuf> = dependencies.into_iter().collect();
        let checked = dependencies.len();

        let checks = dependencies.into_iter().map(|dep| async move {
            match self.verifier.verify(&dep).await {
                VerificationResult::Mismatch { corrected, .. } => {
                    Some(CaseCheckError::mismatch(dep, corrected))
                }
                VerificationResult::Confirmed | VerificationResult::Nonexistent => None,
            }
        });
        let errors: Vec<CaseCheckError> = join_all(checks).await.into_iter().flatten().collect();

        if self.options.debug {
            self.logger.log(&format!(
                "[casecheck] checked {checked} file dependencies, {} mismatched",
                errors.len()
            ));
        }
        errors
    }

    /// Hook: the build pass finished
    ///
    /// Drops every cached listing and guard so the next pass starts
    /// cold, reporting the pass's real read count first when debugging.
    pub async fn build_complete(&self) {
        if self.options.debug {
            self.logger.log(&format!(
                "[casecheck] total filesystem reads this pass: {}",
                self.cache.fs_reads()
            ));
        }
        self.cache.reset().await;
        debug!("build pass state cleared");
    }

    /// Real filesystem reads issued so far this pass
    pub fn fs_reads(&self) -> u64 {
        self.cache.fs_reads()
    }

    /// Direct access to the verifier for hosts with custom wiring
    pub fn verifier(&self) -> &CaseVerifier {
        &self.verifier
    }
}

impl Default for CaseSensitivePaths {
    fn default() -> Self {
        Self::new(Options::default())
    }
}
