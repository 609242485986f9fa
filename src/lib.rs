//! casecheck - Case-sensitive path verification for build pipelines
//!
//! Catches references to files whose casing differs from the casing on
//! disk: a class of bug that is invisible on case-insensitive
//! filesystems and fatal on case-sensitive ones. Hosts call
//! [`CaseSensitivePaths::after_resolve`] for each resolved path (or
//! batch-check dependencies via [`CaseSensitivePaths::before_emit`]) and
//! [`CaseSensitivePaths::build_complete`] when a pass ends.

pub mod cache;
pub mod config;
pub mod error;
pub mod fs;
pub mod path;
pub mod plugin;
pub mod verify;

pub use config::{Logger, Options, StdoutLogger};
pub use error::{CaseCheckError, CaseCheckResult};
pub use plugin::{CaseSensitivePaths, ResolutionKind, ResolvedModule};
pub use verify::{CaseVerifier, VerificationResult};
