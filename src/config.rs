//! Plugin options and the diagnostic output sink
//!
//! Options use the host-facing camelCase names so build tools can embed
//! them verbatim in their own configuration files.

use serde::{Deserialize, Serialize};

/// Recognized plugin options
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Emit diagnostic lines for checks performed and per-pass read counts
    pub debug: bool,

    /// Batch-verify all known file dependencies at emit time instead of
    /// verifying each resolution as it happens
    pub use_before_emit_hook: bool,
}

/// Sink for user-facing diagnostic lines
///
/// Hosts can route plugin output into their own reporter; the default
/// writes to standard output.
pub trait Logger: Send + Sync {
    /// Emit one diagnostic line
    fn log(&self, message: &str);
}

/// Default logger that prints to standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutLogger;

impl Logger for StdoutLogger {
    fn log(&self, message: &str) {
        println!("{message}");
    }
}
