//! Directory-listing cache with per-directory mutual exclusion
//!
//! Memoizes the on-disk entry names for every directory touched during a
//! build pass. Concurrent callers asking for the same uncached directory
//! collapse into a single filesystem read; read failures are cached as an
//! empty listing and never retried within the pass. All state lives for
//! one pass and is dropped on [`DirListingCache::reset`].

use crate::fs::DirectoryLister;
use crate::path;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, trace};

/// A cached directory listing, shared between all callers
pub type Listing = Arc<Vec<String>>;

#[derive(Default)]
struct PassState {
    /// Directory key -> names the filesystem reported, NFC-normalized
    entries: HashMap<String, Listing>,
    /// One guard per directory, created on first demand, cleared on reset
    guards: HashMap<String, Arc<Mutex<()>>>,
}

/// Build-pass-scoped cache over a [`DirectoryLister`]
pub struct DirListingCache {
    lister: Arc<dyn DirectoryLister>,
    state: Mutex<PassState>,
    reads: AtomicU64,
}

impl DirListingCache {
    /// Create an empty cache over the given listing source
    pub fn new(lister: Arc<dyn DirectoryLister>) -> Self {
        Self {
            lister,
            state: Mutex::new(PassState::default()),
            reads: AtomicU64::new(0),
        }
    }

    /// Entry names of `dir`, served from cache after the first read
    ///
    /// Infallible at this boundary: an unreadable or vanished directory
    /// is cached as an empty listing, indistinguishable from a directory
    /// with no entries.
    pub async fn list(&self, dir: &Path) -> Listing {
        let key = path::dir_key(dir);

        if let Some(listing) = self.state.lock().await.entries.get(&key) {
            trace!(dir = %key, "listing cache hit");
            return Arc::clone(listing);
        }

        let guard = {
            let mut state = self.state.lock().await;
            Arc::clone(
                state
                    .guards
                    .entry(key.clone())
                    .or_insert_with(|| Arc::new(Mutex::new(()))),
            )
        };
        let _populating = guard.lock().await;

        // A caller queued behind the guard finds the winner's entry here.
        if let Some(listing) = self.state.lock().await.entries.get(&key) {
            return Arc::clone(listing);
        }

        self.reads.fetch_add(1, Ordering::Relaxed);
        debug!(dir = %key, "listing cache miss, reading directory");
        let names = match self.lister.list_dir(dir).await {
            Ok(names) => names.iter().map(|name| path::nfc(name)).collect(),
            Err(e) => {
                debug!(dir = %key, error = %e, "directory unreadable, caching empty listing");
                Vec::new()
            }
        };

        let listing: Listing = Arc::new(names);
        self.state
            .lock()
            .await
            .entries
            .insert(key, Arc::clone(&listing));
        listing
    }

    /// Real filesystem reads issued since the last reset
    pub fn fs_reads(&self) -> u64 {
        self.reads.load(Ordering::Relaxed)
    }

    /// Drop all entries, guards, and the read counter
    ///
    /// Must not run concurrently with in-flight `list` calls; the host
    /// serializes it after the pass's checks have settled.
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.entries.clear();
        state.guards.clear();
        self.reads.store(0, Ordering::Relaxed);
        debug!("listing cache cleared");
    }
}
