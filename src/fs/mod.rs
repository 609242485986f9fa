//! Filesystem collaborator
//!
//! The cache needs exactly one primitive from the environment: list the
//! entries of a directory. The trait keeps tests hermetic and lets hosts
//! route listings through a virtual filesystem of their own.

use async_trait::async_trait;
use std::io;
use std::path::Path;

/// Abstract directory listing source
#[async_trait]
pub trait DirectoryLister: Send + Sync {
    /// List the entry names of `dir`, in the order the filesystem reports them
    async fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>>;
}

/// Production lister backed by `tokio::fs::read_dir`
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioDirectoryLister;

#[async_trait]
impl DirectoryLister for TokioDirectoryLister {
    async fn list_dir(&self, dir: &Path) -> io::Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }
}
