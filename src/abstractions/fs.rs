//! File access abstraction layer
//!
//! Provides a trait-based abstraction over existence checks, reads and
//! writes so the batch processor can be tested without touching the disk.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Trait for file operations
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Check whether a file exists
    async fn exists(&self, path: &Path) -> bool;

    /// Read a file's full content as UTF-8 text
    async fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write text to a file, replacing its content
    async fn write(&self, path: &Path, contents: &str) -> Result<()>;
}

/// Real implementation of FileStore backed by `tokio::fs`
#[derive(Default)]
pub struct RealFileStore;

impl RealFileStore {
    /// Create a new RealFileStore instance
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileStore for RealFileStore {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn read_to_string(&self, path: &Path) -> Result<String> {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<()> {
        tokio::fs::write(path, contents)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

/// In-memory FileStore for tests, with injectable read/write failures
#[derive(Default)]
pub struct MockFileStore {
    files: Arc<Mutex<HashMap<PathBuf, String>>>,
    fail_reads: Arc<Mutex<HashSet<PathBuf>>>,
    fail_writes: Arc<Mutex<HashSet<PathBuf>>>,
}

impl MockFileStore {
    /// Create an empty mock store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a file
    pub async fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.lock().await.insert(path.into(), contents.into());
    }

    /// Current content of a file, if present
    pub async fn contents(&self, path: &Path) -> Option<String> {
        self.files.lock().await.get(path).cloned()
    }

    /// Make reads of `path` fail
    pub async fn fail_read(&self, path: impl Into<PathBuf>) {
        self.fail_reads.lock().await.insert(path.into());
    }

    /// Make writes to `path` fail
    pub async fn fail_write(&self, path: impl Into<PathBuf>) {
        self.fail_writes.lock().await.insert(path.into());
    }
}

#[async_trait]
impl FileStore for MockFileStore {
    async fn exists(&self, path: &Path) -> bool {
        self.files.lock().await.contains_key(path) || self.fail_reads.lock().await.contains(path)
    }

    async fn read_to_string(&self, path: &Path) -> Result<String> {
        if self.fail_reads.lock().await.contains(path) {
            return Err(anyhow!("injected read failure: {}", path.display()));
        }
        self.files
            .lock()
            .await
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow!("no such file: {}", path.display()))
    }

    async fn write(&self, path: &Path, contents: &str) -> Result<()> {
        if self.fail_writes.lock().await.contains(path) {
            return Err(anyhow!("injected write failure: {}", path.display()));
        }
        self.files
            .lock()
            .await
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_round_trip() {
        let store = MockFileStore::new();
        store.insert("/a.txt", "hello").await;
        assert!(store.exists(Path::new("/a.txt")).await);
        assert_eq!(
            store.read_to_string(Path::new("/a.txt")).await.unwrap(),
            "hello"
        );
        store.write(Path::new("/a.txt"), "bye").await.unwrap();
        assert_eq!(store.contents(Path::new("/a.txt")).await.unwrap(), "bye");
    }

    #[tokio::test]
    async fn test_mock_injected_read_failure() {
        let store = MockFileStore::new();
        store.fail_read("/broken.txt").await;
        assert!(store.exists(Path::new("/broken.txt")).await);
        assert!(store.read_to_string(Path::new("/broken.txt")).await.is_err());
    }

    #[tokio::test]
    async fn test_real_store_missing_file() {
        let store = RealFileStore::new();
        let path = Path::new("/definitely/not/a/real/path.txt");
        assert!(!store.exists(path).await);
        assert!(store.read_to_string(path).await.is_err());
    }
}
