//! Chapter text storage.
//!
//! The resolver only needs `read(path)`; paths are vault-relative strings such
//! as `esvbible/John/John_03.md`.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::{Error, Result};

/// Trait for chapter text providers.
///
/// Different implementations can serve chapters from a directory on disk, an
/// in-memory map, or a host application's file API.
#[async_trait]
pub trait ChapterStore: Send + Sync {
    /// Read the full text stored at `path`.
    ///
    /// # Returns
    /// The file contents, or [`Error::NotFound`] / [`Error::Io`] when the path
    /// does not exist or cannot be read.
    async fn read(&self, path: &str) -> Result<String>;
}

/// Store backed by a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FsStore {
    base: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `base` (the vault directory).
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Directory paths are resolved against.
    pub fn base(&self) -> &std::path::Path {
        &self.base
    }
}

#[async_trait]
impl ChapterStore for FsStore {
    async fn read(&self, path: &str) -> Result<String> {
        let full = self.base.join(path);
        match tokio::fs::read_to_string(&full).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::not_found(path)),
            Err(e) => Err(Error::io(e, full)),
        }
    }
}

/// Store holding chapters in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: HashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file, returning the store for chaining.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(path, text);
        self
    }

    /// Add or replace a file.
    pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }

    /// Number of stored files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[async_trait]
impl ChapterStore for MemoryStore {
    async fn read(&self, path: &str) -> Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::not_found(path))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[tokio::test]
    async fn test_memory_store_reads() {
        let store = MemoryStore::new().with_file("esvbible/John/John_03.md", "## 16\nFor God");
        assert_eq!(store.len(), 1);
        assert_eq!(store.read("esvbible/John/John_03.md").await.unwrap(), "## 16\nFor God");
        let err = store.read("esvbible/John/John_04.md").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_fs_store_reads_relative_to_base() {
        let dir = tempfile::tempdir().unwrap();
        let book = dir.path().join("esvbible/Jude");
        std::fs::create_dir_all(&book).unwrap();
        std::fs::write(book.join("Jude_01.md"), "## 1\nJude, a servant").unwrap();

        let store = FsStore::new(dir.path());
        assert_eq!(store.base(), dir.path());
        let text = store.read("esvbible/Jude/Jude_01.md").await.unwrap();
        assert_eq!(text, "## 1\nJude, a servant");

        let err = store.read("esvbible/Jude/Jude_02.md").await.unwrap_err();
        assert!(matches!(err, Error::NotFound { ref path } if path == "esvbible/Jude/Jude_02.md"));
    }
}
