use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::VfsError;
use crate::provider::VfsProvider;

/// In-memory VFS provider for tests and embedded shader libraries.
///
/// Thread-safe and mutable even after being mounted in a [`Vfs`](crate::Vfs):
/// clones share the same storage, so a handle kept by the caller can keep
/// registering includes after the router has been built.
///
/// # Example
///
/// ```ignore
/// let mem = MemoryProvider::new();
/// mem.insert_str("lighting/brdf.glsl", BRDF_SOURCE);
///
/// let mut vfs = Vfs::new();
/// vfs.mount("builtin", mem.clone());
/// ```
#[derive(Clone, Default)]
pub struct MemoryProvider {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryProvider {
    /// Create an empty in-memory provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a file at the given path.
    ///
    /// The path should use forward slashes and have no leading slash.
    /// Overwrites any existing file at the same path.
    pub fn insert(&self, path: impl Into<String>, data: Vec<u8>) {
        self.files.write().insert(path.into(), data);
    }

    /// Insert a text file at the given path.
    pub fn insert_str(&self, path: impl Into<String>, text: &str) {
        self.insert(path, text.as_bytes().to_vec());
    }

    /// Remove a file at the given path, returning its data if it existed.
    pub fn remove(&self, path: &str) -> Option<Vec<u8>> {
        self.files.write().remove(path)
    }

    /// Number of stored files.
    pub fn len(&self) -> usize {
        self.files.read().len()
    }

    /// Whether the provider holds no files.
    pub fn is_empty(&self) -> bool {
        self.files.read().is_empty()
    }
}

impl VfsProvider for MemoryProvider {
    fn read(&self, path: &str) -> Result<Vec<u8>, VfsError> {
        self.files
            .read()
            .get(path)
            .cloned()
            .ok_or_else(|| VfsError::NotFound(path.to_owned()))
    }

    fn exists(&self, path: &str) -> bool {
        self.files.read().contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_existing_file() {
        let mem = MemoryProvider::new();
        mem.insert_str("common.glsl", "float pi() { return 3.14; }");
        let data = mem.read("common.glsl").unwrap();
        assert_eq!(data, b"float pi() { return 3.14; }");
    }

    #[test]
    fn read_missing_file() {
        let mem = MemoryProvider::new();
        assert!(matches!(mem.read("nope.glsl"), Err(VfsError::NotFound(p)) if p == "nope.glsl"));
    }

    #[test]
    fn exists_reflects_inserts_and_removals() {
        let mem = MemoryProvider::new();
        assert!(!mem.exists("a.glsl"));
        mem.insert("a.glsl", vec![]);
        assert!(mem.exists("a.glsl"));
        assert_eq!(mem.remove("a.glsl"), Some(vec![]));
        assert!(!mem.exists("a.glsl"));
        assert!(mem.remove("a.glsl").is_none());
    }

    #[test]
    fn clones_share_storage() {
        let mem = MemoryProvider::new();
        let handle = mem.clone();
        handle.insert_str("late.glsl", "// registered after mount");
        assert!(mem.exists("late.glsl"));
        assert_eq!(mem.len(), 1);
    }
}
