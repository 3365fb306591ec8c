use std::path::PathBuf;

use crate::error::VfsError;
use crate::provider::VfsProvider;

/// File system VFS provider rooted at a directory on disk.
///
/// The root path is joined with the VFS path to form the actual filesystem
/// path. All I/O is blocking (`std::fs`).
///
/// Path traversal is prevented by the VFS path normalization which rejects
/// `..` segments before they reach the provider.
///
/// # Example
///
/// ```ignore
/// let mut vfs = Vfs::new();
/// vfs.mount("shaders", FileSystemProvider::new("./assets/shaders"));
///
/// // Reads ./assets/shaders/lighting/brdf.glsl
/// let brdf = vfs.read_to_string("shaders/lighting/brdf.glsl")?;
/// ```
pub struct FileSystemProvider {
    root: PathBuf,
}

impl FileSystemProvider {
    /// Create a provider rooted at the given directory.
    ///
    /// The directory does not need to exist yet. It is only checked
    /// when a file is read.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

impl VfsProvider for FileSystemProvider {
    fn read(&self, path: &str) -> Result<Vec<u8>, VfsError> {
        let full_path = self.resolve(path);
        log::trace!("VFS read {}", full_path.display());
        Ok(std::fs::read(full_path)?)
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).is_file()
    }
}
