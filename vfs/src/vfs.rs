use std::collections::HashMap;
use std::sync::Arc;

use crate::error::VfsError;
use crate::path;
use crate::provider::VfsProvider;

/// Name of the source mounted by [`Vfs::working_dir`].
pub const WORKING_DIR_SOURCE: &str = "cwd";

/// Virtual file system that routes paths to mounted providers.
///
/// Paths are structured as `"source_name/rest/of/path"`. The first path
/// segment selects the provider. If no source name matches, the default
/// source (if set) is tried with the full path.
///
/// `Clone` is cheap (Arc internals). Thread-safe (`Send + Sync`).
///
/// # Example
///
/// ```ignore
/// let mut vfs = Vfs::new();
/// vfs.mount("engine", MemoryProvider::new());
/// vfs.mount("shaders", FileSystemProvider::new("./shaders"));
/// vfs.set_default("shaders");
///
/// // Reads from FileSystemProvider at "./shaders/common.glsl"
/// let common = vfs.read_to_string("shaders/common.glsl")?;
///
/// // With default source, also reads from ./shaders:
/// let common = vfs.read_to_string("common.glsl")?;
/// ```
#[derive(Clone)]
pub struct Vfs {
    inner: Arc<VfsInner>,
}

struct VfsInner {
    sources: HashMap<String, Box<dyn VfsProvider>>,
    default_source: Option<String>,
}

impl Vfs {
    /// Create an empty VFS with no mounted sources.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(VfsInner {
                sources: HashMap::new(),
                default_source: None,
            }),
        }
    }

    /// Create a VFS that resolves every path against the current working
    /// directory.
    ///
    /// This is the reader used when a shader is parsed without an explicit
    /// include reader.
    #[cfg(all(feature = "filesystem", not(target_arch = "wasm32")))]
    pub fn working_dir() -> Self {
        let mut vfs = Self::new();
        vfs.mount(WORKING_DIR_SOURCE, crate::FileSystemProvider::new("."));
        vfs.set_default(WORKING_DIR_SOURCE);
        vfs
    }

    /// Mount a provider under the given source name.
    ///
    /// Replaces any previously mounted provider with the same name.
    ///
    /// # Panics
    ///
    /// Panics if the `Vfs` has already been cloned. All mounting must
    /// happen during the configuration phase before sharing the `Vfs`.
    pub fn mount(&mut self, name: impl Into<String>, provider: impl VfsProvider) {
        let inner = Arc::get_mut(&mut self.inner).expect("cannot mount after Vfs has been cloned");
        let name = name.into();
        log::debug!("VFS mount \"{name}\"");
        inner.sources.insert(name, Box::new(provider));
    }

    /// Set the default source name used when a path does not match any mount.
    ///
    /// # Panics
    ///
    /// Panics if the `Vfs` has already been cloned.
    pub fn set_default(&mut self, name: impl Into<String>) {
        let inner =
            Arc::get_mut(&mut self.inner).expect("cannot set default after Vfs has been cloned");
        inner.default_source = Some(name.into());
    }

    /// Whether a source with the given name is mounted.
    pub fn is_mounted(&self, name: &str) -> bool {
        self.inner.sources.contains_key(name)
    }

    /// Name of the default source, if one is set.
    pub fn default_source(&self) -> Option<&str> {
        self.inner.default_source.as_deref()
    }

    /// Read the entire contents of a file.
    ///
    /// The first path segment selects the source provider. Falls back
    /// to the default source if no mount matches.
    pub fn read(&self, raw_path: &str) -> Result<Vec<u8>, VfsError> {
        let (provider, resolved_path) = self.resolve(raw_path)?;
        provider.read(&resolved_path)
    }

    /// Read a file and decode it as UTF-8 text.
    pub fn read_to_string(&self, raw_path: &str) -> Result<String, VfsError> {
        let bytes = self.read(raw_path)?;
        String::from_utf8(bytes).map_err(|_| VfsError::InvalidUtf8(raw_path.to_owned()))
    }

    /// Check whether a file exists.
    ///
    /// Unresolvable paths (invalid or unmounted) report `false`.
    pub fn exists(&self, raw_path: &str) -> bool {
        match self.resolve(raw_path) {
            Ok((provider, resolved_path)) => provider.exists(&resolved_path),
            Err(_) => false,
        }
    }

    /// Resolve a raw path to a provider reference and the path within that provider.
    fn resolve(&self, raw_path: &str) -> Result<(&dyn VfsProvider, String), VfsError> {
        let normalized = path::normalize(raw_path)?;
        let (source, rest) = path::split_source(&normalized);

        // Try matching the first segment as a source name
        if let Some(provider) = self.inner.sources.get(source) {
            return Ok((provider.as_ref(), rest.to_owned()));
        }

        // Fall back to default source with the full path
        if let Some(default_name) = &self.inner.default_source
            && let Some(provider) = self.inner.sources.get(default_name)
        {
            return Ok((provider.as_ref(), normalized));
        }

        Err(VfsError::NoSuchSource(source.to_owned()))
    }
}

impl Default for Vfs {
    fn default() -> Self {
        Self::new()
    }
}
