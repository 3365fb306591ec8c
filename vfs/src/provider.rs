use crate::VfsError;

/// Trait for virtual file system backends.
///
/// Providers implement blocking, byte-level reads. Include resolution is a
/// synchronous pass, so there is no future or runtime involved: a provider
/// may block on disk or network I/O and the caller waits.
///
/// # Path Contract
///
/// Paths passed to provider methods are already normalized by the [`Vfs`](crate::Vfs)
/// router: forward slashes, no leading/trailing slashes, no `..` or `.` segments.
/// The path is relative to the provider's root (the source prefix has been stripped).
pub trait VfsProvider: Send + Sync + 'static {
    /// Read the entire contents of a file at the given path.
    fn read(&self, path: &str) -> Result<Vec<u8>, VfsError>;

    /// Check whether a file exists at the given path.
    fn exists(&self, path: &str) -> bool;
}
