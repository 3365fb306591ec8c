//! Virtual file system used to materialize shader `#include` targets.
//!
//! Reads go through the [`Vfs`] router, which selects a [`VfsProvider`] by
//! the first segment of the requested path and falls back to a default
//! source for paths that do not name a mount.
//!
//! # Providers
//!
//! - [`MemoryProvider`] — In-memory storage for tests and embedded shader libraries
//! - [`FileSystemProvider`] — Native filesystem access rooted at a directory
//!
//! Custom providers can implement [`VfsProvider`] for packed archives or
//! other storage backends. All operations are synchronous; a provider may
//! block on I/O.
//!
//! # Example
//!
//! ```ignore
//! let mut vfs = Vfs::new();
//! vfs.mount("shaders", FileSystemProvider::new("./assets/shaders"));
//! vfs.set_default("shaders");
//!
//! let common = vfs.read_to_string("shaders/common.glsl")?;
//! // Same file through the default source:
//! let common = vfs.read_to_string("common.glsl")?;
//! ```

mod error;
#[cfg(all(feature = "filesystem", not(target_arch = "wasm32")))]
mod filesystem;
mod memory;
pub mod path;
mod provider;
mod vfs;

pub use error::VfsError;
#[cfg(all(feature = "filesystem", not(target_arch = "wasm32")))]
pub use filesystem::FileSystemProvider;
pub use memory::MemoryProvider;
pub use provider::VfsProvider;
pub use vfs::{Vfs, WORKING_DIR_SOURCE};
