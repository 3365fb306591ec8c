//! Include readers: where `#include` targets come from.

use std::collections::HashMap;
use std::sync::Arc;

use shadeprep_vfs::{MemoryProvider, Vfs, VfsError, VfsProvider, path};

use crate::error::ShaderError;

/// Source of include contents.
///
/// The path is passed exactly as written between the quotes; resolving it
/// (relative roots, search paths) is up to the reader.
pub trait IncludeReader: Send + Sync {
    fn read_include(&self, path: &str) -> Result<String, ShaderError>;
}

impl IncludeReader for Vfs {
    fn read_include(&self, path: &str) -> Result<String, ShaderError> {
        self.read_to_string(path)
            .map_err(|source| ShaderError::IncludeRead {
                path: path.to_owned(),
                source,
            })
    }
}

impl IncludeReader for MemoryProvider {
    fn read_include(&self, path: &str) -> Result<String, ShaderError> {
        let read = || -> Result<String, VfsError> {
            let normalized = path::normalize(path)?;
            String::from_utf8(self.read(&normalized)?)
                .map_err(|_| VfsError::InvalidUtf8(normalized))
        };
        read().map_err(|source| ShaderError::IncludeRead {
            path: path.to_owned(),
            source,
        })
    }
}

/// Registered includes keyed by the exact path used in the directive.
impl IncludeReader for HashMap<String, String> {
    fn read_include(&self, path: &str) -> Result<String, ShaderError> {
        self.get(path)
            .cloned()
            .ok_or_else(|| ShaderError::IncludeNotFound(path.to_owned()))
    }
}

impl<T: IncludeReader + ?Sized> IncludeReader for &T {
    fn read_include(&self, path: &str) -> Result<String, ShaderError> {
        (**self).read_include(path)
    }
}

impl<T: IncludeReader + ?Sized> IncludeReader for Arc<T> {
    fn read_include(&self, path: &str) -> Result<String, ShaderError> {
        (**self).read_include(path)
    }
}

impl<T: IncludeReader + ?Sized> IncludeReader for Box<T> {
    fn read_include(&self, path: &str) -> Result<String, ShaderError> {
        (**self).read_include(path)
    }
}
