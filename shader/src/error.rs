//! Shader preprocessing error types.

use std::fmt;

use shadeprep_vfs::VfsError;

/// Errors raised by include readers.
///
/// Parsing itself never fails; these errors are reported through the
/// parse error event and the log.
#[derive(Debug)]
pub enum ShaderError {
    /// No include is registered under the path.
    IncludeNotFound(String),
    /// The reader could not produce the include's contents.
    IncludeRead { path: String, source: VfsError },
}

impl ShaderError {
    /// Path of the include that failed.
    pub fn path(&self) -> &str {
        match self {
            Self::IncludeNotFound(path) | Self::IncludeRead { path, .. } => path,
        }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IncludeNotFound(path) => write!(f, "include not found: \"{path}\""),
            Self::IncludeRead { path, source } => {
                write!(f, "failed to read include \"{path}\": {source}")
            }
        }
    }
}

impl std::error::Error for ShaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IncludeRead { source, .. } => Some(source),
            Self::IncludeNotFound(_) => None,
        }
    }
}
