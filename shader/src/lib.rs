//! # shadeprep
//!
//! Single-pass preprocessor for GLSL-style shader source.
//!
//! - `#include "path"` directives are replaced by the contents of the
//!   referenced file, read through an [`IncludeReader`] (by default a
//!   [`Vfs`](shadeprep_vfs::Vfs) rooted at the working directory).
//! - In vertex shaders, input declarations such as
//!   `in vec3 a_pos; // SEM POSITION` are collected along with their
//!   [`SemanticId`].
//!
//! Nothing here aborts a parse: unreadable includes are reported through
//! [`ParseErrorEvent`] and logged, malformed attribute comments are ignored.
//!
//! # Example
//!
//! ```ignore
//! use shadeprep::{ShaderParser, ShaderStage};
//!
//! let parser = ShaderParser::new();
//! parser.on_parse_error().subscribe(|msg| log::error!("{msg}"));
//!
//! let vs = parser.parse_vertex(&std::fs::read_to_string("mesh.vert")?);
//! for (name, semantic) in vs.attributes() {
//!     println!("{name}: {semantic}");
//! }
//! let fs = parser.parse_fragment(&std::fs::read_to_string("mesh.frag")?);
//! ```

pub mod attribute;
pub mod diagnostics;
mod error;
pub mod include;
mod parser;
mod reader;
pub mod scanner;
pub mod semantic;

pub use diagnostics::{ParseErrorCallback, ParseErrorEvent, SubscriptionId};
pub use error::ShaderError;
pub use parser::{
    FailedIncludePolicy, ParsedShader, ParserOptions, ShaderParser, ShaderStage,
    parse_fragment_shader, parse_vertex_shader,
};
pub use reader::IncludeReader;
pub use semantic::{Semantic, SemanticId, SemanticTable};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
