//! Vertex and fragment pass drivers.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use shadeprep_vfs::Vfs;

use crate::attribute::{AttributeDecl, try_parse_attribute};
use crate::diagnostics::ParseErrorEvent;
use crate::error::ShaderError;
use crate::include::try_parse_include;
use crate::reader::IncludeReader;
use crate::scanner::{Cursor, is_identifier};
use crate::semantic::{SemanticId, SemanticTable};

/// Shader stage a source is parsed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    /// Vertex shader: includes are resolved and attributes harvested.
    Vertex,
    /// Fragment shader: includes are resolved.
    Fragment,
}

impl ShaderStage {
    /// Guess the stage from a file extension (`vert`, `vs`, `vsh` are
    /// vertex shaders). Anything else is treated as a fragment shader.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("vert" | "vs" | "vsh") => Self::Vertex,
            _ => Self::Fragment,
        }
    }
}

/// What to emit when an include cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailedIncludePolicy {
    /// Emit the directive's `#` and drop the rest of it.
    #[default]
    DropDirective,
    /// Leave the whole directive in the output.
    PreserveVerbatim,
}

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    pub failed_include: FailedIncludePolicy,
}

/// Output of a parse pass.
///
/// `attribute_names` and `semantics` are index aligned: entry `i` of
/// `semantics` belongs to entry `i` of `attribute_names`. Attributes without
/// a recognized semantic carry [`SemanticId::INVALID`]. Both lists are empty
/// for fragment shaders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedShader {
    pub stage: ShaderStage,
    pub code: String,
    pub attribute_names: Vec<String>,
    pub semantics: Vec<SemanticId>,
}

impl ParsedShader {
    /// `(name, semantic)` pairs in declaration order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, SemanticId)> {
        self.attribute_names
            .iter()
            .map(String::as_str)
            .zip(self.semantics.iter().copied())
    }

    /// Semantic of the first attribute declared as `name`.
    pub fn semantic_of(&self, name: &str) -> Option<SemanticId> {
        self.attributes()
            .find(|(attribute, _)| *attribute == name)
            .map(|(_, semantic)| semantic)
    }
}

/// Shader source preprocessor.
///
/// A single pass over the source splices `#include "path"` directives with
/// the contents returned by the include reader. For vertex shaders, `in`
/// declarations are also collected together with the semantic given in a
/// trailing `// SEM <NAME><index>` comment.
///
/// Included text is inserted literally; it is not scanned for further
/// includes or attributes.
///
/// # Example
///
/// ```ignore
/// use shadeprep::{ShaderParser, Semantic, SemanticId};
/// use shadeprep_vfs::MemoryProvider;
///
/// let includes = MemoryProvider::new();
/// includes.insert_str("common.glsl", "uniform mat4 u_mvp;\n");
///
/// let parser = ShaderParser::new().with_reader(includes);
/// parser.on_parse_error().subscribe(|msg| eprintln!("{msg}"));
///
/// let vs = parser.parse_vertex(
///     "#include \"common.glsl\"\nin vec3 a_pos; // SEM POSITION\n",
/// );
/// assert_eq!(vs.attribute_names, ["a_pos"]);
/// assert_eq!(vs.semantics, [SemanticId::new(Semantic::Position, 0).unwrap()]);
/// ```
#[derive(Clone)]
pub struct ShaderParser {
    semantics: Arc<SemanticTable>,
    reader: Arc<dyn IncludeReader>,
    diagnostics: Arc<ParseErrorEvent>,
    options: ParserOptions,
}

impl Default for ShaderParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderParser {
    /// Create a parser with the standard semantic table, reading includes
    /// relative to the current working directory.
    pub fn new() -> Self {
        Self {
            semantics: SemanticTable::standard(),
            reader: Arc::new(Vfs::working_dir()),
            diagnostics: Arc::new(ParseErrorEvent::new()),
            options: ParserOptions::default(),
        }
    }

    /// Read includes through `reader`.
    pub fn with_reader(mut self, reader: impl IncludeReader + 'static) -> Self {
        self.reader = Arc::new(reader);
        self
    }

    /// Use a custom semantic table.
    pub fn with_semantics(mut self, semantics: Arc<SemanticTable>) -> Self {
        self.semantics = semantics;
        self
    }

    /// Report parse errors to a shared event.
    pub fn with_diagnostics(mut self, diagnostics: Arc<ParseErrorEvent>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_options(mut self, options: ParserOptions) -> Self {
        self.options = options;
        self
    }

    /// Event fired for every include that cannot be read.
    pub fn on_parse_error(&self) -> &ParseErrorEvent {
        &self.diagnostics
    }

    /// Resolve includes and collect vertex attributes.
    pub fn parse_vertex(&self, source: &str) -> ParsedShader {
        self.parse(ShaderStage::Vertex, source)
    }

    /// Resolve includes, returning the rewritten source.
    pub fn parse_fragment(&self, source: &str) -> String {
        self.parse(ShaderStage::Fragment, source).code
    }

    pub fn parse(&self, stage: ShaderStage, source: &str) -> ParsedShader {
        Pass {
            semantics: &self.semantics,
            reader: self.reader.as_ref(),
            diagnostics: &self.diagnostics,
            options: self.options,
        }
        .run(stage, source)
    }
}

/// Parse a vertex shader with default options.
///
/// Includes are read through `reader`, or relative to the current working
/// directory when `None`. Errors go to [`ParseErrorEvent::global`].
pub fn parse_vertex_shader(source: &str, reader: Option<&dyn IncludeReader>) -> ParsedShader {
    run_with_reader(ShaderStage::Vertex, source, reader)
}

/// Parse a fragment shader with default options, returning the rewritten
/// source. See [`parse_vertex_shader`] for how includes are read.
pub fn parse_fragment_shader(source: &str, reader: Option<&dyn IncludeReader>) -> String {
    run_with_reader(ShaderStage::Fragment, source, reader).code
}

fn run_with_reader(
    stage: ShaderStage,
    source: &str,
    reader: Option<&dyn IncludeReader>,
) -> ParsedShader {
    let working_dir;
    let reader: &dyn IncludeReader = match reader {
        Some(reader) => reader,
        None => {
            working_dir = Vfs::working_dir();
            &working_dir
        }
    };
    let semantics = SemanticTable::standard();
    Pass {
        semantics: &semantics,
        reader,
        diagnostics: ParseErrorEvent::global(),
        options: ParserOptions::default(),
    }
    .run(stage, source)
}

/// Outcome of examining one source position.
enum Step<'a> {
    /// Copy the byte and move on.
    Copy,
    /// Replace `[pos, resume)` with `content`.
    Splice { content: String, resume: usize },
    /// The include ending at `resume` could not be read.
    IncludeFailed {
        path: &'a str,
        error: ShaderError,
        resume: usize,
    },
    /// Copy the byte and record an attribute.
    Attribute(AttributeDecl<'a>),
}

struct Pass<'p> {
    semantics: &'p SemanticTable,
    reader: &'p dyn IncludeReader,
    diagnostics: &'p ParseErrorEvent,
    options: ParserOptions,
}

impl Pass<'_> {
    fn run(&self, stage: ShaderStage, source: &str) -> ParsedShader {
        let mut code = String::with_capacity(source.len());
        let mut attribute_names = Vec::new();
        let mut semantics = Vec::new();

        // Bytes in `copied..pos` are pending verbatim output.
        let mut copied = 0;
        let mut pos = 0;
        while pos < source.len() {
            match self.step(stage, Cursor::new(source, pos)) {
                Step::Copy => pos += 1,
                Step::Attribute(decl) => {
                    log::debug!("Attribute \"{}\" semantic {}", decl.name, decl.semantic);
                    attribute_names.push(decl.name.to_owned());
                    semantics.push(decl.semantic);
                    pos += 1;
                }
                Step::Splice { content, resume } => {
                    code.push_str(&source[copied..pos]);
                    code.push_str(&content);
                    pos = resume;
                    copied = resume;
                }
                Step::IncludeFailed {
                    path,
                    error,
                    resume,
                } => {
                    log::warn!("Failed to open file {path}: {error}");
                    self.diagnostics.notify(&format!("Failed to open file {path}"));
                    match self.options.failed_include {
                        FailedIncludePolicy::DropDirective => {
                            code.push_str(&source[copied..=pos]);
                            copied = resume;
                        }
                        FailedIncludePolicy::PreserveVerbatim => {}
                    }
                    pos = resume;
                }
            }
        }
        code.push_str(&source[copied..]);

        ParsedShader {
            stage,
            code,
            attribute_names,
            semantics,
        }
    }

    fn step<'a>(&self, stage: ShaderStage, cursor: Cursor<'a>) -> Step<'a> {
        match cursor.peek() {
            Some(b'#') => self.include_step(cursor),
            Some(b'i') if stage == ShaderStage::Vertex => {
                // Only at the start of a word
                if cursor.prev().is_some_and(is_identifier) {
                    return Step::Copy;
                }
                match try_parse_attribute(cursor, self.semantics) {
                    Some(decl) => Step::Attribute(decl),
                    None => Step::Copy,
                }
            }
            _ => Step::Copy,
        }
    }

    fn include_step<'a>(&self, cursor: Cursor<'a>) -> Step<'a> {
        let Some(directive) = try_parse_include(cursor) else {
            return Step::Copy;
        };
        match self.reader.read_include(directive.path) {
            Ok(content) => {
                log::debug!(
                    "Included \"{}\" ({} bytes)",
                    directive.path,
                    content.len()
                );
                Step::Splice {
                    content,
                    resume: directive.end,
                }
            }
            Err(error) => Step::IncludeFailed {
                path: directive.path,
                error,
                resume: directive.end,
            },
        }
    }
}
