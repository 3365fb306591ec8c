//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use shadeprep::ShaderStage;

/// Shader stage selection for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliStage {
    /// Resolve includes and report vertex attributes.
    Vertex,
    /// Resolve includes only.
    Fragment,
}

impl From<CliStage> for ShaderStage {
    fn from(cli: CliStage) -> Self {
        match cli {
            CliStage::Vertex => ShaderStage::Vertex,
            CliStage::Fragment => ShaderStage::Fragment,
        }
    }
}

/// Preprocess a shader: splice `#include` directives and list vertex
/// attribute semantics.
///
/// # Examples
///
/// ```bash
/// # Mount ./engine/glsl as "glsl", so `#include "glsl/common.glsl"`
/// # reads ./engine/glsl/common.glsl
/// shadeprep -I engine/glsl mesh.frag
///
/// # Force the vertex pass and list attributes
/// shadeprep --stage vertex --attributes -o mesh.out.glsl mesh.glsl
///
/// # Fail the build if an include is missing
/// shadeprep --strict mesh.vert > /dev/null
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "shadeprep", version, about)]
pub struct CliArgs {
    /// Shader source file.
    pub input: PathBuf,

    /// Stage to parse for. Guessed from the extension when omitted
    /// (`.vert`, `.vs`, `.vsh` are vertex shaders).
    #[arg(long, value_enum)]
    pub stage: Option<CliStage>,

    /// Write the preprocessed source here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file. Defaults to `shadeprep.toml` when it exists.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Mount a directory for includes under its last path component:
    /// `-I engine/glsl` serves `#include "glsl/..."`.
    #[arg(short = 'I', long = "include-dir")]
    pub include_dirs: Vec<PathBuf>,

    /// Keep unreadable `#include` directives in the output unchanged.
    #[arg(long)]
    pub preserve_failed_includes: bool,

    /// Print `name<TAB>semantic` for every vertex attribute to stderr.
    #[arg(long)]
    pub attributes: bool,

    /// Exit with an error if any include could not be read.
    #[arg(long)]
    pub strict: bool,

    /// Enable debug logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Stage from `--stage`, or guessed from the input path.
    pub fn stage(&self) -> ShaderStage {
        self.stage
            .map(ShaderStage::from)
            .unwrap_or_else(|| ShaderStage::from_path(&self.input))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = CliArgs::try_parse_from(["shadeprep", "mesh.frag"]).unwrap();
        assert_eq!(args.input, PathBuf::from("mesh.frag"));
        assert_eq!(args.stage(), ShaderStage::Fragment);
        assert!(args.output.is_none());
        assert!(args.include_dirs.is_empty());
        assert!(!args.strict);
    }

    #[test]
    fn stage_guessed_from_extension() {
        let args = CliArgs::try_parse_from(["shadeprep", "mesh.vert"]).unwrap();
        assert_eq!(args.stage(), ShaderStage::Vertex);
    }

    #[test]
    fn explicit_stage_wins() {
        let args =
            CliArgs::try_parse_from(["shadeprep", "--stage", "fragment", "mesh.vert"]).unwrap();
        assert_eq!(args.stage(), ShaderStage::Fragment);
    }

    #[test]
    fn repeated_include_dirs() {
        let args = CliArgs::try_parse_from([
            "shadeprep",
            "-I",
            "shaders",
            "--include-dir",
            "engine/lib",
            "--attributes",
            "mesh.vs",
        ])
        .unwrap();
        assert_eq!(
            args.include_dirs,
            [PathBuf::from("shaders"), PathBuf::from("engine/lib")]
        );
        assert!(args.attributes);
    }

    #[test]
    fn input_is_required() {
        assert!(CliArgs::try_parse_from(["shadeprep"]).is_err());
    }
}
