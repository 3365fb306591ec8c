//! `shadeprep` command-line tool.

mod args;
mod config;

use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use clap::Parser;
use shadeprep::{FailedIncludePolicy, ParsedShader, ShaderParser};

use args::CliArgs;

/// Outcome of one preprocessing run.
struct Report {
    parsed: ParsedShader,
    failed_includes: usize,
}

impl Report {
    /// Whether the run should exit with an error.
    fn fails(&self, strict: bool) -> bool {
        strict && self.failed_includes > 0
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match run(&args) {
        Ok(report) => finish(&args, &report),
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Parse the input and write the preprocessed source.
fn run(args: &CliArgs) -> Result<Report, String> {
    let config = config::load_or_default(args.config.as_deref())?;
    let vfs = config::build_vfs(&config, &args.include_dirs);

    let mut options = config.parser;
    if args.preserve_failed_includes {
        options.failed_include = FailedIncludePolicy::PreserveVerbatim;
    }

    let parser = ShaderParser::new().with_reader(vfs).with_options(options);
    let failures = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&failures);
    parser.on_parse_error().subscribe(move |_| {
        counter.fetch_add(1, Ordering::Relaxed);
    });

    let source = std::fs::read_to_string(&args.input)
        .map_err(|e| format!("failed to read {}: {e}", args.input.display()))?;

    let stage = args.stage();
    log::debug!("Parsing {} as {stage:?} shader", args.input.display());
    let parsed = parser.parse(stage, &source);

    write_output(args.output.as_deref(), &parsed.code)?;

    Ok(Report {
        parsed,
        failed_includes: failures.load(Ordering::Relaxed),
    })
}

fn write_output(path: Option<&Path>, code: &str) -> Result<(), String> {
    match path {
        Some(path) => {
            std::fs::write(path, code).map_err(|e| format!("failed to write {}: {e}", path.display()))
        }
        None => std::io::stdout()
            .lock()
            .write_all(code.as_bytes())
            .map_err(|e| format!("failed to write output: {e}")),
    }
}

/// One `name<TAB>semantic` line per attribute.
fn write_attributes(parsed: &ParsedShader, out: &mut impl Write) -> std::io::Result<()> {
    for (name, semantic) in parsed.attributes() {
        writeln!(out, "{name}\t{semantic}")?;
    }
    Ok(())
}

fn finish(args: &CliArgs, report: &Report) -> ExitCode {
    if args.attributes
        && let Err(e) = write_attributes(&report.parsed, &mut std::io::stderr().lock())
    {
        log::error!("failed to print attributes: {e}");
    }

    if report.failed_includes > 0 {
        log::warn!("{} include(s) could not be read", report.failed_includes);
    }

    if report.fails(args.strict) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VERTEX_SOURCE: &str = "#include \"missing.glsl\"\nin vec3 a; // SEM POSITION2\n";

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("shadeprep_cli_run_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn path_arg(path: &Path) -> String {
        path.to_str().unwrap().to_owned()
    }

    fn cli(extra: &[String]) -> CliArgs {
        let argv = std::iter::once("shadeprep".to_owned()).chain(extra.iter().cloned());
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn strict_fails_on_missing_include() {
        let dir = temp_dir("strict");
        let input = dir.join("mesh.vert");
        let output = dir.join("mesh.out.glsl");
        std::fs::write(&input, VERTEX_SOURCE).unwrap();

        let args = cli(&[
            "--strict".into(),
            "-o".into(),
            path_arg(&output),
            path_arg(&input),
        ]);
        let report = run(&args).unwrap();

        assert_eq!(report.failed_includes, 1);
        assert!(report.fails(args.strict));
        assert!(!report.fails(false));
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "#\nin vec3 a; // SEM POSITION2\n"
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn strict_passes_when_includes_resolve() {
        let dir = temp_dir("strict_ok");
        std::fs::create_dir_all(dir.join("glsl")).unwrap();
        std::fs::write(dir.join("glsl/common.glsl"), "uniform mat4 u_mvp;").unwrap();
        let input = dir.join("mesh.frag");
        let output = dir.join("mesh.out.glsl");
        std::fs::write(&input, "#include \"glsl/common.glsl\"\nvoid main() {}\n").unwrap();

        let args = cli(&[
            "--strict".into(),
            "-I".into(),
            path_arg(&dir.join("glsl")),
            "-o".into(),
            path_arg(&output),
            path_arg(&input),
        ]);
        let report = run(&args).unwrap();

        assert_eq!(report.failed_includes, 0);
        assert!(!report.fails(args.strict));
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "uniform mat4 u_mvp;\nvoid main() {}\n"
        );

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn preserve_flag_overrides_config_policy() {
        let dir = temp_dir("preserve");
        let input = dir.join("mesh.vert");
        let output = dir.join("out.glsl");
        let config = dir.join("shadeprep.toml");
        std::fs::write(&input, VERTEX_SOURCE).unwrap();
        std::fs::write(&config, "[parser]\nfailed_include = \"drop-directive\"\n").unwrap();

        let base = [
            "--config".to_owned(),
            path_arg(&config),
            "-o".into(),
            path_arg(&output),
            path_arg(&input),
        ];

        run(&cli(&base)).unwrap();
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "#\nin vec3 a; // SEM POSITION2\n"
        );

        let mut with_flag = vec!["--preserve-failed-includes".to_owned()];
        with_flag.extend(base.iter().cloned());
        let report = run(&cli(&with_flag)).unwrap();
        assert_eq!(report.failed_includes, 1);
        assert_eq!(std::fs::read_to_string(&output).unwrap(), VERTEX_SOURCE);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn attributes_are_tab_separated() {
        let dir = temp_dir("attributes");
        let input = dir.join("mesh.glsl");
        let output = dir.join("out.glsl");
        std::fs::write(&input, "in vec3 a; // SEM POSITION2\nin vec2 b;\n").unwrap();

        let args = cli(&[
            "--stage".into(),
            "vertex".into(),
            "--attributes".into(),
            "-o".into(),
            path_arg(&output),
            path_arg(&input),
        ]);
        let report = run(&args).unwrap();

        let mut lines = Vec::new();
        write_attributes(&report.parsed, &mut lines).unwrap();
        assert_eq!(String::from_utf8(lines).unwrap(), "a\tPOSITION2\nb\t<invalid>\n");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = temp_dir("missing_input");
        let input = dir.join("nope.frag");

        let err = run(&cli(&[path_arg(&input)])).err().unwrap();
        assert!(err.contains("nope.frag"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
