use std::path::{Path, PathBuf};

use serde::Deserialize;
use shadeprep::ParserOptions;
use shadeprep_vfs::{FileSystemProvider, Vfs};

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "shadeprep.toml";

/// Top-level configuration loaded from `shadeprep.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserOptions,
    #[serde(default)]
    pub mount: Vec<MountConfig>,
}

/// A directory mounted for include resolution.
///
/// `#include "name/rest"` reads `path/rest`. The mount marked `default`
/// also receives include paths whose first segment names no mount.
#[derive(Debug, Clone, Deserialize)]
pub struct MountConfig {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub default: bool,
}

/// Load a config from a TOML file.
///
/// Returns `Err` with a human-readable message if the file cannot be read
/// or parsed.
pub fn load_config(path: &Path) -> Result<Config, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    toml::from_str(&content).map_err(|e| format!("failed to parse {}: {e}", path.display()))
}

/// Load the config named on the command line, or `shadeprep.toml` if it
/// exists, or fall back to defaults.
///
/// An explicitly requested file must load; the implicit one is optional.
pub fn load_or_default(explicit: Option<&Path>) -> Result<Config, String> {
    if let Some(path) = explicit {
        return load_config(path);
    }

    let implicit = Path::new(DEFAULT_CONFIG_FILE);
    if !implicit.exists() {
        log::warn!("No {DEFAULT_CONFIG_FILE}, using defaults");
        return Ok(Config::default());
    }

    let config = load_config(implicit)?;
    log::info!(
        "Loaded {DEFAULT_CONFIG_FILE} ({} mounts)",
        config.mount.len()
    );
    Ok(config)
}

/// Build the include [`Vfs`] from the config and `-I` directories.
///
/// Each `-I` directory is mounted under its final path component. When no
/// mount is marked as default, the working directory becomes the default
/// source so plain relative includes keep working.
pub fn build_vfs(config: &Config, include_dirs: &[PathBuf]) -> Vfs {
    let mut vfs = Vfs::new();

    for mount in &config.mount {
        log::info!("Include mount: \"{}\" -> {:?}", mount.name, mount.path);
        vfs.mount(&mount.name, FileSystemProvider::new(&mount.path));
    }

    for dir in include_dirs {
        let Some(name) = dir.file_name().and_then(|name| name.to_str()) else {
            log::warn!("Ignoring include directory {} without a name", dir.display());
            continue;
        };
        log::info!("Include mount: \"{name}\" -> {}", dir.display());
        vfs.mount(name, FileSystemProvider::new(dir));
    }

    match config.mount.iter().find(|m| m.default) {
        Some(default_mount) => vfs.set_default(&default_mount.name),
        None => {
            vfs.mount(
                shadeprep_vfs::WORKING_DIR_SOURCE,
                FileSystemProvider::new("."),
            );
            vfs.set_default(shadeprep_vfs::WORKING_DIR_SOURCE);
        }
    }

    vfs
}
