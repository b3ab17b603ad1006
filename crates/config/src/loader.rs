use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{
    error::{Context, Error, Result},
    schema::RoverConfig,
};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["rover.toml", "rover.yaml", "rover.yml", "rover.json"];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> Result<RoverConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_config(&raw, path)
}

/// Discover a config file in standard locations.
///
/// Search order:
/// 1. `./rover.{toml,yaml,yml,json}` (project-local)
/// 2. `~/.config/rover/rover.{toml,yaml,yml,json}` (user-global)
pub fn find_config_file() -> Option<PathBuf> {
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    if let Some(dir) = config_dir() {
        for name in CONFIG_FILENAMES {
            let p = dir.join(name);
            if p.exists() {
                return Some(p);
            }
        }
    }

    None
}

/// Returns the user-global config directory (`~/.config/rover/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "rover").map(|d| d.config_dir().to_path_buf())
}

/// Serialize `config` in the format matching the path's extension and write
/// it out. Creates parent directories if needed.
pub fn save_config(path: &Path, config: &RoverConfig) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let ext = extension(path);
    let rendered = match ext {
        "toml" => toml::to_string_pretty(config)?,
        "yaml" | "yml" => serde_yaml::to_string(config)?,
        "json" => serde_json::to_string_pretty(config)?,
        other => return Err(Error::unsupported_format(other)),
    };
    std::fs::write(path, rendered)?;
    debug!(path = %path.display(), "saved config");
    Ok(())
}

fn parse_config(raw: &str, path: &Path) -> Result<RoverConfig> {
    match extension(path) {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        other => Err(Error::unsupported_format(other)),
    }
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("toml")
}
