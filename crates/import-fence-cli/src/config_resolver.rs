//! Configuration discovery and loading.
//!
//! The configuration file is picked in this order:
//!
//! 1. `--config` flag
//! 2. `{project}/import-fence.toml`, then `{project}/.import-fence.toml`
//! 3. `$IMPORT_FENCE_CONFIG_DIR/config.toml`, else `~/.import-fence/config.toml`
//! 4. built-in defaults (no restrictions)

use anyhow::{Context, Result};
use import_fence_core::Config;
use std::path::{Path, PathBuf};

/// Where the configuration was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found in the project directory.
    Project(PathBuf),
    /// Found in the global config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Returns the resolved path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(p) | Self::Project(p) | Self::Global(p) => Some(p),
            Self::Default => None,
        }
    }
}

/// Project-level config file names, checked in order.
pub const PROJECT_CONFIG_NAMES: &[&str] = &["import-fence.toml", ".import-fence.toml"];

const GLOBAL_CONFIG_NAME: &str = "config.toml";

/// Finds the configuration file for `project_dir`.
#[must_use]
pub fn resolve(project_dir: &Path, explicit: Option<&Path>) -> ConfigSource {
    resolve_inner(project_dir, explicit, global_config_dir())
}

/// Finds and parses the configuration for `project_dir`.
///
/// # Errors
///
/// Returns an error if a config file was found but cannot be loaded.
pub fn load(project_dir: &Path, explicit: Option<&Path>) -> Result<(Config, ConfigSource)> {
    let source = resolve(project_dir, explicit);
    let config = match source.path() {
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
        Some(p) => {
            tracing::info!("Using config: {}", p.display());
            Config::from_file(p).with_context(|| format!("Failed to load {}", p.display()))?
        }
    };
    Ok((config, source))
}

/// Accepts `global_dir` as a parameter so tests need not touch env vars.
fn resolve_inner(
    project_dir: &Path,
    explicit: Option<&Path>,
    global_dir: Option<PathBuf>,
) -> ConfigSource {
    if let Some(p) = explicit {
        return ConfigSource::Explicit(p.to_path_buf());
    }

    if let Some(candidate) = PROJECT_CONFIG_NAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|candidate| candidate.exists())
    {
        tracing::debug!("Found project config: {}", candidate.display());
        return ConfigSource::Project(candidate);
    }

    if let Some(candidate) = global_dir
        .map(|dir| dir.join(GLOBAL_CONFIG_NAME))
        .filter(|candidate| candidate.exists())
    {
        tracing::debug!("Found global config: {}", candidate.display());
        return ConfigSource::Global(candidate);
    }

    ConfigSource::Default
}

/// Returns the global config directory: `$IMPORT_FENCE_CONFIG_DIR` or `~/.import-fence/`.
#[must_use]
pub fn global_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var("IMPORT_FENCE_CONFIG_DIR") {
        return Some(PathBuf::from(dir));
    }
    home::home_dir().map(|h| h.join(".import-fence"))
}
