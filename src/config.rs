//! Configuration for store locations and sort defaults.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (LESSONS_HOME, LESSONS_CATALOG, LESSONS_PLAYLISTS)
//! 2. Config file (.lessons/config.yaml)
//! 3. Defaults (~/.lessons)
//!
//! Config file discovery:
//! - Searches current directory and parents for .lessons/config.yaml
//! - Paths in config file are relative to the .lessons/ directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::sort::SortEngine;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

pub const ENV_HOME: &str = "LESSONS_HOME";
pub const ENV_CATALOG: &str = "LESSONS_CATALOG";
pub const ENV_PLAYLISTS: &str = "LESSONS_PLAYLISTS";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub sort: Option<SortEngine>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to .lessons/)
    pub home: Option<String>,
    /// Catalog file (relative to .lessons/)
    pub catalog: Option<String>,
    /// Playlists file (relative to .lessons/)
    pub playlists: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub home: PathBuf,
    pub catalog: PathBuf,
    pub playlists: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Sort used when a command does not pick one
    pub sort: SortEngine,
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".lessons").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to `base`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Merge the config file, environment and defaults
///
/// `env` is injected so resolution can be tested without touching the
/// process environment.
fn resolve(
    default_home: PathBuf,
    config: Option<(PathBuf, ConfigFile)>,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    let (config_file, file) = match config {
        Some((path, file)) => (Some(path), Some(file)),
        None => (None, None),
    };

    // Relative paths in the file are anchored at .lessons/
    let base_dir = config_file
        .as_deref()
        .and_then(Path::parent)
        .unwrap_or(Path::new("."))
        .to_path_buf();
    let paths = file.as_ref().map(|f| f.paths.clone()).unwrap_or_default();

    let home = if let Some(env_home) = env(ENV_HOME) {
        PathBuf::from(env_home)
    } else if let Some(ref home_path) = paths.home {
        resolve_path(&base_dir, home_path)
    } else {
        default_home
    };

    let catalog = if let Some(env_catalog) = env(ENV_CATALOG) {
        PathBuf::from(env_catalog)
    } else if let Some(ref catalog_path) = paths.catalog {
        resolve_path(&base_dir, catalog_path)
    } else {
        home.join("catalog.json")
    };

    let playlists = if let Some(env_playlists) = env(ENV_PLAYLISTS) {
        PathBuf::from(env_playlists)
    } else if let Some(ref playlists_path) = paths.playlists {
        resolve_path(&base_dir, playlists_path)
    } else {
        home.join("playlists.json")
    };

    let sort = file.and_then(|f| f.sort).unwrap_or_default();

    ResolvedConfig {
        home,
        catalog,
        playlists,
        config_file,
        sort,
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".lessons");

    let config = match find_config_file() {
        Some(path) => {
            let file = load_config_file(&path)?;
            Some((path, file))
        }
        None => None,
    };

    Ok(resolve(default_home, config, |key| std::env::var(key).ok()))
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Get the catalog store path
pub fn catalog_path() -> Result<PathBuf> {
    Ok(config()?.catalog.clone())
}

/// Get the playlists store path
pub fn playlists_path() -> Result<PathBuf> {
    Ok(config()?.playlists.clone())
}
