//! Runtime configuration for the `numcheck` binary.
//!
//! Only the composition root reads this. The validation rule itself has no
//! knobs.

use crate::core::db::DEFAULT_ACTOR;
use crate::core::error::NumcheckError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "numcheck.toml";
pub const ROOT_ENV_VAR: &str = "NUMCHECK_ROOT";
pub const DEFAULT_ROOT_DIR: &str = ".numcheck";

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub root: Option<PathBuf>,
    pub actor: Option<String>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub root: PathBuf,
    pub actor: String,
}

/// Load `numcheck.toml` from `dir`. No file means defaults.
pub fn load_file_config(dir: &Path) -> Result<FileConfig, NumcheckError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(FileConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    toml::from_str(&content)
        .map_err(|e| NumcheckError::Config(format!("{}: {}", config_path.display(), e)))
}

/// Resolve settings with precedence: flag, env var, config file, default.
///
/// A relative `root` in the config file is taken relative to `dir`.
pub fn resolve(
    dir: &Path,
    root_flag: Option<PathBuf>,
    root_env: Option<PathBuf>,
) -> Result<Settings, NumcheckError> {
    let file = load_file_config(dir)?;
    let root = root_flag
        .or(root_env)
        .or_else(|| file.root.map(|r| if r.is_relative() { dir.join(r) } else { r }))
        .unwrap_or_else(|| dir.join(DEFAULT_ROOT_DIR));
    let actor = file.actor.unwrap_or_else(|| DEFAULT_ACTOR.to_string());
    if actor.trim().is_empty() {
        return Err(NumcheckError::Config("actor must not be empty".to_string()));
    }
    Ok(Settings { root, actor })
}

pub fn root_from_env() -> Option<PathBuf> {
    std::env::var_os(ROOT_ENV_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
