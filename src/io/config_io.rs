use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "TEXTDESK_API_URL";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Default config file path, respecting XDG_CONFIG_HOME
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"));
    config_dir.join("textdesk").join("config.toml")
}

/// Default log directory, respecting XDG_STATE_HOME
pub fn default_log_dir() -> PathBuf {
    let state_dir = std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".local").join("state"));
    state_dir.join("textdesk").join("logs")
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Read a config file. A missing file yields the defaults.
pub fn read_config_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    parse_config_file(path)
}

fn parse_config_file(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Apply the URL overrides. The flag wins over the environment, which wins
/// over the file. Blank values are ignored.
pub fn apply_overrides(config: &mut Config, env_url: Option<&str>, flag_url: Option<&str>) {
    for url in [env_url, flag_url].into_iter().flatten() {
        let trimmed = url.trim();
        if !trimmed.is_empty() {
            config.api.base_url = trimmed.to_string();
        }
    }
}

/// Load the effective configuration.
///
/// An explicit `--config` path must exist; the default path may be absent.
pub fn load_config(explicit: Option<&Path>, flag_url: Option<&str>) -> Result<Config, ConfigError> {
    let mut config = match explicit {
        Some(path) => parse_config_file(path)?,
        None => read_config_from(&config_path())?,
    };
    let env_url = std::env::var(API_URL_ENV).ok();
    apply_overrides(&mut config, env_url.as_deref(), flag_url);
    Ok(config)
}
