use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default remote store address when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5092/Api";

/// Configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub log: LogConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// trace|debug|info|warn|error. Absent = build default.
    #[serde(default)]
    pub level: Option<String>,
    /// Absolute log directory. Absent = `<state dir>/textdesk/logs`.
    #[serde(default)]
    pub dir: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    /// Theme color overrides, e.g. `highlight = "#2CB5E0"`
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Per-category chip colors keyed by slug
    #[serde(default)]
    pub category_colors: HashMap<String, String>,
}
