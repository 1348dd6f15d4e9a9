mod defaults;


use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::PharosError;
use defaults::*;

/// Environment variable that supplies the backend token when the file leaves it empty.
pub const TOKEN_ENV: &str = "PHAROS_BACKEND_TOKEN";

/// Top-level Pharos configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

/// Public site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute origin used for canonical and alternate links, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            log_level: default_log_level(),
        }
    }
}

/// Remote content backend (hosted CMS query API).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// When false every resolver call is served from the bundled corpus.
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_dataset")]
    pub dataset: String,
    #[serde(default = "default_api_version")]
    pub api_version: String,
    #[serde(default = "default_true")]
    pub use_cdn: bool,
    /// Read token. Empty = anonymous (public datasets).
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            project_id: String::new(),
            dataset: default_dataset(),
            api_version: default_api_version(),
            use_cdn: true,
            token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl BackendConfig {
    /// A backend without a project id cannot be queried.
    pub fn is_usable(&self) -> bool {
        self.enabled && !self.project_id.trim().is_empty()
    }
}

/// Defaults for content listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
    #[serde(default = "default_latest_limit")]
    pub latest_limit: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            list_limit: default_list_limit(),
            latest_limit: default_latest_limit(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text and apply normalization.
    pub fn from_toml(content: &str) -> Result<Self, PharosError> {
        let mut config: Config = toml::from_str(content)
            .map_err(|e| PharosError::Config(format!("failed to parse config: {e}")))?;
        config.normalize();
        Ok(config)
    }

    fn normalize(&mut self) {
        let trimmed = self.site.base_url.trim().trim_end_matches('/');
        self.site.base_url = trimmed.to_string();
        if self.backend.token.is_empty() {
            if let Ok(token) = std::env::var(TOKEN_ENV) {
                self.backend.token = token;
            }
        }
    }
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, PharosError> {
    let path = Path::new(path);
    if !path.exists() {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        let mut config = Config::default();
        config.normalize();
        return Ok(config);
    }

    let content = std::fs::read_to_string(path)?;

    Config::from_toml(&content)
}
