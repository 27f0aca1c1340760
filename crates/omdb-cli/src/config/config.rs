//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use url::Url;

/// Environment variable that overrides `api.key`.
pub const API_KEY_ENV: &str = "OMDB_API_KEY";

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// OMDb API settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// OMDb API settings.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// API key (<http://www.omdbapi.com/apikey.aspx>).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Base URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Picks the API key: `env_key` when non-empty, else `api.key`.
    ///
    /// # Errors
    ///
    /// Returns an error if neither source provides a key.
    pub fn api_key(&self, env_key: Option<String>) -> Result<String> {
        if let Some(key) = env_key.filter(|k| !k.is_empty()) {
            return Ok(key);
        }
        match &self.api.key {
            Some(key) => Ok(key.clone()),
            None => bail!(
                "OMDb API key is not configured: set {API_KEY_ENV} or run `omdb config set-key`"
            ),
        }
    }

    /// Parses `api.base_url`, if set.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured value is not a valid URL.
    pub fn base_url(&self) -> Result<Option<Url>> {
        self.api
            .base_url
            .as_deref()
            .map(|raw| Url::parse(raw).with_context(|| format!("invalid api.base_url: {raw}")))
            .transpose()
    }
}

/// Masks all but the last 2 characters of a key for display.
#[must_use]
pub fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    let keep = count.saturating_sub(2);
    key.chars()
        .enumerate()
        .map(|(i, c)| if i < keep { '*' } else { c })
        .collect()
}
