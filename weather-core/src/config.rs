use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::provider::openweather::DEFAULT_BASE_URL;

/// Environment variable holding the OpenWeather API token.
pub const TOKEN_ENV_VAR: &str = "OPENWEATHER_API_TOKEN";

/// Environment variable overriding the endpoint.
pub const BASE_URL_ENV_VAR: &str = "OPENWEATHER_BASE_URL";

/// Settings stored on disk. Flags and environment variables win over both.
///
/// Example TOML:
/// ```toml
/// api_token = "..."
/// base_url = "https://api.openweathermap.org/data/2.5/weather"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Config {
    /// Load config from the platform config directory, or an empty default if
    /// it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!(path = %path.display(), "loaded config file");
        Ok(cfg)
    }

    /// Save config to the platform config directory, creating parent
    /// directories as needed. Returns the path written.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Token to use: `explicit` (flag or environment) if non-empty, else the
    /// stored one. Empty strings count as absent.
    pub fn resolve_token(&self, explicit: Option<&str>) -> Option<String> {
        non_empty(explicit)
            .or_else(|| non_empty(self.api_token.as_deref()))
            .map(str::to_owned)
    }

    /// Endpoint to use: `explicit`, then the stored one, then the default.
    pub fn resolve_base_url(&self, explicit: Option<&str>) -> String {
        non_empty(explicit)
            .or_else(|| non_empty(self.base_url.as_deref()))
            .unwrap_or(DEFAULT_BASE_URL)
            .to_owned()
    }

    pub fn set_api_token(&mut self, token: String) {
        self.api_token = Some(token);
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_token("OPEN_KEY".into());
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.api_token.as_deref(), Some("OPEN_KEY"));
        assert_eq!(loaded.base_url, None);
    }

    #[test]
    fn invalid_toml_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_token = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn explicit_token_wins_over_stored() {
        let mut cfg = Config::default();
        cfg.set_api_token("STORED".into());

        assert_eq!(cfg.resolve_token(Some("FROM_ENV")).as_deref(), Some("FROM_ENV"));
        assert_eq!(cfg.resolve_token(Some("")).as_deref(), Some("STORED"));
        assert_eq!(cfg.resolve_token(None).as_deref(), Some("STORED"));
    }

    #[test]
    fn no_token_anywhere_resolves_to_none() {
        let cfg = Config {
            api_token: Some(String::new()),
            base_url: None,
        };
        assert_eq!(cfg.resolve_token(None), None);
    }

    #[test]
    fn base_url_falls_back_to_default() {
        let cfg = Config::default();
        assert_eq!(cfg.resolve_base_url(None), DEFAULT_BASE_URL);

        let cfg = Config {
            api_token: None,
            base_url: Some("http://localhost:8080/weather".into()),
        };
        assert_eq!(cfg.resolve_base_url(None), "http://localhost:8080/weather");
        assert_eq!(
            cfg.resolve_base_url(Some("http://other/weather")),
            "http://other/weather"
        );
    }
}
