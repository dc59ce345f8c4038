use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use anyhow::{Context, Result, anyhow};

use crate::sefaria::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

pub const API_URL_ENV: &str = "TORAH_READER_API_URL";

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let config_content = fs::read_to_string(config_path)?;
        let config: Config = serde_json::from_str(&config_content)?;
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let config_content = serde_json::to_string_pretty(self)?;
        fs::write(config_path, config_content)?;
        Ok(())
    }

    /// Base URL of the text service: explicit override, then the environment,
    /// then this config, then the public default.
    pub fn resolve_base_url(&self, cli_override: Option<&str>) -> String {
        self.resolve_base_url_with(cli_override, std::env::var(API_URL_ENV).ok())
    }

    fn resolve_base_url_with(&self, cli_override: Option<&str>, env_value: Option<String>) -> String {
        cli_override
            .map(str::to_string)
            .or_else(|| env_value.filter(|v| !v.trim().is_empty()))
            .or_else(|| self.api_base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
    }

    /// Merge the given settings into the config file. An unreadable file is
    /// an error and is left untouched.
    pub fn update(api_base_url: Option<String>, timeout_secs: Option<u64>) -> Result<Self> {
        Self::update_at(&Self::get_config_path()?, api_base_url, timeout_secs)
    }

    pub fn update_at(
        config_path: &Path,
        api_base_url: Option<String>,
        timeout_secs: Option<u64>,
    ) -> Result<Self> {
        let mut config = Self::load_from(config_path)
            .with_context(|| format!("not overwriting unreadable config {}", config_path.display()))?;

        if api_base_url.is_some() {
            config.api_base_url = api_base_url;
        }
        if timeout_secs.is_some() {
            config.timeout_secs = timeout_secs;
        }

        config.save_to(config_path)?;
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("torah-reader").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::new());
        assert_eq!(config.timeout(), Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            api_base_url: Some("http://localhost:8000".to_string()),
            timeout_secs: Some(3),
        };

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_partial_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"timeout_secs": 30}"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_base_url, None);
        assert_eq!(config.timeout_secs, Some(30));
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_cli_override_wins() {
        let config = Config {
            api_base_url: Some("http://from-config".to_string()),
            timeout_secs: None,
        };
        assert_eq!(config.resolve_base_url(Some("http://from-cli")), "http://from-cli");
        assert_eq!(
            config.resolve_base_url_with(Some("http://from-cli"), Some("http://from-env".to_string())),
            "http://from-cli"
        );
    }

    #[test]
    fn test_env_beats_config() {
        let config = Config {
            api_base_url: Some("http://from-config".to_string()),
            timeout_secs: None,
        };
        assert_eq!(
            config.resolve_base_url_with(None, Some("http://from-env".to_string())),
            "http://from-env"
        );
        // A blank variable counts as unset.
        assert_eq!(
            config.resolve_base_url_with(None, Some("  ".to_string())),
            "http://from-config"
        );
    }

    #[test]
    fn test_config_beats_default() {
        let config = Config {
            api_base_url: Some("http://from-config".to_string()),
            timeout_secs: None,
        };
        assert_eq!(config.resolve_base_url_with(None, None), "http://from-config");
    }

    #[test]
    fn test_default_base_url() {
        assert_eq!(Config::new().resolve_base_url_with(None, None), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_update_merges_into_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"api_base_url": "http://my-mirror:8000", "timeout_secs": 30}"#).unwrap();

        let updated = Config::update_at(&path, None, Some(5)).unwrap();
        assert_eq!(updated.api_base_url.as_deref(), Some("http://my-mirror:8000"));
        assert_eq!(Config::load_from(&path).unwrap(), updated);
    }

    #[test]
    fn test_update_leaves_malformed_file_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let original = r#"{"api_base_url": "http://my-mirror:8000", "timeout_secs": 30,}"#;
        fs::write(&path, original).unwrap();

        assert!(Config::update_at(&path, None, Some(5)).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }
}
