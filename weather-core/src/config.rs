use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    model::{Coordinates, UnitSystem},
    provider::openweather::DEFAULT_BASE_URL,
};

pub const DEFAULT_PROXY_BIND: &str = "127.0.0.1:5001";
pub const DEFAULT_PROXY_URL: &str = "http://localhost:5001";

/// Upstream provider settings. Only the proxy reads these.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Socket address the proxy listens on, e.g. "127.0.0.1:5001".
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    pub proxy_url: Option<String>,
    pub units: UnitSystem,
    /// Used as "my location" by the client.
    pub home: Option<Coordinates>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// [provider]
/// api_key = "..."
///
/// [client]
/// proxy_url = "http://localhost:5001"
/// units = "imperial"
/// home = { lat = 40.71, lon = -74.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub proxy: ProxyConfig,
    pub client: ClientConfig,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
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
        let dirs = ProjectDirs::from("dev", "weather-task", "weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the upstream API key, if one is set and not blank.
    pub fn provider_api_key(&self) -> Option<&str> {
        self.provider
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub fn set_provider_api_key(&mut self, api_key: String) {
        self.provider.api_key = Some(api_key);
    }

    pub fn upstream_base_url(&self) -> &str {
        self.provider.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn proxy_bind(&self) -> &str {
        self.proxy.bind.as_deref().unwrap_or(DEFAULT_PROXY_BIND)
    }

    pub fn proxy_url(&self) -> &str {
        self.client.proxy_url.as_deref().unwrap_or(DEFAULT_PROXY_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = Config::default();

        assert_eq!(cfg.provider_api_key(), None);
        assert_eq!(cfg.upstream_base_url(), DEFAULT_BASE_URL);
        assert_eq!(cfg.proxy_bind(), DEFAULT_PROXY_BIND);
        assert_eq!(cfg.proxy_url(), DEFAULT_PROXY_URL);
        assert_eq!(cfg.client.units, UnitSystem::Metric);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_provider_api_key("   ".into());
        assert_eq!(cfg.provider_api_key(), None);

        cfg.set_provider_api_key("OPEN_KEY".into());
        assert_eq!(cfg.provider_api_key(), Some("OPEN_KEY"));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(cfg.provider.api_key.is_none());
    }

    #[test]
    fn save_then_load_keeps_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_provider_api_key("OPEN_KEY".into());
        cfg.client.units = UnitSystem::Imperial;
        cfg.client.home = Some(Coordinates::new(40.71, -74.0).unwrap());
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.provider_api_key(), Some("OPEN_KEY"));
        assert_eq!(loaded.client.units, UnitSystem::Imperial);
        assert_eq!(loaded.client.home, cfg.client.home);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[client]\nunits = \"imperial\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.client.units, UnitSystem::Imperial);
        assert_eq!(cfg.proxy_url(), DEFAULT_PROXY_URL);
    }

    #[test]
    fn units_in_file_accept_any_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[client]\nunits = \"Imperial\"\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.client.units, UnitSystem::Imperial);
    }

    #[test]
    fn out_of_range_home_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[client]\nhome = { lat = 95.0, lon = 0.0 }\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
