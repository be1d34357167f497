use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

const API_URL_ENV: &str = "CRONPANEL_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CronpanelConfig {
    /// Base URL of the control-plane server, e.g. "http://localhost:8080"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Seconds between full refreshes of every resource kind.
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// `tracing` filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_poll_interval_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CronpanelConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            poll_interval_secs: default_poll_interval_secs(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
        }
    }
}

/// `<config_dir>/cronpanel`, home of the config, session and log files.
pub fn root_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Cannot determine config directory")?
        .join("cronpanel"))
}

impl CronpanelConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(root_dir()?.join("config.toml"))
    }

    /// Load config from disk. Returns default config if file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_url = url.trim().to_string();
            }
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg = CronpanelConfig::parse("api_url = \"https://panel.example\"\n").unwrap();
        assert_eq!(cfg.api_url, "https://panel.example");
        assert_eq!(cfg.poll_interval(), Duration::from_secs(10));
        assert_eq!(cfg.request_timeout_secs, 10);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn zero_poll_interval_is_clamped() {
        let cfg = CronpanelConfig::parse("poll_interval_secs = 0").unwrap();
        assert_eq!(cfg.poll_interval(), Duration::from_secs(1));
    }

    #[test]
    fn default_config_survives_toml_round_trip() {
        let raw = toml::to_string_pretty(&CronpanelConfig::default()).unwrap();
        assert_eq!(CronpanelConfig::parse(&raw).unwrap(), CronpanelConfig::default());
    }
}
