use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::location::{PermissionStatus, Position};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// How the device position is obtained.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LocationConfig {
    /// Fixed position; used only when both halves are set.
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// Consent to look the position up from the public IP address.
    /// Absent until the user has been asked.
    pub ip_lookup: Option<bool>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
///
/// [location]
/// ip_lookup = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,

    /// Override for the OpenWeather API root, e.g. a local mock.
    pub base_url: Option<String>,

    #[serde(default)]
    pub location: LocationConfig,
}

/// Everything the weather client needs, handed to it explicitly.
#[derive(Clone, PartialEq)]
pub struct ClientConfig {
    pub api_key: String,
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), base_url: DEFAULT_BASE_URL.to_string() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
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
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
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
        let dirs = ProjectDirs::from("dev", "localweather", "localweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Returns the stored API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().map(str::trim).filter(|key| !key.is_empty())
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Build the weather client settings, preferring `api_key_override`
    /// (flag or environment) over the stored key.
    pub fn client_config(&self, api_key_override: Option<&str>) -> Result<ClientConfig> {
        let api_key = api_key_override
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .or_else(|| self.api_key())
            .ok_or_else(|| {
                anyhow!(
                    "No API key configured.\n\
                     Hint: run `localweather configure` or set OPENWEATHER_API_KEY."
                )
            })?;

        Ok(ClientConfig::new(api_key).with_base_url(self.base_url()))
    }

    pub fn fixed_position(&self) -> Option<Position> {
        match (self.location.latitude, self.location.longitude) {
            (Some(latitude), Some(longitude)) => Some(Position { latitude, longitude }),
            _ => None,
        }
    }

    pub fn set_fixed_position(&mut self, latitude: f64, longitude: f64) {
        self.location.latitude = Some(latitude);
        self.location.longitude = Some(longitude);
    }

    pub fn clear_fixed_position(&mut self) {
        self.location.latitude = None;
        self.location.longitude = None;
    }

    pub fn set_ip_lookup_consent(&mut self, consent: bool) {
        self.location.ip_lookup = Some(consent);
    }

    pub fn ip_lookup_permission(&self) -> PermissionStatus {
        PermissionStatus::from_consent(self.location.ip_lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_config_errors_when_key_missing() {
        let cfg = Config::default();
        let err = cfg.client_config(None).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No API key configured"));
        assert!(msg.contains("Hint: run `localweather configure`"));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ".into());

        assert_eq!(cfg.api_key(), None);
        assert!(cfg.client_config(Some("")).is_err());
    }

    #[test]
    fn override_key_wins_over_stored_key() {
        let mut cfg = Config::default();
        cfg.set_api_key("STORED".into());

        let client = cfg.client_config(Some("FROM_ENV")).unwrap();
        assert_eq!(client.api_key, "FROM_ENV");

        let client = cfg.client_config(None).unwrap();
        assert_eq!(client.api_key, "STORED");
        assert_eq!(client.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn base_url_override_reaches_client_config() {
        let cfg = Config {
            api_key: Some("KEY".into()),
            base_url: Some("http://127.0.0.1:9999".into()),
            ..Config::default()
        };

        assert_eq!(cfg.client_config(None).unwrap().base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let client = ClientConfig::new("SECRET");
        let debug = format!("{client:?}");
        assert!(!debug.contains("SECRET"));
    }

    #[test]
    fn fixed_position_needs_both_halves() {
        let mut cfg = Config::default();
        assert_eq!(cfg.fixed_position(), None);

        cfg.location.latitude = Some(10.0);
        assert_eq!(cfg.fixed_position(), None);

        cfg.set_fixed_position(10.0, 20.0);
        assert_eq!(cfg.fixed_position(), Some(Position { latitude: 10.0, longitude: 20.0 }));

        cfg.clear_fixed_position();
        assert_eq!(cfg.fixed_position(), None);
    }

    #[test]
    fn ip_lookup_consent_defaults_to_undetermined() {
        let mut cfg = Config::default();
        assert_eq!(cfg.ip_lookup_permission(), PermissionStatus::Undetermined);

        cfg.set_ip_lookup_consent(false);
        assert_eq!(cfg.ip_lookup_permission(), PermissionStatus::Denied);
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_then_load_preserves_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.set_fixed_position(51.5, -0.12);
        cfg.set_ip_lookup_consent(true);
        cfg.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn parse_error_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = [").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
