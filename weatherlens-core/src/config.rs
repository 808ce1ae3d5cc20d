use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{icon::DEFAULT_ICON_BASE_URL, model::Coordinates, session::Preferences};

pub const DEFAULT_BASE_URL: &str = "https://open-weather13.p.rapidapi.com";
pub const DEFAULT_API_HOST: &str = "open-weather13.p.rapidapi.com";
pub const DEFAULT_CITY: &str = "New York";
pub const DEFAULT_LANG: &str = "EN";
pub const DEFAULT_IP_LOOKUP_URL: &str = "http://ip-api.com/json";

pub const API_KEY_ENV: &str = "RAPIDAPI_KEY";
pub const API_HOST_ENV: &str = "RAPIDAPI_HOST";

/// Credentials and endpoint of the weather provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Sent as `x-rapidapi-key`. Empty means "not configured"; requests still go out.
    pub key: String,
    /// Sent as `x-rapidapi-host`.
    pub host: String,
    pub base_url: String,
    pub lang: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: String::new(),
            host: DEFAULT_API_HOST.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            lang: DEFAULT_LANG.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub celsius: bool,
    pub dark_mode: bool,
    pub icon_base_url: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            celsius: false,
            dark_mode: false,
            icon_base_url: DEFAULT_ICON_BASE_URL.to_string(),
        }
    }
}

/// How "use my location" finds the host's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
    /// Approximate position from the public IP address.
    #[default]
    Ip,
    /// Coordinates written in the config file.
    Fixed,
    /// No location capability at all.
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationConfig {
    pub mode: LocationMode,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub lookup_url: String,
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            mode: LocationMode::default(),
            latitude: None,
            longitude: None,
            lookup_url: DEFAULT_IP_LOOKUP_URL.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_city = "Lisbon"
///
/// [api]
/// key = "..."
/// host = "open-weather13.p.rapidapi.com"
///
/// [display]
/// celsius = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// City fetched on startup when none is given.
    pub default_city: String,
    pub api: ApiConfig,
    pub display: DisplayConfig,
    pub location: LocationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_city: DEFAULT_CITY.to_string(),
            api: ApiConfig::default(),
            display: DisplayConfig::default(),
            location: LocationConfig::default(),
        }
    }
}

impl Config {
    /// Load config from the platform config directory, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
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

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherlens", "weatherlens")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Let `RAPIDAPI_KEY` / `RAPIDAPI_HOST` from the process environment win over the file.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|name| std::env::var(name).ok())
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.is_empty()) {
            self.api.key = key;
        }
        if let Some(host) = lookup(API_HOST_ENV).filter(|v| !v.is_empty()) {
            self.api.host = host;
        }
        self
    }

    pub fn set_credentials(&mut self, key: String, host: String) {
        self.api.key = key;
        self.api.host = host;
    }

    pub fn has_credentials(&self) -> bool {
        !self.api.key.is_empty() && !self.api.host.is_empty()
    }

    /// Coordinates from the `[location]` table, when both halves are present.
    pub fn fixed_coordinates(&self) -> Option<Coordinates> {
        match (self.location.latitude, self.location.longitude) {
            (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
            _ => None,
        }
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            celsius: self.display.celsius,
            dark_mode: self.display.dark_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_rapidapi() {
        let cfg = Config::default();

        assert_eq!(cfg.default_city, "New York");
        assert_eq!(cfg.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.api.lang, "EN");
        assert!(!cfg.has_credentials());
        assert_eq!(cfg.location.mode, LocationMode::Ip);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            default_city = "Lisbon"

            [api]
            key = "KEY"

            [display]
            celsius = true
            "#,
        )
        .expect("partial config should parse");

        assert_eq!(cfg.default_city, "Lisbon");
        assert_eq!(cfg.api.key, "KEY");
        assert_eq!(cfg.api.host, DEFAULT_API_HOST);
        assert!(cfg.preferences().celsius);
        assert!(!cfg.preferences().dark_mode);
    }

    #[test]
    fn save_then_load_returns_same_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_credentials("KEY".into(), "HOST".into());
        cfg.location.mode = LocationMode::Fixed;
        cfg.location.latitude = Some(40.71);
        cfg.location.longitude = Some(-74.01);
        cfg.save_to(&path).expect("save should succeed");

        let loaded = Config::load_from(&path).expect("load should succeed");
        assert_eq!(loaded, cfg);
        assert_eq!(loaded.fixed_coordinates(), Some(Coordinates::new(40.71, -74.01)));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = Config::load_from(&dir.path().join("absent.toml")).expect("defaults");
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn env_overrides_win_over_file_values() {
        let mut cfg = Config::default();
        cfg.set_credentials("FILE_KEY".into(), "file.host".into());

        let cfg = cfg.with_overrides(|name| match name {
            API_KEY_ENV => Some("ENV_KEY".to_string()),
            API_HOST_ENV => Some(String::new()),
            _ => None,
        });

        assert_eq!(cfg.api.key, "ENV_KEY");
        assert_eq!(cfg.api.host, "file.host");
    }

    #[test]
    fn fixed_coordinates_need_both_halves() {
        let mut cfg = Config::default();
        cfg.location.latitude = Some(1.0);
        assert!(cfg.fixed_coordinates().is_none());
    }
}
