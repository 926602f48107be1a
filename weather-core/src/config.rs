use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

use crate::language::Language;

/// City list used when nothing else is given.
pub const DEFAULT_CITIES: &str = "New York, London, Tokyo";
pub const DEFAULT_CARDS_PER_ROW: usize = 3;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com";
const DEFAULT_USER_AGENT: &str = concat!("weather-dashboard/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where the dashboard sends its requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndpointConfig {
    pub geocoder_url: String,
    pub forecast_url: String,
    /// Nominatim rejects requests without an identifying agent.
    pub user_agent: String,
    pub timeout_secs: u64,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl EndpointConfig {
    /// HTTP client shared by the geocoder and the forecast provider.
    pub fn http_client(&self) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .user_agent(self.user_agent.as_str())
            .build()
            .context("Failed to build HTTP client")
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// default_cities = "Paris, Rome"
/// language = "French"
/// cards_per_row = 2
///
/// [endpoints]
/// timeout_secs = 5
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub default_cities: Option<String>,
    pub language: Option<String>,
    pub cards_per_row: Option<usize>,
    /// CSV exports are written here when set.
    pub export_dir: Option<PathBuf>,
    #[serde(default)]
    pub endpoints: EndpointConfig,
}

impl Config {
    pub fn default_cities(&self) -> &str {
        self.default_cities.as_deref().unwrap_or(DEFAULT_CITIES)
    }

    /// Configured language, English when unset.
    pub fn language(&self) -> Result<Language> {
        match &self.language {
            Some(s) => Language::try_from(s.as_str()),
            None => Ok(Language::default()),
        }
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = Some(language.as_str().to_string());
    }

    /// Cards per grid row, never less than one.
    pub fn cards_per_row(&self) -> usize {
        self.cards_per_row.unwrap_or(DEFAULT_CARDS_PER_ROW).max(1)
    }

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
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::default();

        assert_eq!(cfg.default_cities(), "New York, London, Tokyo");
        assert_eq!(cfg.language().unwrap(), Language::English);
        assert_eq!(cfg.cards_per_row(), 3);
        assert_eq!(cfg.endpoints.forecast_url, DEFAULT_FORECAST_URL);
    }

    #[test]
    fn cards_per_row_is_at_least_one() {
        let cfg = Config { cards_per_row: Some(0), ..Config::default() };
        assert_eq!(cfg.cards_per_row(), 1);
    }

    #[test]
    fn unknown_language_is_an_error() {
        let cfg = Config { language: Some("Elvish".into()), ..Config::default() };
        let err = cfg.language().unwrap_err();

        assert!(err.to_string().contains("Unknown language"));
    }

    #[test]
    fn set_language_stores_name() {
        let mut cfg = Config::default();
        cfg.set_language(Language::Spanish);

        assert_eq!(cfg.language.as_deref(), Some("Spanish"));
        assert_eq!(cfg.language().unwrap(), Language::Spanish);
    }

    #[test]
    fn partial_endpoints_keep_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            default_cities = "Paris, Rome"

            [endpoints]
            timeout_secs = 3
            "#,
        )
        .unwrap();

        assert_eq!(cfg.default_cities(), "Paris, Rome");
        assert_eq!(cfg.endpoints.timeout_secs, 3);
        assert_eq!(cfg.endpoints.geocoder_url, DEFAULT_GEOCODER_URL);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config {
            default_cities: Some("Lima".into()),
            cards_per_row: Some(2),
            export_dir: Some(PathBuf::from("/tmp/exports")),
            ..Config::default()
        };
        cfg.set_language(Language::Arabic);
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(cfg, Config::default());
    }
}
