//! Configuration management for the application.
//!
//! This module handles loading, validating, and saving application configuration
//! in TOML format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{API_TOKEN_ENV, CONFIG_DIR_ENV};
use crate::models::{Color, HarmonyMode};

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Theme store directory (defaults to `<config_dir>/data`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

/// Local web server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3002,
        }
    }
}

/// Defaults used by the palette and scheme commands when flags are omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Base color (any CSS color string)
    pub base_color: String,
    /// Harmony mode
    pub harmony: HarmonyMode,
    /// Number of palette colors
    pub palette_size: usize,
}

/// Default palette size (5 colors)
const fn default_palette_size() -> usize {
    5
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            base_color: "#2563eb".to_string(),
            harmony: HarmonyMode::default(),
            palette_size: default_palette_size(),
        }
    }
}

/// Domain/SSL backend settings.
///
/// The bearer token is never stored here; it comes from `SITECRAFT_API_TOKEN`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ApiConfig {
    /// Base URL of the backend (e.g., "https://api.example.com")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ApiConfig {
    /// Reads the bearer token from the environment.
    pub fn token() -> Option<String> {
        std::env::var(API_TOKEN_ENV)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/Sitecraft/config.toml`
/// - macOS: `~/Library/Application Support/Sitecraft/config.toml`
/// - Windows: `%APPDATA%\Sitecraft\config.toml`
///
/// `SITECRAFT_CONFIG_DIR` overrides the directory.
///
/// # Validation
///
/// - `server.host` must not be empty and `server.port` must not be 0
/// - `defaults.palette_size` must be within 1..=12
/// - `defaults.base_color` must parse as a color
/// - `api.base_url`, when set, must be an http(s) URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
    /// Web server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Generation defaults
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Domain API settings
    #[serde(default)]
    pub api: ApiConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/Sitecraft/`
    /// - macOS: `~/Library/Application Support/Sitecraft/`
    /// - Windows: `%APPDATA%\Sitecraft\`
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join("Sitecraft");

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Directory holding the theme store.
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.paths.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(Self::config_dir()?.join("data")),
        }
    }

    /// Loads configuration from the config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(config_path).context(format!(
            "Failed to read config file: {}",
            config_path.display()
        ))?;

        let config: Self = toml::from_str(&content).context(format!(
            "Failed to parse config file: {}",
            config_path.display()
        ))?;

        config.validate()?;
        Ok(config)
    }

    /// Saves configuration to the config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path using a temp file + rename.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(config_dir) = config_path.parent() {
            fs::create_dir_all(config_dir).context(format!(
                "Failed to create config directory: {}",
                config_dir.display()
            ))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        let temp_path = config_path.with_extension("toml.tmp");

        fs::write(&temp_path, content).context(format!(
            "Failed to write temp config file: {}",
            temp_path.display()
        ))?;

        // Atomic rename
        fs::rename(&temp_path, config_path).context(format!(
            "Failed to rename temp config file to: {}",
            config_path.display()
        ))?;

        Ok(())
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.server.host.trim().is_empty() {
            anyhow::bail!("Server host cannot be empty");
        }
        if self.server.port == 0 {
            anyhow::bail!("Server port cannot be 0");
        }

        if !(1..=12).contains(&self.defaults.palette_size) {
            anyhow::bail!(
                "Default palette size must be between 1 and 12, got {}",
                self.defaults.palette_size
            );
        }
        Color::parse(&self.defaults.base_color).context(format!(
            "Default base color is invalid: {}",
            self.defaults.base_color
        ))?;

        if let Some(url) = &self.api.base_url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                anyhow::bail!("API base URL must start with http:// or https://: {}", url);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_new() {
        let config = Config::new();
        assert_eq!(config.paths.data_dir, None);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3002);
        assert_eq!(config.defaults.base_color, "#2563eb");
        assert_eq!(config.defaults.harmony, HarmonyMode::Analogous);
        assert_eq!(config.defaults.palette_size, 5);
        assert!(config.api.base_url.is_none());
    }

    #[test]
    fn test_config_validate() {
        let config = Config::new();
        assert!(config.validate().is_ok());

        let mut bad = config.clone();
        bad.server.port = 0;
        assert!(bad.validate().is_err());

        let mut bad = config.clone();
        bad.server.host = "  ".into();
        assert!(bad.validate().is_err());

        let mut bad = config.clone();
        bad.defaults.palette_size = 13;
        assert!(bad.validate().is_err());

        let mut bad = config.clone();
        bad.defaults.base_color = "not-a-color".into();
        assert!(bad.validate().is_err());

        let mut bad = config;
        bad.api.base_url = Some("ftp://example.com".into());
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::new();
        config.server.port = 8080;
        config.defaults.harmony = HarmonyMode::Triadic;
        config.api.base_url = Some("https://api.example.com".into());
        config.save_to(&config_file).unwrap();

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded, config);
        assert!(!config_file.with_extension("toml.tmp").exists());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[server]\nhost = \"0.0.0.0\"\nport = 4000\n").unwrap();

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded.server.host, "0.0.0.0");
        assert_eq!(loaded.defaults, DefaultsConfig::default());
    }

    #[test]
    fn test_sections_fill_missing_fields() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(
            &config_file,
            "[server]\nport = 4000\n\n[defaults]\nharmony = \"triadic\"\n",
        )
        .unwrap();

        let loaded = Config::load_from(&config_file).unwrap();
        assert_eq!(loaded.server.port, 4000);
        assert_eq!(loaded.server.host, ServerConfig::default().host);
        assert_eq!(loaded.defaults.harmony, HarmonyMode::Triadic);
        assert_eq!(loaded.defaults.base_color, DefaultsConfig::default().base_color);
        assert_eq!(loaded.defaults.palette_size, 5);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        fs::write(&config_file, "[defaults]\nbase_color = \"nope\"\n").unwrap();
        assert!(Config::load_from(&config_file).is_err());
    }

    #[test]
    fn test_data_dir_override() {
        let mut config = Config::new();
        config.paths.data_dir = Some(PathBuf::from("/tmp/sitecraft-data"));
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/sitecraft-data"));
    }
}
