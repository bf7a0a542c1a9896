//! Configuration management for pagesnap.
//!
//! Configuration is read from `~/.config/pagesnap/config.toml` unless another
//! file is given with `--config`. If the default file doesn't exist, one with
//! commented defaults is created. Environment variables override the file and
//! command-line flags override both. `HOST` and `PORT` are applied by `serve`
//! only.

use crate::scraper::ScraperConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub artifact: ArtifactConfig,
    pub server: ServerConfig,
}

/// Where the scrape artifact lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    pub path: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("scraped_data.json"),
        }
    }
}

/// Bind address of the artifact server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default path when `None`.
    ///
    /// A missing default file is created with comments; a missing explicit
    /// file is an error. Missing fields use default values.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load_default()?,
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn load_default() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            // Read-only homes (containers) just run on defaults
            if let Err(e) = Self::create_default_config(&config_path) {
                warn!("Could not create default config: {}", e);
            }
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Parse the config file at `path`
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Apply `PAGESNAP_ARTIFACT` from `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("PAGESNAP_ARTIFACT").filter(|v| !v.is_empty()) {
            self.artifact.path = PathBuf::from(path);
        }
    }

    /// Apply `HOST` and `PORT` from `lookup`. Only `serve` reads these.
    pub fn apply_server_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("HOST").filter(|v| !v.is_empty()) {
            self.server.host = host;
        }

        if let Some(port) = lookup("PORT").filter(|v| !v.is_empty()) {
            self.server.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".to_string(),
                value: port.clone(),
            })?;
        }

        Ok(())
    }

    /// Get the default config file path: `~/.config/pagesnap/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("pagesnap").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# pagesnap configuration
#
# Environment variables override this file:
#   PAGESNAP_ARTIFACT  artifact path
#   HOST, PORT         server bind address
#   RUST_LOG           log filter (default: info)

[scraper]
# Extraction strategy: "chrome" (rendered) or "static" (HTML only)
engine = "chrome"

# Run browser in headless mode (no visible window)
headless = true

# Navigation timeout in seconds, until DOM content loaded
timeout_secs = 60

# Request timeout for the static engine in seconds
http_timeout_secs = 30

# Page viewport
viewport_width = 1280
viewport_height = 800

# Resource types aborted during page load
blocked_resources = ["image", "font", "stylesheet"]

# How many links and paragraphs to keep (at most 20 and 10)
max_links = 20
max_paragraphs = 10

# Chrome binary, looked up on PATH when unset
# chrome_executable = "/usr/bin/chromium"

[artifact]
# Where the scrape result is written and served from
path = "scraped_data.json"

[server]
host = "0.0.0.0"
port = 5000
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}
