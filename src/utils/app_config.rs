/// Application configuration management
/// Stores server settings in ~/.config/sysdash/config.toml

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_REFRESH_SECS,
};

/// On-disk configuration. Every key is optional.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub refresh_secs: Option<u64>,
    pub cors: Option<bool>,
}

impl AppConfig {
    /// Get default config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(config)
    }

    /// Load from an explicit path, or from the default location if none
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(p),
            None => match Self::config_path() {
                Some(p) => Self::load_from(&p),
                None => Ok(Self::default()),
            },
        }
    }
}

/// Fully resolved server settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub refresh_secs: u64,
    pub cors: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            refresh_secs: DEFAULT_REFRESH_SECS,
            cors: false,
        }
    }
}

impl Settings {
    /// Layer `overrides` (CLI) over `file` over defaults
    pub fn resolve(file: AppConfig, overrides: AppConfig) -> Result<Self> {
        let defaults = Settings::default();

        let settings = Settings {
            host: overrides.host.or(file.host).unwrap_or(defaults.host),
            port: overrides.port.or(file.port).unwrap_or(defaults.port),
            refresh_secs: overrides
                .refresh_secs
                .or(file.refresh_secs)
                .unwrap_or(defaults.refresh_secs),
            cors: overrides.cors.or(file.cors).unwrap_or(defaults.cors),
        };

        if settings.refresh_secs == 0 {
            bail!("refresh_secs must be at least 1");
        }

        Ok(settings)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
