//! Application configuration.
//!
//! Configuration is stored in `config.yaml` inside the config directory
//! (`$HOTELDESK_CONFIG_DIR`, or the platform config dir) and includes:
//! - API base URL and HTTP timeouts
//! - Default list page size and an optional search debounce override

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{HotelDeskError, Result};
use crate::list::PageSize;

pub const CONFIG_DIR_ENV: &str = "HOTELDESK_CONFIG_DIR";
pub const API_URL_ENV: &str = "HOTELDESK_API_URL";

/// Keys accepted by `config get` / `config set`.
pub const CONFIG_KEYS: &[&str] = &[
    "api.base_url",
    "api.timeout",
    "api.connect_timeout",
    "list.page_size",
    "list.debounce_ms",
];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub list: ListConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Total request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Connect timeout in seconds (default: 10)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: default_timeout(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListConfig {
    #[serde(default)]
    pub page_size: PageSize,

    /// Overrides every screen's search debounce window when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,
}

/// Directory holding `config.yaml` and `session.yaml`.
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(dir) = env::var(CONFIG_DIR_ENV)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    directories::ProjectDirs::from("", "", "hoteldesk")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| HotelDeskError::Config("cannot determine config directory".to_string()))
}

impl Config {
    pub fn config_path(dir: &Path) -> PathBuf {
        dir.join("config.yaml")
    }

    /// Load from the default config directory.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_dir()?)
    }

    /// Load configuration from `dir`, or return the default if not found.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = Self::config_path(dir);
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|e| {
            HotelDeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config at {}: {}", path.display(), e),
            ))
        })?;
        let config: Config = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&config_dir()?)
    }

    pub fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| {
            HotelDeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create config directory {}: {}", dir.display(), e),
            ))
        })?;

        let path = Self::config_path(dir);
        let content = serde_yaml_ng::to_string(self)?;
        fs::write(&path, content).map_err(|e| {
            HotelDeskError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to write config at {}: {}", path.display(), e),
            ))
        })?;
        Ok(())
    }

    /// API base URL, honoring `HOTELDESK_API_URL`. Always ends in `/` so
    /// resource paths join beneath it.
    pub fn base_url(&self) -> Result<Url> {
        let raw = match env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url,
            _ => self.api.base_url.clone(),
        };
        parse_base_url(&raw)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.api.connect_timeout)
    }

    pub fn debounce_override(&self) -> Option<Duration> {
        self.list.debounce_ms.map(Duration::from_millis)
    }

    /// Read one value by dotted key.
    pub fn get(&self, key: &str) -> Result<String> {
        Ok(match key {
            "api.base_url" => self.api.base_url.clone(),
            "api.timeout" => self.api.timeout.to_string(),
            "api.connect_timeout" => self.api.connect_timeout.to_string(),
            "list.page_size" => self.list.page_size.to_string(),
            "list.debounce_ms" => self
                .list
                .debounce_ms
                .map(|ms| ms.to_string())
                .unwrap_or_default(),
            _ => return Err(unknown_key(key)),
        })
    }

    /// Validate and set one value by dotted key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "api.base_url" => {
                parse_base_url(value)?;
                self.api.base_url = value.to_string();
            }
            "api.timeout" => self.api.timeout = parse_seconds(key, value)?,
            "api.connect_timeout" => self.api.connect_timeout = parse_seconds(key, value)?,
            "list.page_size" => self.list.page_size = value.parse()?,
            "list.debounce_ms" => {
                self.list.debounce_ms = if value.is_empty() || value == "none" {
                    None
                } else {
                    Some(value.parse().map_err(|_| {
                        HotelDeskError::Config(format!(
                            "invalid value '{value}' for {key}. Expected milliseconds or 'none'"
                        ))
                    })?)
                };
            }
            _ => return Err(unknown_key(key)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> HotelDeskError {
    HotelDeskError::Config(format!(
        "unknown config key '{key}'. Valid keys: {}",
        CONFIG_KEYS.join(", ")
    ))
}

fn parse_seconds(key: &str, value: &str) -> Result<u64> {
    match value.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => Err(HotelDeskError::Config(format!(
            "invalid value '{value}' for {key}. Expected a positive number of seconds"
        ))),
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    let mut url = Url::parse(raw)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(HotelDeskError::Config(format!(
            "base URL must use http or https, got '{raw}'"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
