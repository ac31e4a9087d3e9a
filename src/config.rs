// src/config.rs

//! Application configuration structures and loading.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{HijriSelectors, TimesSelectors};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP fetch behavior settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Remote source URLs and selectors
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Local cache settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Periodic refresh settings
    #[serde(default)]
    pub schedule: ScheduleConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return defaults if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::config("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::config("fetch.timeout_secs must be > 0"));
        }
        if self.sources.times_url.trim().is_empty() {
            return Err(AppError::config("sources.times_url is empty"));
        }
        if self.sources.hijri_url.trim().is_empty() {
            return Err(AppError::config("sources.hijri_url is empty"));
        }
        if self.store.dir.trim().is_empty() {
            return Err(AppError::config("store.dir is empty"));
        }
        Ok(())
    }
}

/// HTTP client behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Remote source URLs and their selector specs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Monthly prayer-time table page
    #[serde(default = "defaults::times_url")]
    pub times_url: String,

    /// Monthly Hijri calendar page
    #[serde(default = "defaults::hijri_url")]
    pub hijri_url: String,

    /// Selectors for the prayer-time table
    #[serde(default)]
    pub times_selectors: TimesSelectors,

    /// Selectors for the Hijri calendar table
    #[serde(default)]
    pub hijri_selectors: HijriSelectors,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            times_url: defaults::times_url(),
            hijri_url: defaults::hijri_url(),
            times_selectors: TimesSelectors::default(),
            hijri_selectors: HijriSelectors::default(),
        }
    }
}

/// Local cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the cache file
    #[serde(default = "defaults::store_dir")]
    pub dir: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: defaults::store_dir(),
        }
    }
}

/// Periodic refresh settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Cadence for `watch`, e.g. "30m", "6h", "1d"
    #[serde(default = "defaults::interval")]
    pub interval: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            interval: defaults::interval(),
        }
    }
}

mod defaults {
    pub fn user_agent() -> String {
        format!("waktu/{}", env!("CARGO_PKG_VERSION"))
    }

    pub fn timeout() -> u64 {
        30
    }

    pub fn times_url() -> String {
        "https://www.waktusolat.my/kedah/kdh05".to_string()
    }

    pub fn hijri_url() -> String {
        "https://timesprayer.com/en/hijri-date-in-malaysia.html".to_string()
    }

    pub fn store_dir() -> String {
        "data".to_string()
    }

    pub fn interval() -> String {
        "6h".to_string()
    }
}
