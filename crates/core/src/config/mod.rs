//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (DDG_*)
//! 2. TOML config file (if DDG_CONFIG_FILE set)
//! 3. Built-in defaults

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::cache::CacheSettings;
use crate::cache::bounded::{DEFAULT_MAX_ENTRIES, DEFAULT_TTL_MINUTES};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (DDG_*)
/// 2. TOML config file (if DDG_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Minutes a cached result page stays fresh.
    ///
    /// Set via DDG_CACHE_TTL_MIN environment variable.
    #[serde(default = "default_cache_ttl_min")]
    pub cache_ttl_min: u64,

    /// Maximum number of cached (query, region) entries.
    ///
    /// Set via DDG_CACHE_MAX_ENTRIES environment variable.
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: usize,

    /// User-Agent string sent to DuckDuckGo.
    ///
    /// Set via DDG_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via DDG_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Maximum bytes accepted for a results page.
    ///
    /// Set via DDG_MAX_BYTES environment variable.
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,

    /// Region used when a search does not name one.
    ///
    /// Set via DDG_DEFAULT_REGION environment variable.
    #[serde(default = "default_region")]
    pub default_region: String,

    /// Results page endpoint.
    ///
    /// Set via DDG_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_cache_ttl_min() -> u64 {
    DEFAULT_TTL_MINUTES
}

fn default_cache_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_max_bytes() -> usize {
    5_242_880 // 5MB
}

fn default_region() -> String {
    "US".into()
}

fn default_base_url() -> String {
    "https://duckduckgo.com/html/".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_ttl_min: default_cache_ttl_min(),
            cache_max_entries: default_cache_max_entries(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            max_bytes: default_max_bytes(),
            default_region: default_region(),
            base_url: default_base_url(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest/tokio.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Cache limits handed to `BoundedCache::from_settings`.
    pub fn cache_settings(&self) -> CacheSettings {
        CacheSettings { ttl_minutes: self.cache_ttl_min, max_entries: self.cache_max_entries }
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `DDG_`
    /// 2. TOML file from `DDG_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// Cache limits below 1 are raised to 1 rather than rejected.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("DDG_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("DDG_")
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let mut config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.apply_minimums();
        config.validate()?;

        Ok(config)
    }
}
