// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of Trailscope.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

//! Application configuration

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Tracker API connection
    pub tracker: TrackerConfig,

    /// Reverse-geocoding service
    #[serde(default)]
    pub geocode: GeocodeConfig,

    /// System configuration
    #[serde(default)]
    pub system: SystemConfig,
}

/// Tracker API connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Base URL of the tracker instance (e.g. "https://tracker.example.org")
    pub api_url: String,

    /// API key, sent as a bearer credential
    pub api_key: String,

    /// Verify TLS certificates (disable for self-signed instances)
    #[serde(default = "default_true")]
    pub verify_ssl: bool,
}

/// Reverse-geocoding service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodeConfig {
    /// Reverse-geocoding endpoint, queried with lat/lon/format=json
    #[serde(default = "default_geocode_url")]
    pub url: String,
}

/// System configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    /// How often each reading poller wakes up (seconds)
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Minimum time between upstream refreshes of one reading (seconds).
    /// The throttle gate; one day by default.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    /// Port for the readings web API
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Directory where rendered heatmap images are written
    #[serde(default = "default_media_dir")]
    pub media_dir: PathBuf,

    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_true() -> bool {
    true
}

fn default_geocode_url() -> String {
    "https://nominatim.openstreetmap.org/reverse".to_string()
}

fn default_poll_interval() -> u64 {
    300
}

fn default_refresh_interval() -> u64 {
    86_400
}

fn default_http_port() -> u16 {
    8099
}

fn default_media_dir() -> PathBuf {
    PathBuf::from("/data/www")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            url: default_geocode_url(),
        }
    }
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval(),
            refresh_interval_secs: default_refresh_interval(),
            http_port: default_http_port(),
            media_dir: default_media_dir(),
            log_level: default_log_level(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig {
                api_url: String::new(),
                api_key: String::new(),
                verify_ssl: true,
            },
            geocode: GeocodeConfig::default(),
            system: SystemConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from addon options or a config file
    pub fn load() -> Result<Self> {
        // Try addon options first (/data/options.json)
        if let Ok(options_str) = std::fs::read_to_string("/data/options.json") {
            let config: Self =
                serde_json::from_str(&options_str).context("Failed to parse addon options")?;
            info!("✅ Loaded configuration from addon options");
            config.validate()?;
            return Ok(config);
        }

        // Try config.toml for development
        if let Ok(config_str) = std::fs::read_to_string("config.toml") {
            let config: Self =
                toml::from_str(&config_str).context("Failed to parse config.toml")?;
            info!("✅ Loaded configuration from config.toml");
            config.validate()?;
            return Ok(config);
        }

        // Try config.json for development
        if let Ok(config_str) = std::fs::read_to_string("config.json") {
            let config: Self =
                serde_json::from_str(&config_str).context("Failed to parse config.json")?;
            info!("✅ Loaded configuration from config.json");
            config.validate()?;
            return Ok(config);
        }

        // Fall back to defaults with environment variable overrides
        warn!("No configuration file found, using defaults with environment overrides");
        let config = Self::from_env();
        config.validate()?;
        Ok(config)
    }

    /// Load from environment variables (development/testing)
    fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("TRACKER_API_URL") {
            config.tracker.api_url = url;
        }
        if let Ok(key) = std::env::var("TRACKER_API_KEY") {
            config.tracker.api_key = key;
        }
        if let Ok(url) = std::env::var("GEOCODE_URL") {
            config.geocode.url = url;
        }
        if let Ok(interval) = std::env::var("POLL_INTERVAL_SECS")
            && let Ok(secs) = interval.parse::<u64>()
        {
            config.system.poll_interval_secs = secs;
        }
        if let Ok(dir) = std::env::var("MEDIA_DIR") {
            config.system.media_dir = PathBuf::from(dir);
        }

        config
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.tracker.api_url.is_empty() {
            anyhow::bail!("tracker.api_url must be configured");
        }
        if !self.tracker.api_url.starts_with("http://") && !self.tracker.api_url.starts_with("https://")
        {
            anyhow::bail!(
                "tracker.api_url must start with http:// or https://, got '{}'",
                self.tracker.api_url
            );
        }
        if self.tracker.api_key.is_empty() {
            anyhow::bail!("tracker.api_key must be configured");
        }
        if self.geocode.url.is_empty() {
            anyhow::bail!("geocode.url cannot be empty");
        }

        if self.system.poll_interval_secs < 10 {
            anyhow::bail!("poll_interval_secs must be at least 10 seconds");
        }
        if self.system.refresh_interval_secs < self.system.poll_interval_secs {
            warn!(
                "refresh_interval_secs ({}s) is below poll_interval_secs ({}s); every poll will hit the upstream API",
                self.system.refresh_interval_secs, self.system.poll_interval_secs
            );
        }

        Ok(())
    }

    /// Poller wake-up interval as a Duration
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.system.poll_interval_secs)
    }

    /// Throttle gate interval as a chrono Duration
    pub fn refresh_interval(&self) -> chrono::Duration {
        chrono::Duration::seconds(i64::try_from(self.system.refresh_interval_secs).unwrap_or(86_400))
    }
}
