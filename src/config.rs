//! Application configuration
//!
//! Handles loading and managing configuration from config.json and secrets.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use crate::icon::{Color, DownloadOptions, ImageFormat, DEFAULT_SIZE};

/// Global application config
static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Global secrets
static APP_SECRETS: OnceLock<AppSecrets> = OnceLock::new();

/// Get the global application config
pub fn get_config() -> &'static AppConfig {
    APP_CONFIG.get_or_init(AppConfig::load)
}

/// Get the global application secrets
pub fn get_secrets() -> &'static AppSecrets {
    APP_SECRETS.get_or_init(AppSecrets::load)
}

/// Root application configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub download: DownloadConfig,
    #[serde(default)]
    pub recent: RecentConfig,
}

/// Application secrets (loaded from secrets.json)
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppSecrets {
    #[serde(default)]
    pub icons8: Icons8Secrets,
}

/// Icons8 API secrets
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Icons8Secrets {
    /// Public API token
    #[serde(default)]
    pub api_key: String,
}

impl Icons8Secrets {
    /// Check if an API token is configured
    pub fn has_credentials(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl AppSecrets {
    /// Load secrets from secrets.json
    pub fn load() -> Self {
        // Try to load from current directory first
        if let Ok(secrets) = Self::load_from_path("secrets.json") {
            log::info!("Loaded secrets from ./secrets.json");
            return secrets;
        }

        // Try to load from executable directory
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let secrets_path = exe_dir.join("secrets.json");
                if let Ok(secrets) = Self::load_from_path(&secrets_path) {
                    log::info!("Loaded secrets from {}", secrets_path.display());
                    return secrets;
                }
            }
        }

        log::info!("No secrets.json found, icon details will be requested without a token");
        Self::default()
    }

    fn load_from_path(path: impl Into<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.into();
        let content = fs::read_to_string(&path)?;
        let secrets: AppSecrets = serde_json::from_str(&content)?;
        Ok(secrets)
    }
}

/// Icons8 endpoints and HTTP client settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    /// Endpoint returning one icon with its base64 SVG
    #[serde(default = "default_detail_url")]
    pub detail_url: String,
    /// Base URL for rendered raster assets
    #[serde(default = "default_asset_base_url")]
    pub asset_base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Custom user agent string for HTTP requests
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_detail_url() -> String {
    "https://api-icons.icons8.com/publicApi/icons/icon".to_string()
}

fn default_asset_base_url() -> String {
    "https://img.icons8.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            detail_url: default_detail_url(),
            asset_base_url: default_asset_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

impl ApiConfig {
    /// User agent sent with every request
    pub fn user_agent(&self) -> String {
        self.user_agent.clone().unwrap_or_else(|| {
            concat!("icon-actions/", env!("CARGO_PKG_VERSION")).to_string()
        })
    }
}

/// Default download options, overridable per invocation
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DownloadConfig {
    /// Destination directory (defaults to ~/Downloads, else the current directory)
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default = "default_format")]
    pub format: ImageFormat,
    #[serde(default)]
    pub color: Option<Color>,
    #[serde(default = "default_size")]
    pub size: u32,
}

fn default_format() -> ImageFormat {
    ImageFormat::Png
}

fn default_size() -> u32 {
    DEFAULT_SIZE
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            path: None,
            format: default_format(),
            color: None,
            size: default_size(),
        }
    }
}

impl DownloadConfig {
    /// Destination directory after applying the fallbacks
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(path) = &self.path {
            return path.clone();
        }
        let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"));
        match home.map(|h| PathBuf::from(h).join("Downloads")) {
            Some(downloads) if downloads.is_dir() => downloads,
            _ => PathBuf::from("."),
        }
    }

    /// Build per-operation options from the configured defaults
    pub fn to_options(&self) -> DownloadOptions {
        DownloadOptions {
            format: self.format,
            color: self.color.clone(),
            path: self.resolved_path(),
            size: self.size,
        }
    }
}

/// Recent-icons history settings
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RecentConfig {
    /// JSON file holding the history
    #[serde(default = "default_recent_path")]
    pub path: PathBuf,
    /// Maximum number of entries kept
    #[serde(default = "default_recent_limit")]
    pub limit: usize,
}

fn default_recent_path() -> PathBuf {
    PathBuf::from("recent_icons.json")
}

fn default_recent_limit() -> usize {
    20
}

impl Default for RecentConfig {
    fn default() -> Self {
        Self {
            path: default_recent_path(),
            limit: default_recent_limit(),
        }
    }
}

impl AppConfig {
    /// Load configuration from config.json
    pub fn load() -> Self {
        // Try to load from current directory first
        if let Ok(config) = Self::load_from_path("config.json") {
            log::info!("Loaded config from ./config.json");
            return config;
        }

        // Try to load from executable directory
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let config_path = exe_dir.join("config.json");
                if let Ok(config) = Self::load_from_path(&config_path) {
                    log::info!("Loaded config from {}", config_path.display());
                    return config;
                }
            }
        }

        log::info!("No config.json found, using defaults");
        Self::default()
    }

    fn load_from_path(path: impl Into<PathBuf>) -> Result<Self, Box<dyn std::error::Error>> {
        let path = path.into();
        let content = fs::read_to_string(&path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        Ok(config)
    }
}
