//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub theme: ThemeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Hosted content store endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreConfig {
    /// Project URL, e.g. `https://xyz.supabase.co`
    #[serde(default)]
    pub url: String,

    /// Public (anon) API key
    #[serde(default)]
    pub anon_key: String,
}

impl StoreConfig {
    pub fn is_configured(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }
}

/// Where the academic catalog and activity list come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogMode {
    /// Query the content store
    #[default]
    Remote,
    /// Use the built-in catalog compiled into the binary
    Static,
}

impl std::str::FromStr for CatalogMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "remote" => Ok(CatalogMode::Remote),
            "static" => Ok(CatalogMode::Static),
            other => Err(ConfigError::Invalid(format!("unknown catalog mode '{}'", other))),
        }
    }
}

/// Content source configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentConfig {
    #[serde(default)]
    pub catalog: CatalogMode,
}

/// Site chrome configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Brand shown in the navigation bar
    #[serde(default = "default_site_title")]
    pub title: String,

    /// Address shown in the footer
    #[serde(default)]
    pub footer_email: Option<String>,
}

fn default_site_title() -> String {
    "Academic Portfolio".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_site_title(),
            footer_email: None,
        }
    }
}

/// Theme persistence configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeConfig {
    /// File holding the persisted theme preference
    #[serde(default = "default_theme_file")]
    pub file: String,
}

fn default_theme_file() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("folio").join("theme.toml").to_string_lossy().to_string())
        .unwrap_or_else(|| "./folio_theme.toml".to_string())
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            file: default_theme_file(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("folio").join("config.toml")),
            Some(PathBuf::from("/etc/folio/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Reject configurations the server cannot start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.url.trim().is_empty() {
            return Err(ConfigError::Missing("store.url (FOLIO_STORE_URL)"));
        }
        if self.store.anon_key.trim().is_empty() {
            return Err(ConfigError::Missing("store.anon_key (FOLIO_STORE_KEY)"));
        }
        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Server overrides
        if let Some(host) = var("FOLIO_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("FOLIO_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Store overrides
        if let Some(url) = var("FOLIO_STORE_URL") {
            self.store.url = url;
        }
        if let Some(key) = var("FOLIO_STORE_KEY") {
            self.store.anon_key = key;
        }

        // Content overrides
        if let Some(mode) = var("FOLIO_CATALOG") {
            match mode.parse() {
                Ok(mode) => self.content.catalog = mode,
                Err(e) => tracing::warn!("Ignoring FOLIO_CATALOG: {}", e),
            }
        }

        if let Some(file) = var("FOLIO_THEME_FILE") {
            self.theme.file = file;
        }

        // Logging overrides
        if let Some(level) = var("FOLIO_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("FOLIO_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Folio Configuration
#
# Environment variables override these settings:
# - FOLIO_HOST
# - FOLIO_PORT
# - FOLIO_STORE_URL
# - FOLIO_STORE_KEY
# - FOLIO_CATALOG
# - FOLIO_THEME_FILE
# - FOLIO_LOG_LEVEL
# - FOLIO_LOG_FORMAT

[server]
# HTTP server host
host = "0.0.0.0"

# HTTP server port
port = 8080

[store]
# Hosted content store project URL (required)
url = ""

# Public API key (required)
anon_key = ""

[content]
# Source for subjects, courses and activities: "remote" or "static"
catalog = "remote"

[site]
# Brand shown in the navigation bar
title = "Academic Portfolio"

# Address shown in the footer
# footer_email = "me@example.edu"

[theme]
# File holding the persisted light/dark preference
# file = "~/.local/share/folio/theme.toml"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
