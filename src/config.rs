//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Storage
//!
//! ```bash
//! export STORAGE_BACKEND="file"      # file (default) | memory | redis
//! export DATA_DIR="./data"
//!
//! # redis backend, either a full URL...
//! export REDIS_URL="redis://localhost:6379/0"
//! # ...or individual components
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! export REDIS_KEY_PREFIX="depot:"
//! ```
//!
//! ## Required Variables
//!
//! - `TOKEN_SIGNING_SECRET` - HMAC key for API tokens
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `BEHIND_PROXY` - Read client IPs from forwarding headers (default: `false`)
//! - `TRACKING_PROVIDERS` - Comma list of `17track`, `aftership`
//!   (default: every provider with an API key, in that order)
//! - `SEVENTEEN_TRACK_API_KEY`, `SEVENTEEN_TRACK_BASE_URL`
//! - `AFTERSHIP_API_KEY`, `AFTERSHIP_BASE_URL`
//! - `TRACKING_TIMEOUT_SECONDS` (default: 10), `TRACKING_MAX_RETRIES` (default: 2)
//! - `TRACKING_DEMO_FALLBACK` - Serve built-in fixtures on a miss (default: `true`)
//! - `BACKUP_DIR` - Enables the auto-backup worker
//! - `BACKUP_CHECK_INTERVAL_SECONDS` (default: 3600)

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::infrastructure::tracking::{aftership, seventeen_track};

pub const PROVIDER_17TRACK: &str = "17track";
pub const PROVIDER_AFTERSHIP: &str = "aftership";

/// Where warehouse documents are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Memory,
    Redis,
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            "redis" => Ok(StorageBackend::Redis),
            other => anyhow::bail!(
                "STORAGE_BACKEND must be 'file', 'memory' or 'redis', got '{}'",
                other
            ),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    /// HMAC signing secret used to hash API tokens before storage.
    pub token_signing_secret: String,

    pub storage_backend: StorageBackend,
    pub data_dir: PathBuf,
    pub redis_url: Option<String>,
    pub redis_key_prefix: String,

    /// Providers queried in order, by name.
    pub tracking_providers: Vec<String>,
    pub seventeen_track_api_key: Option<String>,
    pub seventeen_track_base_url: String,
    pub aftership_api_key: Option<String>,
    pub aftership_base_url: String,
    pub tracking_timeout_seconds: u64,
    pub tracking_max_retries: usize,
    pub tracking_demo_fallback: bool,

    pub backup_dir: Option<PathBuf>,
    pub backup_check_interval_seconds: u64,
}

fn env_parse<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        .unwrap_or(default)
}

fn env_non_empty(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `TOKEN_SIGNING_SECRET` is missing or
    /// `STORAGE_BACKEND` is unknown.
    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
        let behind_proxy = env_bool("BEHIND_PROXY", false);

        let token_signing_secret =
            env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;

        let storage_backend = env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "file".to_string())
            .parse()?;
        let data_dir = PathBuf::from(env::var("DATA_DIR").unwrap_or_else(|_| "./data".to_string()));
        let redis_url = Self::load_redis_url();
        let redis_key_prefix = env::var("REDIS_KEY_PREFIX").unwrap_or_default();

        let seventeen_track_api_key = env_non_empty("SEVENTEEN_TRACK_API_KEY");
        let aftership_api_key = env_non_empty("AFTERSHIP_API_KEY");
        let tracking_providers = Self::load_tracking_providers(
            seventeen_track_api_key.is_some(),
            aftership_api_key.is_some(),
        );

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            behind_proxy,
            token_signing_secret,
            storage_backend,
            data_dir,
            redis_url,
            redis_key_prefix,
            tracking_providers,
            seventeen_track_api_key,
            seventeen_track_base_url: env::var("SEVENTEEN_TRACK_BASE_URL")
                .unwrap_or_else(|_| seventeen_track::DEFAULT_BASE_URL.to_string()),
            aftership_api_key,
            aftership_base_url: env::var("AFTERSHIP_BASE_URL")
                .unwrap_or_else(|_| aftership::DEFAULT_BASE_URL.to_string()),
            tracking_timeout_seconds: env_parse("TRACKING_TIMEOUT_SECONDS", 10),
            tracking_max_retries: env_parse("TRACKING_MAX_RETRIES", 2),
            tracking_demo_fallback: env_bool("TRACKING_DEMO_FALLBACK", true),
            backup_dir: env_non_empty("BACKUP_DIR").map(PathBuf::from),
            backup_check_interval_seconds: env_parse("BACKUP_CHECK_INTERVAL_SECONDS", 3600),
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok();
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        let url = match password {
            Some(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        };

        Some(url)
    }

    /// Explicit `TRACKING_PROVIDERS`, or every provider that has an API key.
    fn load_tracking_providers(has_17track_key: bool, has_aftership_key: bool) -> Vec<String> {
        if let Some(list) = env_non_empty("TRACKING_PROVIDERS") {
            return list
                .split(',')
                .map(|p| p.trim().to_ascii_lowercase())
                .filter(|p| !p.is_empty())
                .collect();
        }

        let mut providers = Vec::new();
        if has_17track_key {
            providers.push(PROVIDER_17TRACK.to_string());
        }
        if has_aftership_key {
            providers.push(PROVIDER_AFTERSHIP.to_string());
        }
        providers
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - the redis backend is selected without a valid Redis URL
    /// - a tracking provider is unknown or lacks its API key
    /// - timeouts or intervals are zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.token_signing_secret.is_empty() {
            anyhow::bail!("TOKEN_SIGNING_SECRET must not be empty");
        }

        if self.storage_backend == StorageBackend::Redis {
            let Some(redis_url) = &self.redis_url else {
                anyhow::bail!("STORAGE_BACKEND=redis requires REDIS_URL or REDIS_HOST");
            };
            if !redis_url.starts_with("redis://") && !redis_url.starts_with("rediss://") {
                anyhow::bail!(
                    "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                    mask_connection_string(redis_url)
                );
            }
        }

        for provider in &self.tracking_providers {
            let has_key = match provider.as_str() {
                PROVIDER_17TRACK => self.seventeen_track_api_key.is_some(),
                PROVIDER_AFTERSHIP => self.aftership_api_key.is_some(),
                other => anyhow::bail!(
                    "TRACKING_PROVIDERS entries must be '{}' or '{}', got '{}'",
                    PROVIDER_17TRACK,
                    PROVIDER_AFTERSHIP,
                    other
                ),
            };
            if !has_key {
                anyhow::bail!("Tracking provider '{}' is enabled but has no API key", provider);
            }
        }

        for (name, url) in [
            ("SEVENTEEN_TRACK_BASE_URL", &self.seventeen_track_base_url),
            ("AFTERSHIP_BASE_URL", &self.aftership_base_url),
        ] {
            let parsed = url::Url::parse(url)
                .with_context(|| format!("{} is not a valid URL: '{}'", name, url))?;
            if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
                anyhow::bail!("{} must be an http(s) URL, got '{}'", name, url);
            }
        }

        if self.tracking_timeout_seconds == 0 {
            anyhow::bail!("TRACKING_TIMEOUT_SECONDS must be greater than 0");
        }

        if self.tracking_max_retries > 10 {
            anyhow::bail!(
                "TRACKING_MAX_RETRIES must be at most 10, got {}",
                self.tracking_max_retries
            );
        }

        if self.backup_check_interval_seconds == 0 {
            anyhow::bail!("BACKUP_CHECK_INTERVAL_SECONDS must be greater than 0");
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);

        match self.storage_backend {
            StorageBackend::File => {
                tracing::info!("  Storage: file ({})", self.data_dir.display())
            }
            StorageBackend::Memory => tracing::info!("  Storage: memory (not persisted)"),
            StorageBackend::Redis => tracing::info!(
                "  Storage: redis ({}, prefix '{}')",
                self.redis_url
                    .as_deref()
                    .map(mask_connection_string)
                    .unwrap_or_default(),
                self.redis_key_prefix
            ),
        }

        if self.tracking_providers.is_empty() {
            tracing::info!("  Tracking providers: none");
        } else {
            tracing::info!("  Tracking providers: {}", self.tracking_providers.join(", "));
        }
        if let Some(key) = &self.seventeen_track_api_key {
            tracing::info!("  17track key: {}", mask_secret(key));
        }
        if let Some(key) = &self.aftership_api_key {
            tracing::info!("  AfterShip key: {}", mask_secret(key));
        }
        tracing::info!("  Demo tracking fallback: {}", self.tracking_demo_fallback);

        match &self.backup_dir {
            Some(dir) => tracing::info!(
                "  Auto-backup: {} (checked every {}s)",
                dir.display(),
                self.backup_check_interval_seconds
            ),
            None => tracing::info!("  Auto-backup: disabled"),
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Masks sensitive information in connection strings for logging.
///
/// `redis://:password@host:port/db` becomes `redis://:***@host:port/db`.
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Keeps the first four characters of a secret.
fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "***".to_string()
    } else {
        format!("{}***", visible)
    }
}

/// Loads and validates configuration from environment variables.
///
/// Expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
