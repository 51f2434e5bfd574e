//! Configuration module for the report client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 15;
const DEFAULT_PAGE_LIMIT: u32 = 10;
const DEFAULT_DEBOUNCE_MS: u64 = 350;

const MAX_TIMEOUT_SECS: u64 = 120;
const MAX_PAGE_LIMIT: u32 = 100;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the reports backend
    pub api_base_url: String,
    /// Timeout applied to every backend request
    pub request_timeout: Duration,
    /// Page size for list, search and filter requests
    pub page_limit: u32,
    /// Quiet period before a text query triggers a search
    pub search_debounce: Duration,
    /// Path to the local SQLite store
    pub db_path: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            page_limit: DEFAULT_PAGE_LIMIT,
            search_debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            db_path: PathBuf::from("./data/client.sqlite"),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let api_base_url = env::var("CIVIC_API_BASE_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or(defaults.api_base_url);

        let timeout_secs = parse_var("CIVIC_REQUEST_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
            .clamp(1, MAX_TIMEOUT_SECS);

        let page_limit = parse_var("CIVIC_PAGE_LIMIT", DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT);

        let debounce_ms = parse_var("CIVIC_SEARCH_DEBOUNCE_MS", DEFAULT_DEBOUNCE_MS);

        let db_path = env::var("CIVIC_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.db_path);

        let log_level = env::var("CIVIC_LOG_LEVEL").unwrap_or(defaults.log_level);

        Self {
            api_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            page_limit,
            search_debounce: Duration::from_millis(debounce_ms),
            db_path,
            log_level,
        }
    }
}

/// Read a numeric variable, falling back to `default` when unset or unparseable.
fn parse_var<T: FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring invalid {}={:?}, using {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}
