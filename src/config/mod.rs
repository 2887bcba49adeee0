//! Configuration module for the Flopar client.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::AppError;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the inventory backend, without trailing slash
    pub api_url: String,
    /// Path to the persisted session file
    pub session_path: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Timeout applied to every backend request
    pub request_timeout: Duration,
    /// Window during which repeated scanner reads are ignored
    pub scan_debounce: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let api_url = env::var("FLOPAR_API_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:8000".to_string())
            .trim_end_matches('/')
            .to_string();

        let session_path = env::var("FLOPAR_SESSION_PATH")
            .unwrap_or_else(|_| "./data/session.json".to_string())
            .into();

        let log_level = env::var("FLOPAR_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        let request_timeout =
            Duration::from_secs(parse_number("FLOPAR_REQUEST_TIMEOUT_SECS", 15)?);
        let scan_debounce = Duration::from_millis(parse_number("FLOPAR_SCAN_DEBOUNCE_MS", 800)?);

        Ok(Self {
            api_url,
            session_path,
            log_level,
            request_timeout,
            scan_debounce,
        })
    }
}

fn parse_number(key: &str, default: u64) -> Result<u64, AppError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::Validation(format!("Invalid {} value: {}", key, raw))),
        Err(_) => Ok(default),
    }
}
