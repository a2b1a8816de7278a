//! Environment-driven configuration.

use std::time::Duration;

use crate::error::AdminError;

pub const DEFAULT_API_URL: &str = "http://localhost:4000/api";
pub const DEFAULT_FILE_HOST: &str = "http://localhost:4000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Base URLs and tuning knobs, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminConfig {
    /// REST API base URL (`DEALERSHIP_API_URL`).
    pub api_url: String,
    /// Image/file host (`DEALERSHIP_FILE_HOST`).
    pub file_host: String,
    /// Push channel host (`DEALERSHIP_PUSH_URL`). Defaults to the file host.
    pub push_url: String,
    /// Bearer token (`DEALERSHIP_API_TOKEN`).
    pub token: Option<String>,
    pub request_timeout: Duration,
    pub search_debounce: Duration,
    pub page_size: i64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            file_host: DEFAULT_FILE_HOST.to_string(),
            push_url: DEFAULT_FILE_HOST.to_string(),
            token: None,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl AdminConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, AdminError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AdminError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_url = non_empty("DEALERSHIP_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into());
        let file_host =
            non_empty("DEALERSHIP_FILE_HOST").unwrap_or_else(|| DEFAULT_FILE_HOST.into());
        let push_url = non_empty("DEALERSHIP_PUSH_URL").unwrap_or_else(|| file_host.clone());

        for (key, value) in [
            ("DEALERSHIP_API_URL", &api_url),
            ("DEALERSHIP_FILE_HOST", &file_host),
            ("DEALERSHIP_PUSH_URL", &push_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| AdminError::Config(format!("{} is not a valid URL: {}", key, e)))?;
        }

        let config = Self {
            api_url,
            file_host,
            push_url,
            token: non_empty("DEALERSHIP_API_TOKEN"),
            request_timeout: Duration::from_secs(parse_or(
                non_empty("DEALERSHIP_TIMEOUT_SECS"),
                DEFAULT_TIMEOUT_SECS,
            )),
            search_debounce: Duration::from_millis(parse_or(
                non_empty("DEALERSHIP_SEARCH_DEBOUNCE_MS"),
                DEFAULT_SEARCH_DEBOUNCE_MS,
            )),
            page_size: parse_or(non_empty("DEALERSHIP_PAGE_SIZE"), DEFAULT_PAGE_SIZE),
        };
        tracing::debug!(
            api_url = %config.api_url,
            file_host = %config.file_host,
            push_url = %config.push_url,
            "configuration loaded"
        );
        Ok(config)
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|val| val.trim().parse::<T>().ok())
        .unwrap_or(default)
}
