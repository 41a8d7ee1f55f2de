//! Configuration management for the client.

use shelf_engine::DEFAULT_PAGE_SIZE;
use std::env;
use std::time::Duration;

/// Backend used when `SHELF_API_BASE` is not set.
pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Backend base URL, without a trailing slash
    pub api_base: String,
    /// Initial page size, and the size `reset` returns to
    pub page_size: u32,
    /// Request timeout; `None` leaves it to the transport
    pub http_timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            http_timeout: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base = normalize_base(
            &lookup("SHELF_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
        )?;

        let page_size = match lookup("SHELF_PAGE_SIZE") {
            Some(raw) => parse_page_size(&raw)?,
            None => DEFAULT_PAGE_SIZE,
        };

        let http_timeout = match lookup("SHELF_HTTP_TIMEOUT_SECS") {
            Some(raw) => Some(parse_timeout(&raw)?),
            None => None,
        };

        Ok(Self {
            api_base,
            page_size,
            http_timeout,
        })
    }

    /// Override the backend base URL.
    pub fn with_api_base(mut self, api_base: &str) -> Result<Self, ConfigError> {
        self.api_base = normalize_base(api_base)?;
        Ok(self)
    }
}

/// Check that `raw` is an absolute http(s) URL and drop trailing slashes.
pub fn normalize_base(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let url =
        url::Url::parse(trimmed).map_err(|_| ConfigError::InvalidApiBase(trimmed.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidApiBase(trimmed.to_string()));
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}

fn parse_page_size(raw: &str) -> Result<u32, ConfigError> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(ConfigError::InvalidPageSize(raw.to_string())),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs >= 1 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(raw.to_string())),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid SHELF_API_BASE value: {0}")]
    InvalidApiBase(String),

    #[error("Invalid SHELF_PAGE_SIZE value: {0}")]
    InvalidPageSize(String),

    #[error("Invalid SHELF_HTTP_TIMEOUT_SECS value: {0}")]
    InvalidTimeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_base, "http://localhost:3000");
        assert_eq!(config.page_size, 8);
        assert!(config.http_timeout.is_none());
    }

    #[test]
    fn reads_all_values() {
        let config = Config::from_lookup(lookup(&[
            ("SHELF_API_BASE", "https://books.example.com/api/"),
            ("SHELF_PAGE_SIZE", "12"),
            ("SHELF_HTTP_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.api_base, "https://books.example.com/api");
        assert_eq!(config.page_size, 12);
        assert_eq!(config.http_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("SHELF_API_BASE", "not a url")])),
            Err(ConfigError::InvalidApiBase(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("SHELF_API_BASE", "ftp://example.com")])),
            Err(ConfigError::InvalidApiBase(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("SHELF_PAGE_SIZE", "0")])),
            Err(ConfigError::InvalidPageSize(_))
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("SHELF_HTTP_TIMEOUT_SECS", "soon")])),
            Err(ConfigError::InvalidTimeout(_))
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("SHELF_HTTP_TIMEOUT_SECS", "0")])),
            Err(ConfigError::InvalidTimeout(_))
        ));
    }

    #[test]
    fn override_api_base() {
        let config = Config::default()
            .with_api_base("http://127.0.0.1:4000/")
            .unwrap();
        assert_eq!(config.api_base, "http://127.0.0.1:4000");
    }
}
