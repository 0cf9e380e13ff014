use std::{env, time::Duration};

use contactbook_core::pagination::PaginationConfig;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable lines (default).
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Pretty
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "contactbook.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Page size when `per_page` is missing or invalid (default: 10)
    pub default_page_size: u64,
    /// Upper bound for `per_page` (default: 100)
    pub max_page_size: u64,
    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
    /// Log output format (default: pretty)
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "contactbook.db")
    /// - `DEFAULT_PAGE_SIZE` - Default page size (default: 10)
    /// - `MAX_PAGE_SIZE` - Maximum page size (default: 100)
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout (default: 10)
    /// - `LOG_FORMAT` - `json` for JSON logs, anything else for pretty logs
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let number = |key: &str, default: u64| -> u64 {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .filter(|v: &u64| *v > 0)
                .unwrap_or(default)
        };

        let default_page_size = number("DEFAULT_PAGE_SIZE", 10);
        let max_page_size = number("MAX_PAGE_SIZE", 100).max(default_page_size);

        Self {
            sqlite_path: lookup("SQLITE_PATH").unwrap_or_else(|| "contactbook.db".to_string()),
            default_page_size,
            max_page_size,
            request_timeout_seconds: number("REQUEST_TIMEOUT_SECONDS", 10),
            log_format: lookup("LOG_FORMAT")
                .map(|v| LogFormat::parse(&v))
                .unwrap_or_default(),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Page size bounds for list endpoints.
    pub fn pagination(&self) -> PaginationConfig {
        PaginationConfig {
            default_per_page: self.default_page_size,
            max_per_page: self.max_page_size,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
