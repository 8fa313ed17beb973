//! Configuration management for the Freshservice client.
//!
//! This module handles loading configuration from environment variables,
//! with validation to ensure all required values are present.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use crate::error::FreshError;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default upper bound on pages followed by a single listing call.
pub const DEFAULT_MAX_PAGES: u32 = 500;

/// Configuration for connecting to a Freshservice instance.
///
/// The API key is stored but never logged or exposed in error messages.
#[derive(Clone)]
pub struct Config {
    /// Root URL of the instance (e.g., `https://acme.freshservice.com`).
    pub domain: String,

    /// API key, sent as the basic-auth username.
    api_key: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Maximum pages a paginated listing may follow.
    pub max_pages: u32,

    /// Default pause between page fetches.
    pub page_delay: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("domain", &self.domain)
            .field("api_key", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .field("max_pages", &self.max_pages)
            .field("page_delay", &self.page_delay)
            .finish()
    }
}

impl Config {
    /// Builds a configuration from explicit values with default limits.
    ///
    /// # Errors
    ///
    /// Returns `FreshError::Config` if the domain is not an http(s) URL or
    /// the API key is empty or a placeholder.
    pub fn new(domain: impl Into<String>, api_key: impl Into<String>) -> Result<Self, FreshError> {
        let domain = Self::validate_domain(domain.into())?;
        let api_key = api_key.into();
        Self::validate_api_key(&api_key)?;

        Ok(Config {
            domain,
            api_key,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_pages: DEFAULT_MAX_PAGES,
            page_delay: Duration::ZERO,
        })
    }

    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `FRESHSERVICE_DOMAIN`: Root URL of the Freshservice instance
    /// - `FRESHSERVICE_API_KEY`: API key for authentication
    ///
    /// # Optional Environment Variables
    ///
    /// - `FRESHSERVICE_TIMEOUT_SECS`: Request timeout (default 30)
    /// - `FRESHSERVICE_MAX_PAGES`: Page budget per listing (default 500)
    /// - `FRESHSERVICE_PAGE_DELAY_MS`: Pause between page fetches (default 0)
    ///
    /// # Errors
    ///
    /// Returns `FreshError::Config` if any required variable is missing
    /// or if values fail validation.
    pub fn from_env() -> Result<Self, FreshError> {
        let domain = Self::get_required_env("FRESHSERVICE_DOMAIN")?;
        let api_key = Self::get_required_env("FRESHSERVICE_API_KEY")?;

        let mut config = Self::new(domain, api_key)?;

        config.timeout = Duration::from_secs(Self::get_optional_env(
            "FRESHSERVICE_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        )?);
        config.max_pages = Self::get_optional_env("FRESHSERVICE_MAX_PAGES", DEFAULT_MAX_PAGES)?;
        config.page_delay =
            Duration::from_millis(Self::get_optional_env("FRESHSERVICE_PAGE_DELAY_MS", 0u64)?);

        if config.max_pages == 0 {
            return Err(FreshError::invalid_config(
                "FRESHSERVICE_MAX_PAGES must be at least 1",
            ));
        }

        Ok(config)
    }

    /// Returns the API key.
    ///
    /// Only for building requests and sanitizing messages, never for logging.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, FreshError> {
        env::var(name)
            .map_err(|_| FreshError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(FreshError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    /// Gets an optional environment variable, falling back to `default` when unset.
    fn get_optional_env<T: FromStr>(name: &str, default: T) -> Result<T, FreshError> {
        match env::var(name) {
            Ok(value) if !value.trim().is_empty() => Self::parse_value(name, &value),
            _ => Ok(default),
        }
    }

    fn parse_value<T: FromStr>(name: &str, value: &str) -> Result<T, FreshError> {
        value.trim().parse().map_err(|_| {
            FreshError::invalid_config(format!("{} has an invalid value: {:?}", name, value))
        })
    }

    /// Validates and normalizes the instance root URL.
    fn validate_domain(url: String) -> Result<String, FreshError> {
        let url = url.trim().trim_end_matches('/').to_string();

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(FreshError::invalid_config(
                "FRESHSERVICE_DOMAIN must start with http:// or https://",
            ));
        }

        Url::parse(&url).map_err(|e| {
            FreshError::invalid_config(format!("FRESHSERVICE_DOMAIN is not a valid URL: {}", e))
        })?;

        Ok(url)
    }

    /// Validates the API key is not empty or a placeholder value.
    fn validate_api_key(key: &str) -> Result<(), FreshError> {
        if key.trim().is_empty() {
            return Err(FreshError::missing_env("FRESHSERVICE_API_KEY"));
        }

        let key_lower = key.to_lowercase();
        let placeholder_patterns = ["your_api_key", "your_key", "placeholder", "changeme", "####"];

        for pattern in placeholder_patterns {
            if key_lower.contains(pattern) {
                return Err(FreshError::invalid_config(
                    "FRESHSERVICE_API_KEY appears to be a placeholder value",
                ));
            }
        }

        Ok(())
    }
}
