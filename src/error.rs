//! Error types for the Freshservice client.
//!
//! This module defines `FreshError`, the unified error type returned by every
//! verb primitive, resource operation and sync workflow.
//!
//! Status-derived variants render as `"<code> Error: ..."` so the numeric
//! status is always the first thing an operator sees.
//!
//! # Security
//!
//! API keys must never appear in logs or error output. Use
//! `sanitize_message()` on any text that originated outside this crate.

use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/// Unified error type for all Freshservice operations.
#[derive(Error, Debug)]
pub enum FreshError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Request timed out.
    #[error("request timed out after {duration:?} - the server may be slow or unreachable")]
    Timeout {
        /// How long we waited before timing out.
        duration: Duration,
        /// The operation that timed out.
        operation: String,
    },

    /// Authentication or authorization failed (HTTP 401/403).
    #[error("{} Error: authentication failed - check FRESHSERVICE_API_KEY", .status.as_u16())]
    Authentication {
        /// The status code returned.
        status: StatusCode,
    },

    /// Requested resource was not found (HTTP 404).
    #[error("404 Error: not found: {resource}")]
    NotFound {
        /// The resource that was requested.
        resource: String,
    },

    /// Rate limited by the server (HTTP 429).
    #[error("429 Error: rate limited by server - please wait before retrying")]
    RateLimited {
        /// Suggested retry delay, if provided by server.
        retry_after: Option<Duration>,
    },

    /// Server-side failure (HTTP 5xx).
    #[error("{} Error: server error", .status.as_u16())]
    Server {
        /// The specific status code.
        status: StatusCode,
    },

    /// Any other status outside the verb's success set.
    #[error("{} Error: {body}", .status.as_u16())]
    UnexpectedStatus {
        /// The HTTP status code returned.
        status: StatusCode,
        /// The response body, potentially containing error details.
        body: String,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The response body did not carry the expected envelope key.
    #[error("response is missing the `{key}` key")]
    MissingKey {
        /// The key that was expected at the top level of the body.
        key: String,
    },

    /// Input validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// A `link` header was present but carried no `<...>` URI.
    #[error("malformed link header: {value}")]
    InvalidLinkHeader {
        /// The raw header value.
        value: String,
    },

    /// Pagination did not terminate within the configured page budget.
    #[error("pagination stopped after {limit} pages without reaching the last page")]
    PageLimitExceeded {
        /// The page budget that was exhausted.
        limit: u32,
    },

    /// Reading a local file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FreshError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        FreshError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        FreshError::Config(message.into())
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        FreshError::Validation(message.into())
    }

    /// Creates a not found error for a resource.
    pub fn not_found(resource: impl Into<String>) -> Self {
        FreshError::NotFound {
            resource: resource.into(),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(duration: Duration, operation: impl Into<String>) -> Self {
        FreshError::Timeout {
            duration,
            operation: operation.into(),
        }
    }

    /// Creates a missing envelope key error.
    pub fn missing_key(key: impl Into<String>) -> Self {
        FreshError::MissingKey { key: key.into() }
    }

    /// Classifies a status code that fell outside a verb's success set.
    ///
    /// `resource` names what was requested and is only used for 404s.
    pub fn from_status(
        status: StatusCode,
        resource: impl Into<String>,
        body: String,
        retry_after: Option<Duration>,
    ) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                FreshError::Authentication { status }
            }
            StatusCode::NOT_FOUND => FreshError::not_found(resource),
            StatusCode::TOO_MANY_REQUESTS => FreshError::RateLimited { retry_after },
            s if s.is_server_error() => FreshError::Server { status },
            _ => FreshError::UnexpectedStatus { status, body },
        }
    }

    /// Returns the HTTP status this error was classified from, if any.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FreshError::Authentication { status }
            | FreshError::Server { status }
            | FreshError::UnexpectedStatus { status, .. } => Some(*status),
            FreshError::NotFound { .. } => Some(StatusCode::NOT_FOUND),
            FreshError::RateLimited { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            FreshError::Http(e) => e.status(),
            _ => None,
        }
    }

    /// Returns true if this error is transient and the operation could be retried.
    ///
    /// The client itself never retries; this exists so callers driving a
    /// batch can choose between retrying, skipping and aborting.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            FreshError::RateLimited { .. } => true,
            FreshError::Server { .. } => true,
            FreshError::Timeout { .. } => true,
            FreshError::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }

    /// Returns true if this is a rate limit error.
    #[must_use]
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, FreshError::RateLimited { .. })
    }

    /// Returns true if continuing a batch is pointless after this error.
    #[must_use]
    pub fn is_fatal_for_batch(&self) -> bool {
        matches!(
            self,
            FreshError::Authentication { .. } | FreshError::Config(_) | FreshError::HttpClient(_)
        )
    }

    /// Returns the suggested delay before retry, if the server sent one.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            FreshError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }

    /// Sanitizes an error message to remove any occurrence of the API key.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to sanitize
    /// * `api_key` - The API key to strip from the message
    ///
    /// # Returns
    ///
    /// The message with any occurrence of the API key replaced with `[REDACTED]`
    #[must_use]
    pub fn sanitize_message(message: &str, api_key: &str) -> String {
        if api_key.is_empty() {
            return message.to_string();
        }
        message.replace(api_key, "[REDACTED]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_error() {
        let err = FreshError::missing_env("FRESHSERVICE_API_KEY");
        assert!(err.to_string().contains("FRESHSERVICE_API_KEY"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_validation_error() {
        let err = FreshError::validation("email or id is required");
        assert_eq!(err.to_string(), "validation error: email or id is required");
    }

    #[test]
    fn test_status_errors_lead_with_code() {
        let err = FreshError::from_status(StatusCode::UNAUTHORIZED, "/tickets", String::new(), None);
        assert!(err.to_string().starts_with("401 Error"));

        let err = FreshError::from_status(StatusCode::NOT_FOUND, "/tickets/9", String::new(), None);
        assert_eq!(err.to_string(), "404 Error: not found: /tickets/9");

        let err = FreshError::from_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            "/tickets",
            "bad field".to_string(),
            None,
        );
        assert_eq!(err.to_string(), "422 Error: bad field");
    }

    #[test]
    fn test_from_status_classification() {
        let classify = |code: u16| {
            FreshError::from_status(
                StatusCode::from_u16(code).unwrap(),
                "/x",
                String::new(),
                None,
            )
        };

        assert!(matches!(classify(401), FreshError::Authentication { .. }));
        assert!(matches!(classify(403), FreshError::Authentication { .. }));
        assert!(matches!(classify(404), FreshError::NotFound { .. }));
        assert!(matches!(classify(429), FreshError::RateLimited { .. }));
        assert!(matches!(classify(500), FreshError::Server { .. }));
        assert!(matches!(classify(503), FreshError::Server { .. }));
        assert!(matches!(classify(400), FreshError::UnexpectedStatus { .. }));
        assert!(matches!(classify(201), FreshError::UnexpectedStatus { .. }));
    }

    #[test]
    fn test_status_accessor() {
        let err = FreshError::RateLimited { retry_after: None };
        assert_eq!(err.status(), Some(StatusCode::TOO_MANY_REQUESTS));
        assert_eq!(FreshError::validation("x").status(), None);
    }

    #[test]
    fn test_is_retryable() {
        assert!(FreshError::RateLimited { retry_after: None }.is_retryable());
        assert!(FreshError::Server {
            status: StatusCode::BAD_GATEWAY
        }
        .is_retryable());
        assert!(!FreshError::not_found("x").is_retryable());
        assert!(!FreshError::validation("x").is_retryable());
    }

    #[test]
    fn test_is_fatal_for_batch() {
        assert!(FreshError::Authentication {
            status: StatusCode::UNAUTHORIZED
        }
        .is_fatal_for_batch());
        assert!(!FreshError::not_found("x").is_fatal_for_batch());
    }

    #[test]
    fn test_retry_after_rate_limited() {
        let err = FreshError::RateLimited {
            retry_after: Some(Duration::from_secs(5)),
        };
        assert_eq!(err.retry_after(), Some(Duration::from_secs(5)));
        assert!(err.is_rate_limit());
    }

    #[test]
    fn test_sanitize_message_removes_api_key() {
        let api_key = "super_secret_key_12345";
        let message = format!("Error connecting with key {} to server", api_key);
        let sanitized = FreshError::sanitize_message(&message, api_key);
        assert!(!sanitized.contains(api_key));
        assert!(sanitized.contains("[REDACTED]"));
    }

    #[test]
    fn test_sanitize_message_empty_key() {
        let message = "Some error message";
        let sanitized = FreshError::sanitize_message(message, "");
        assert_eq!(sanitized, message);
    }

    #[test]
    fn test_page_limit_message() {
        let err = FreshError::PageLimitExceeded { limit: 3 };
        assert!(err.to_string().contains("3 pages"));
    }
}
