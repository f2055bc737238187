//! Error types for Perma API operations.

use thiserror::Error;

/// Errors that can occur during Perma API operations.
#[derive(Debug, Error)]
pub enum PermaError {
    /// Configuration is missing or incomplete.
    #[error("Perma configuration required: {0}")]
    ConfigMissing(String),

    /// API key does not match the expected format.
    #[error("invalid API key: expected 40 lowercase alphanumeric characters")]
    InvalidApiKey,

    /// Base URL override is not a well-formed absolute URL.
    #[error("invalid base URL '{0}': expected an absolute URL with a host")]
    InvalidBaseUrl(String),

    /// An authenticated method was called on a client with no API key.
    #[error("this operation requires an API key")]
    AuthRequired,

    /// Archive GUID does not match the `XXXX-XXXX` format.
    #[error("invalid archive GUID '{0}': expected format like 'ABCD-1234'")]
    InvalidArchiveGuid(String),

    /// An identifier that should coerce to an integer did not.
    #[error("invalid {kind} id '{value}': expected an integer")]
    InvalidNumericId {
        kind: &'static str,
        value: String,
    },

    /// Pagination bounds out of range.
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    /// A URL to capture is not well-formed.
    #[error("invalid URL '{0}'")]
    InvalidUrl(String),

    /// The API responded with a non-2xx status.
    ///
    /// `detail` carries the server-provided message when the error body
    /// contained one.
    #[error("HTTP {status}{}", .detail.as_deref().map(|d| format!(" {d}")).unwrap_or_default())]
    Api {
        status: u16,
        detail: Option<String>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl PermaError {
    /// True for errors raised by input validation, before any network call.
    ///
    /// Callers use this to branch between retry-worthy API failures and
    /// caller bugs that will never succeed on retry.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidApiKey
                | Self::InvalidBaseUrl(_)
                | Self::InvalidArchiveGuid(_)
                | Self::InvalidNumericId { .. }
                | Self::InvalidPagination(_)
                | Self::InvalidUrl(_)
        )
    }
}

/// Result type alias for Perma operations.
pub type Result<T> = core::result::Result<T, PermaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_with_detail() {
        let err = PermaError::Api {
            status: 404,
            detail: Some("Not found.".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP 404 Not found.");
    }

    #[test]
    fn test_api_error_display_without_detail() {
        let err = PermaError::Api {
            status: 500,
            detail: None,
        };
        assert_eq!(err.to_string(), "HTTP 500");
    }

    #[test]
    fn test_is_validation() {
        assert!(PermaError::InvalidArchiveGuid("FOO".to_string()).is_validation());
        assert!(PermaError::InvalidPagination("limit".to_string()).is_validation());
        assert!(!PermaError::AuthRequired.is_validation());
        assert!(!PermaError::Api {
            status: 404,
            detail: None
        }
        .is_validation());
    }
}
