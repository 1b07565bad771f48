//! Error types for the API client
//!
//! Only conditions that make a response unusable live here. A backend that
//! answers with `success: false` is not an error at this level; it arrives as
//! the failure variant of [`ApiResponse`](crate::response::ApiResponse).

use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// The configured base address is not an absolute http(s) URL
    #[error("Invalid base address: {0}")]
    InvalidBaseAddress(String),

    /// A path identifier would be read as a relative path step
    #[error("Invalid path identifier `{0}`")]
    InvalidPathIdentifier(String),

    /// Transport-level failure (DNS, connection refused, timeout)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The response body was not valid JSON
    #[error("Malformed response body: {0}")]
    MalformedResponseBody(#[source] serde_json::Error),

    /// The response body was JSON but did not match the expected envelope
    #[error("Response does not match the expected schema: {0}")]
    ResponseSchemaMismatch(#[source] serde_json::Error),

    /// A request body could not be serialized
    #[error("Failed to serialize request body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// A header name or value could not be encoded
    #[error("Invalid header {name}: {reason}")]
    InvalidHeader {
        /// Header name as supplied
        name: String,
        /// Why it was rejected
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A listing filter could not be parsed from page parameters
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// A stored session could not be decoded
    #[error("Invalid session: {0}")]
    InvalidSession(String),
}

impl ApiError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid filter error
    pub fn invalid_filter(msg: impl Into<String>) -> Self {
        Self::InvalidFilter(msg.into())
    }

    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if the request never produced a response
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Request(_))
    }

    /// Check if the backend answered with something outside the contract
    #[must_use]
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::MalformedResponseBody(_) | Self::ResponseSchemaMismatch(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_violation_classification() {
        let malformed = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::MalformedResponseBody(malformed);
        assert!(err.is_contract_violation());
        assert!(!err.is_transport());

        let err = ApiError::config("base_url cannot be empty");
        assert!(!err.is_contract_violation());
        assert_eq!(err.to_string(), "Configuration error: base_url cannot be empty");
    }

    #[test]
    fn test_invalid_header_message() {
        let err = ApiError::invalid_header("Authorization", "contains a newline");
        assert_eq!(
            err.to_string(),
            "Invalid header Authorization: contains a newline"
        );
    }
}
