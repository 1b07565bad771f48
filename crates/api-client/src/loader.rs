//! Fetch-validate-unwrap helpers for page loaders and form actions
//!
//! A loader calls a typed operation and needs its data or a page-level
//! error. A form action additionally turns known failure types into field
//! errors and lets everything else fall through to the error page.

use crate::error::{ApiError, ApiResult};
use crate::response::{ApiFailure, ApiResponse};
use reqwest::StatusCode;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;

/// Message shown when the backend could not be reached or misbehaved
pub const BACKEND_UNAVAILABLE: &str = "Failed to communicate with api server";

/// Error that replaces the page with an error view
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {message}")]
pub struct PageError {
    /// HTTP status to render with
    pub status: StatusCode,
    /// Message for the user
    pub message: String,
    /// Backend error type, when the error came from a failure envelope
    pub kind: Option<String>,
}

impl PageError {
    /// Create a page error without a backend type
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            kind: None,
        }
    }

    /// Carry a failure envelope's code, message and type
    pub fn from_failure<E>(failure: &ApiFailure<E>) -> Self {
        let status = u16::try_from(failure.code)
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        Self {
            status,
            message: failure.message.clone(),
            kind: Some(failure.kind.clone()),
        }
    }
}

impl From<ApiError> for PageError {
    fn from(err: ApiError) -> Self {
        warn!(error = %err, "API call failed before producing an envelope");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, BACKEND_UNAVAILABLE)
    }
}

/// Redirect response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// 301, 302 or 303
    pub status: StatusCode,
    /// Target path
    pub location: String,
}

impl Redirect {
    /// 301
    pub fn moved_permanently(location: impl Into<String>) -> Self {
        Self {
            status: StatusCode::MOVED_PERMANENTLY,
            location: location.into(),
        }
    }

    /// 302
    pub fn found(location: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FOUND,
            location: location.into(),
        }
    }

    /// 303
    pub fn see_other(location: impl Into<String>) -> Self {
        Self {
            status: StatusCode::SEE_OTHER,
            location: location.into(),
        }
    }
}

/// Field-level messages for a rejected form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, String>,
}

impl FormErrors {
    /// No errors
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field's message; empty messages are ignored
    pub fn set(&mut self, field: impl Into<String>, message: impl Into<String>) -> &mut Self {
        let message = message.into();
        if !message.is_empty() {
            self.fields.insert(field.into(), message);
        }
        self
    }

    /// Builder form of [`set`](Self::set)
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, message: impl Into<String>) -> Self {
        self.set(field, message);
        self
    }

    /// Message for one field
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// All messages by field
    #[must_use]
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    /// Whether no field carries a message
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Status a rejected form is answered with
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

/// Result of a form action that reached the backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome<T> {
    /// The operation succeeded
    Success(T),
    /// The backend rejected the input; show these messages
    Invalid(FormErrors),
}

/// Data of a successful envelope, or a page error carrying the failure.
pub fn unwrap_page<T, E>(response: ApiResponse<T, E>) -> Result<T, PageError> {
    match response {
        ApiResponse::Success(data) => Ok(data),
        ApiResponse::Failure(failure) => Err(PageError::from_failure(&failure)),
    }
}

/// [`unwrap_page`] for a call that may also have failed in transport.
pub fn page_data<T, E>(result: ApiResult<ApiResponse<T, E>>) -> Result<T, PageError> {
    unwrap_page(result?)
}

/// Unwrap a form action's envelope.
///
/// `strategy` maps known failures to field errors; returning `None` sends the
/// failure to the error page instead.
pub fn unwrap_form<T, E, F>(response: ApiResponse<T, E>, strategy: F) -> Result<FormOutcome<T>, PageError>
where
    F: FnOnce(&ApiFailure<E>) -> Option<FormErrors>,
{
    match response {
        ApiResponse::Success(data) => Ok(FormOutcome::Success(data)),
        ApiResponse::Failure(failure) => match strategy(&failure) {
            Some(errors) => Ok(FormOutcome::Invalid(errors)),
            None => Err(PageError::from_failure(&failure)),
        },
    }
}

/// Upper-case the first character
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::error_types;
    use serde_json::Value;

    fn failure(code: i64, kind: &str) -> ApiResponse<String> {
        ApiResponse::Failure(ApiFailure {
            code,
            message: "Something went wrong".to_string(),
            kind: kind.to_string(),
            extra: Value::Null,
        })
    }

    #[test]
    fn test_unwrap_page_passes_data_through() {
        let data = unwrap_page::<_, Value>(ApiResponse::Success(7)).unwrap();
        assert_eq!(data, 7);
    }

    #[test]
    fn test_unwrap_page_keeps_backend_code() {
        let err = unwrap_page(failure(404, "MEDIA_NOT_FOUND")).unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.message, "Something went wrong");
        assert_eq!(err.kind.as_deref(), Some("MEDIA_NOT_FOUND"));
    }

    #[test]
    fn test_out_of_range_code_becomes_500() {
        assert_eq!(
            unwrap_page(failure(0, "UNKNOWN")).unwrap_err().status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            unwrap_page(failure(200, "UNKNOWN")).unwrap_err().status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_transport_error_becomes_generic_page_error() {
        let err: PageError = ApiError::invalid_filter("x").into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, BACKEND_UNAVAILABLE);
        assert!(err.kind.is_none());
    }

    #[test]
    fn test_unwrap_form_strategy() {
        let strategy = |f: &ApiFailure<Value>| {
            f.is(error_types::INVALID_CREDENTIALS)
                .then(|| FormErrors::new().with("password", "Invalid credentials"))
        };

        match unwrap_form(failure(401, error_types::INVALID_CREDENTIALS), strategy).unwrap() {
            FormOutcome::Invalid(errors) => {
                assert_eq!(errors.get("password"), Some("Invalid credentials"));
                assert_eq!(errors.status(), StatusCode::BAD_REQUEST);
            }
            FormOutcome::Success(_) => panic!("expected field errors"),
        }

        let err = unwrap_form(failure(500, "DATABASE"), strategy).unwrap_err();
        assert_eq!(err.kind.as_deref(), Some("DATABASE"));
    }

    #[test]
    fn test_form_errors_skip_empty_messages() {
        let errors = FormErrors::new().with("username", "").with("password", "Too short");
        assert!(errors.get("username").is_none());
        assert_eq!(errors.fields().len(), 1);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("cannot be blank"), "Cannot be blank");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("ärger"), "Ärger");
    }
}
