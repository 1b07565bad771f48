//! The response envelope every JSON endpoint answers with
//!
//! On the wire:
//!
//! ```json
//! { "success": true,  "data": { ... } }
//! { "success": false, "error": { "code": 404, "message": "...", "type": "...", "extra": ... } }
//! ```
//!
//! Deserializing into [`ApiResponse`] is the schema check: the `success`
//! flag picks the variant, then the matching payload must deserialize into
//! the operation's data type (or error-extra type). Anything else is
//! rejected and surfaces as
//! [`ApiError::ResponseSchemaMismatch`](crate::error::ApiError::ResponseSchemaMismatch).

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Discriminated result of one API call.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse<T, E = Value> {
    /// `success: true`
    Success(T),
    /// `success: false`
    Failure(ApiFailure<E>),
}

/// Error body of a failed call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiFailure<E = Value> {
    /// Numeric code, usually the HTTP status
    pub code: i64,
    /// Human readable message
    pub message: String,
    /// Machine readable error type, e.g. `INVALID_CREDENTIALS`
    #[serde(rename = "type")]
    pub kind: String,
    /// Per-operation extra payload
    pub extra: E,
}

/// Payload type for operations that answer without data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoData;

impl<'de> Deserialize<'de> for NoData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Null => Ok(NoData),
            other => Err(de::Error::custom(format!(
                "expected no data, found {}",
                value_kind(&other)
            ))),
        }
    }
}

impl Serialize for NoData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_unit()
    }
}

/// Error type codes the backend is known to emit
pub mod error_types {
    /// Request body failed validation; `extra` maps field names to messages
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    /// Missing or rejected bearer token
    pub const INVALID_AUTH: &str = "INVALID_AUTH";
    /// Sign-up with a taken username
    pub const USER_ALREADY_EXISTS: &str = "USER_ALREADY_EXISTS";
    /// Sign-in with an unknown username
    pub const USER_NOT_FOUND: &str = "USER_NOT_FOUND";
    /// Sign-in with a wrong password
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    /// Unknown API token id
    pub const API_TOKEN_NOT_FOUND: &str = "API_TOKEN_NOT_FOUND";
}

impl<T, E> ApiResponse<T, E> {
    /// Whether the backend reported success
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Convert into a `Result`, failure envelope as the error
    pub fn into_result(self) -> Result<T, ApiFailure<E>> {
        match self {
            Self::Success(data) => Ok(data),
            Self::Failure(failure) => Err(failure),
        }
    }

    /// Borrow the data of a successful response
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            Self::Failure(_) => None,
        }
    }

    /// Borrow the error of a failed response
    pub fn failure(&self) -> Option<&ApiFailure<E>> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(failure),
        }
    }

    /// Map the success payload
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U, E> {
        match self {
            Self::Success(data) => ApiResponse::Success(f(data)),
            Self::Failure(failure) => ApiResponse::Failure(failure),
        }
    }
}

impl<E> ApiFailure<E> {
    /// Whether this failure carries the given error type
    #[must_use]
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }
}

impl<'de, T, E> Deserialize<'de> for ApiResponse<T, E>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let Value::Object(mut object) = Value::deserialize(deserializer)? else {
            return Err(de::Error::custom("response envelope must be a JSON object"));
        };

        let success = match object.get("success") {
            Some(Value::Bool(flag)) => *flag,
            Some(other) => {
                return Err(de::Error::custom(format!(
                    "`success` must be a boolean, found {}",
                    value_kind(other)
                )));
            }
            None => return Err(de::Error::missing_field("success")),
        };

        if success {
            if object.get("error").is_some_and(|e| !e.is_null()) {
                return Err(de::Error::custom("successful response must not carry `error`"));
            }
            let data = object.remove("data").unwrap_or(Value::Null);
            T::deserialize(data)
                .map(ApiResponse::Success)
                .map_err(|e| de::Error::custom(format!("invalid `data`: {e}")))
        } else {
            let error = object
                .remove("error")
                .ok_or_else(|| de::Error::missing_field("error"))?;
            let Value::Object(mut error) = error else {
                return Err(de::Error::custom("`error` must be a JSON object"));
            };
            // `extra` is optional on the wire; an absent value is checked as null
            error.entry("extra").or_insert(Value::Null);
            ApiFailure::<E>::deserialize(Value::Object(error))
                .map(ApiResponse::Failure)
                .map_err(|e| de::Error::custom(format!("invalid `error`: {e}")))
        }
    }
}

impl<T: Serialize, E: Serialize> Serialize for ApiResponse<T, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ApiResponse", 2)?;
        match self {
            Self::Success(data) => {
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
            }
            Self::Failure(failure) => {
                state.serialize_field("success", &false)?;
                state.serialize_field("error", failure)?;
            }
        }
        state.end()
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Signin {
        token: String,
    }

    #[test]
    fn test_success_envelope() {
        let res: ApiResponse<Signin> =
            serde_json::from_value(json!({"success": true, "data": {"token": "abc"}})).unwrap();
        assert!(res.is_success());
        assert_eq!(res.data().unwrap().token, "abc");
        assert!(res.failure().is_none());
    }

    #[test]
    fn test_failure_envelope() {
        let res: ApiResponse<Signin> = serde_json::from_value(json!({
            "success": false,
            "error": {"code": 401, "message": "Invalid Credentials", "type": "INVALID_CREDENTIALS"}
        }))
        .unwrap();

        let failure = res.failure().unwrap();
        assert_eq!(failure.code, 401);
        assert!(failure.is(error_types::INVALID_CREDENTIALS));
        assert_eq!(failure.extra, Value::Null);
        assert!(res.data().is_none());
    }

    #[test]
    fn test_failure_ignores_stray_data_field() {
        let res: ApiResponse<Signin> = serde_json::from_value(json!({
            "success": false,
            "data": {"token": "leaked"},
            "error": {"code": 500, "message": "boom", "type": "UNKNOWN", "extra": null}
        }))
        .unwrap();
        assert!(res.data().is_none());
    }

    #[test]
    fn test_typed_error_extra() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Fields {
            username: Option<String>,
        }

        let res: ApiResponse<Signin, Fields> = serde_json::from_value(json!({
            "success": false,
            "error": {
                "code": 400,
                "message": "Validation",
                "type": "VALIDATION_ERROR",
                "extra": {"username": "cannot be blank"}
            }
        }))
        .unwrap();
        let failure = res.into_result().unwrap_err();
        assert_eq!(failure.extra.username.as_deref(), Some("cannot be blank"));
    }

    #[test]
    fn test_schema_mismatches_are_rejected() {
        let cases = [
            json!([]),
            json!({"data": {"token": "abc"}}),
            json!({"success": "yes", "data": {"token": "abc"}}),
            json!({"success": true, "data": {"token": 42}}),
            json!({"success": true}),
            json!({"success": false}),
            json!({
                "success": true,
                "data": {"token": "abc"},
                "error": {"code": 400, "message": "m", "type": "t"}
            }),
            json!({"success": false, "error": {"code": "x", "message": "m", "type": "t"}}),
        ];
        for case in cases {
            let parsed = serde_json::from_value::<ApiResponse<Signin>>(case.clone());
            assert!(parsed.is_err(), "accepted {case}");
        }
    }

    #[test]
    fn test_no_data_accepts_missing_or_null() {
        let a: ApiResponse<NoData> = serde_json::from_value(json!({"success": true})).unwrap();
        let b: ApiResponse<NoData> =
            serde_json::from_value(json!({"success": true, "data": null})).unwrap();
        assert_eq!(a, ApiResponse::Success(NoData));
        assert_eq!(b, ApiResponse::Success(NoData));

        let c = serde_json::from_value::<ApiResponse<NoData>>(json!({"success": true, "data": {}}));
        assert!(c.is_err());
    }

    #[test]
    fn test_serialized_envelope_reads_back_equal() {
        let original: ApiResponse<Signin> = ApiResponse::Success(Signin {
            token: "t0k3n".to_string(),
        });
        let wire = serde_json::to_value(&original).unwrap();
        assert_eq!(wire, json!({"success": true, "data": {"token": "t0k3n"}}));

        let back: ApiResponse<Signin> = serde_json::from_value(wire).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_map_keeps_failure() {
        let res: ApiResponse<u32> = ApiResponse::Failure(ApiFailure {
            code: 404,
            message: "Not found".to_string(),
            kind: "NOT_FOUND".to_string(),
            extra: Value::Null,
        });
        let mapped = res.map(|n| n + 1);
        assert_eq!(mapped.failure().unwrap().code, 404);
    }
}
