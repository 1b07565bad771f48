//! Authentication endpoints

use super::NO_BODY;
use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::response::{ApiResponse, NoData};
use crate::url::paths;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Authentication API interface
#[derive(Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Register a new account
    ///
    /// POST /api/v1/auth/signup
    pub async fn signup(
        &self,
        body: &SignupBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<Signup>> {
        self.client
            .request(&paths::signup(), Method::POST, Some(body), options)
            .await
    }

    /// Exchange credentials for a session token
    ///
    /// POST /api/v1/auth/signin
    pub async fn signin(
        &self,
        body: &SigninBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<Signin>> {
        self.client
            .request(&paths::signin(), Method::POST, Some(body), options)
            .await
    }

    /// PATCH /api/v1/auth/password
    pub async fn change_password(
        &self,
        body: &ChangePasswordBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::change_password(), Method::PATCH, Some(body), options)
            .await
    }

    /// Resolve the user behind the current bearer token
    ///
    /// GET /api/v1/auth/me
    pub async fn get_me(&self, options: Option<&RequestOptions>) -> ApiResult<ApiResponse<GetMe>> {
        self.client
            .request(&paths::get_me(), Method::GET, NO_BODY, options)
            .await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Sign-up request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupBody {
    pub username: String,
    pub password: String,
    pub password_confirm: String,
}

/// Sign-up response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signup {
    pub id: String,
    pub username: String,
}

/// Sign-in request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigninBody {
    pub username: String,
    pub password: String,
}

/// Sign-in response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signin {
    /// Bearer token for later requests
    pub token: String,
}

/// Password change request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordBody {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirm: String,
}

/// Current user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetMe {
    pub id: String,
    pub username: String,
    pub role: String,
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_body_field_names() {
        let body = SignupBody {
            username: "patrik".to_string(),
            password: "hunter22".to_string(),
            password_confirm: "hunter22".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["passwordConfirm"], "hunter22");
    }

    #[test]
    fn test_get_me_deserialize() {
        let json = r#"{"id": "u1", "username": "patrik", "role": "admin", "displayName": "Patrik"}"#;
        let me: GetMe = serde_json::from_str(json).unwrap();
        assert_eq!(me.display_name, "Patrik");
        assert_eq!(me.role, "admin");
    }
}
