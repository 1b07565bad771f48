//! User profile, settings, import and API token endpoints

use super::NO_BODY;
use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::response::{ApiResponse, NoData};
use crate::url::paths;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// User API interface
#[derive(Clone, Copy)]
pub struct UsersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UsersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// GET /api/v1/users/{id}
    pub async fn get_user(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<GetUser>> {
        self.client
            .request(&paths::get_user(id), Method::GET, NO_BODY, options)
            .await
    }

    /// GET /api/v1/users/{id}/stats
    pub async fn get_user_stats(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<GetUserStats>> {
        self.client
            .request(&paths::get_user_stats(id), Method::GET, NO_BODY, options)
            .await
    }

    /// PATCH /api/v1/user/settings
    pub async fn update_user_settings(
        &self,
        body: &UpdateUserSettingsBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::update_user_settings(), Method::PATCH, Some(body), options)
            .await
    }

    /// Queue an import of a MyAnimeList user's anime list
    ///
    /// POST /api/v1/users/import/mal/{username}/anime
    pub async fn import_mal_anime_list(
        &self,
        username: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::import_mal_anime_list(username), Method::POST, NO_BODY, options)
            .await
    }
}

/// API token interface
#[derive(Clone, Copy)]
pub struct TokensApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TokensApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// POST /api/v1/user/apitoken
    pub async fn create_api_token(
        &self,
        body: &CreateApiTokenBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<CreateApiToken>> {
        self.client
            .request(&paths::create_api_token(), Method::POST, Some(body), options)
            .await
    }

    /// GET /api/v1/user/apitoken
    pub async fn get_all_api_tokens(
        &self,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<GetAllApiTokens>> {
        self.client
            .request(&paths::get_all_api_tokens(), Method::GET, NO_BODY, options)
            .await
    }

    /// DELETE /api/v1/user/apitoken/{id}
    pub async fn delete_api_token(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::delete_api_token(id), Method::DELETE, NO_BODY, options)
            .await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Public profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetUser {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Per-user statistics.
///
/// The backend's stat set grows over time, so it is kept as named values
/// rather than a fixed struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetUserStats {
    #[serde(flatten)]
    pub stats: BTreeMap<String, Value>,
}

impl GetUserStats {
    /// Look up a numeric stat
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        self.stats.get(name).and_then(Value::as_f64)
    }
}

/// Settings update; absent fields stay unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserSettingsBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Token creation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateApiTokenBody {
    pub name: String,
}

/// Token creation response; the secret is only shown once
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateApiToken {
    pub token: String,
}

/// Token listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiToken {
    pub id: String,
    pub name: String,
}

/// Token listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetAllApiTokens {
    pub tokens: Vec<ApiToken>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_body_skips_unset_fields() {
        let json = serde_json::to_value(UpdateUserSettingsBody::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_user_stats_keep_every_field() {
        let stats: GetUserStats =
            serde_json::from_str(r#"{"completedMedia": 12, "watchTimeMinutes": 3400.5}"#).unwrap();
        assert_eq!(stats.number("completedMedia"), Some(12.0));
        assert_eq!(stats.stats.len(), 2);
        assert!(stats.number("missing").is_none());
    }
}
