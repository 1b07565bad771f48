//! Media catalog endpoints
//!
//! Covers catalog CRUD plus the per-media sub-resources: parts, the signed-in
//! user's list data and the release schedule.

use super::NO_BODY;
use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::facets::{MediaRating, MediaStatus, MediaType, MediaUserList, ReleaseType};
use crate::response::{ApiResponse, NoData};
use crate::types::{Created, MediaPart, MediaRelease, MediaUser, Page, ProviderValue};
use crate::url::paths;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Media API interface
#[derive(Clone, Copy)]
pub struct MediaApi<'a> {
    client: &'a ApiClient,
}

impl<'a> MediaApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List media; filter, sort and page travel as query parameters
    ///
    /// GET /api/v1/media
    pub async fn get_media(
        &self,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<GetMedia>> {
        self.client
            .request(&paths::get_media(), Method::GET, NO_BODY, options)
            .await
    }

    /// GET /api/v1/media/{id}
    pub async fn get_media_by_id(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<Media>> {
        self.client
            .request(&paths::get_media_by_id(id), Method::GET, NO_BODY, options)
            .await
    }

    /// POST /api/v1/media
    pub async fn create_media(
        &self,
        body: &CreateMediaBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<Created>> {
        self.client
            .request(&paths::create_media(), Method::POST, Some(body), options)
            .await
    }

    /// PATCH /api/v1/media/{id}
    pub async fn edit_media(
        &self,
        id: &str,
        body: &EditMediaBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::edit_media(id), Method::PATCH, Some(body), options)
            .await
    }

    /// DELETE /api/v1/media/{id}
    pub async fn delete_media(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::delete_media(id), Method::DELETE, NO_BODY, options)
            .await
    }

    /// GET /api/v1/media/{id}/parts
    pub async fn get_media_parts(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<GetMediaParts>> {
        self.client
            .request(&paths::get_media_parts(id), Method::GET, NO_BODY, options)
            .await
    }

    /// Insert one part at an index
    ///
    /// POST /api/v1/media/{id}/single/parts
    pub async fn add_part(
        &self,
        id: &str,
        body: &AddPartBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<AddPart>> {
        self.client
            .request(&paths::add_part(id), Method::POST, Some(body), options)
            .await
    }

    /// PATCH /api/v1/media/{id}/parts/{index}
    pub async fn edit_part(
        &self,
        id: &str,
        index: i64,
        body: &EditPartBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        let path = paths::edit_part(id, &index.to_string());
        self.client
            .request(&path, Method::PATCH, Some(body), options)
            .await
    }

    /// DELETE /api/v1/media/{id}/parts/{index}
    pub async fn remove_part(
        &self,
        id: &str,
        index: i64,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        let path = paths::remove_part(id, &index.to_string());
        self.client
            .request(&path, Method::DELETE, NO_BODY, options)
            .await
    }

    /// Replace every part in one call
    ///
    /// POST /api/v1/media/{id}/parts
    pub async fn set_parts(
        &self,
        id: &str,
        body: &SetPartsBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::set_parts(id), Method::POST, Some(body), options)
            .await
    }

    /// POST /api/v1/media/{id}/user
    pub async fn set_media_user_data(
        &self,
        id: &str,
        body: &SetMediaUserData,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::set_media_user_data(id), Method::POST, Some(body), options)
            .await
    }

    /// DELETE /api/v1/media/{id}/user
    pub async fn delete_media_user_data(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::delete_media_user_data(id), Method::DELETE, NO_BODY, options)
            .await
    }

    /// POST /api/v1/media/{id}/release
    pub async fn set_media_release(
        &self,
        id: &str,
        body: &SetMediaReleaseBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::set_media_release(id), Method::POST, Some(body), options)
            .await
    }

    /// DELETE /api/v1/media/{id}/release
    pub async fn delete_media_release(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::delete_media_release(id), Method::DELETE, NO_BODY, options)
            .await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Media entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub media_type: MediaType,
    pub score: Option<f64>,
    pub status: MediaStatus,
    pub rating: MediaRating,
    pub part_count: i64,
    pub airing_season: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub creators: Vec<String>,
    pub tags: Vec<String>,
    pub cover_url: Option<String>,
    pub banner_url: Option<String>,
    pub logo_url: Option<String>,
    pub providers: Vec<ProviderValue>,
    /// Present only for authenticated requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<MediaUser>,
    pub release: Option<MediaRelease>,
}

/// Page of media
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetMedia {
    pub page: Page,
    pub media: Vec<Media>,
}

/// Parts of one media entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetMediaParts {
    pub parts: Vec<MediaPart>,
}

/// New media entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMediaBody {
    pub media_type: MediaType,
    pub title: String,
    pub description: String,
    pub score: f64,
    pub status: MediaStatus,
    pub rating: MediaRating,
    pub airing_season: String,
    pub start_date: String,
    pub end_date: String,
    pub part_count: i64,
    pub cover_url: String,
    pub banner_url: String,
    pub logo_url: String,
    pub tags: Vec<String>,
    pub creators: Vec<String>,
    /// Attach to an existing collection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
    /// Name of the entry inside that collection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
}

impl CreateMediaBody {
    /// Minimal body; every other field starts empty
    pub fn new(media_type: MediaType, title: impl Into<String>) -> Self {
        Self {
            media_type,
            title: title.into(),
            description: String::new(),
            score: 0.0,
            status: MediaStatus::Unknown,
            rating: MediaRating::Unknown,
            airing_season: String::new(),
            start_date: String::new(),
            end_date: String::new(),
            part_count: 0,
            cover_url: String::new(),
            banner_url: String::new(),
            logo_url: String::new(),
            tags: Vec::new(),
            creators: Vec::new(),
            collection_id: None,
            collection_name: None,
        }
    }
}

/// Media edit; absent fields stay unchanged
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditMediaBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<MediaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MediaStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<MediaRating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airing_season: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creators: Option<Vec<String>>,
}

/// Index assigned to an inserted part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddPart {
    pub index: i64,
}

/// Part insertion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddPartBody {
    pub index: i64,
    pub name: String,
}

/// Part rename
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditPartBody {
    pub name: Option<String>,
}

/// One entry of [`SetPartsBody`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartBody {
    pub name: String,
}

/// Full part list, indexed by position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetPartsBody {
    pub parts: Vec<PartBody>,
}

/// User list update; absent fields stay unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetMediaUserData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<MediaUserList>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_part: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revisit_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_revisiting: Option<bool>,
}

/// Release schedule for a media entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetMediaReleaseBody {
    pub media_id: String,
    pub release_type: ReleaseType,
    pub start_date: String,
    pub num_expected_parts: i64,
    pub interval_days: i64,
    pub delay_days: i64,
}
