//! Release schedule endpoints

use super::NO_BODY;
use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::facets::{MediaRating, MediaStatus, MediaType, ReleaseStatus};
use crate::response::ApiResponse;
use crate::types::{MediaUser, Page};
use crate::url::paths;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Releases API interface
#[derive(Clone, Copy)]
pub struct ReleasesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ReleasesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// GET /api/v1/releases
    pub async fn get_releases(
        &self,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<GetReleases>> {
        self.client
            .request(&paths::get_releases(), Method::GET, NO_BODY, options)
            .await
    }

    /// GET /api/v1/releases/{id}
    pub async fn get_release_by_id(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<Release>> {
        self.client
            .request(&paths::get_release_by_id(id), Method::GET, NO_BODY, options)
            .await
    }
}

/// Scheduled media entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    pub media_id: String,
    pub release_status: ReleaseStatus,
    pub start_date: String,
    pub num_expected_parts: i64,
    pub current_part: i64,
    pub next_airing: String,
    pub interval_days: i64,
    pub delay_days: i64,
    pub title: String,
    pub description: Option<String>,
    pub tmdb_id: String,
    pub imdb_id: String,
    pub mal_id: String,
    pub anilist_id: String,
    pub media_type: MediaType,
    pub score: Option<f64>,
    pub status: MediaStatus,
    pub rating: MediaRating,
    pub part_count: i64,
    pub airing_season: Option<String>,
    pub creators: Vec<String>,
    pub tags: Vec<String>,
    pub cover_url: Option<String>,
    pub banner_url: Option<String>,
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<MediaUser>,
}

/// Page of releases
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetReleases {
    pub page: Page,
    pub releases: Vec<Release>,
}
