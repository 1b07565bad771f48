//! Show, season and season item endpoints

use super::NO_BODY;
use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::facets::{MediaRating, MediaStatus, MediaType, ShowType};
use crate::response::{ApiResponse, NoData};
use crate::types::{Created, MediaPart, MediaRelease, MediaUser, Page, ProviderValue};
use crate::url::paths;
use reqwest::multipart::Form;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Shows API interface
#[derive(Clone, Copy)]
pub struct ShowsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ShowsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// GET /api/v1/shows
    pub async fn get_shows(
        &self,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<GetShows>> {
        self.client
            .request(&paths::get_shows(), Method::GET, NO_BODY, options)
            .await
    }

    /// GET /api/v1/shows/{id}
    pub async fn get_show_by_id(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<Show>> {
        self.client
            .request(&paths::get_show_by_id(id), Method::GET, NO_BODY, options)
            .await
    }

    /// POST /api/v1/shows
    pub async fn create_show(
        &self,
        body: &CreateShowBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<Created>> {
        self.client
            .request(&paths::create_show(), Method::POST, Some(body), options)
            .await
    }

    /// PATCH /api/v1/shows/{id}
    pub async fn edit_show(
        &self,
        id: &str,
        body: &EditShowBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::edit_show(id), Method::PATCH, Some(body), options)
            .await
    }

    /// DELETE /api/v1/shows/{id}
    pub async fn delete_show(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::delete_show(id), Method::DELETE, NO_BODY, options)
            .await
    }

    /// Upload cover, logo or banner images.
    ///
    /// The form carries `cover`, `logo` and/or `banner` file parts.
    ///
    /// PATCH /api/v1/shows/{id}/images
    pub async fn change_show_images(
        &self,
        id: &str,
        form: Form,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request_form(&paths::change_show_images(id), Method::PATCH, form, options)
            .await
    }

    /// GET /api/v1/shows/{id}/seasons
    pub async fn get_show_seasons(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<GetShowSeasons>> {
        self.client
            .request(&paths::get_show_seasons(id), Method::GET, NO_BODY, options)
            .await
    }

    /// POST /api/v1/shows/{id}/seasons
    pub async fn add_show_season(
        &self,
        id: &str,
        body: &AddShowSeasonBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::add_show_season(id), Method::POST, Some(body), options)
            .await
    }

    /// GET /api/v1/shows/{id}/seasons/{num}
    pub async fn get_show_season(
        &self,
        id: &str,
        season_num: i64,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<ShowSeason>> {
        let path = paths::get_show_season(id, &season_num.to_string());
        self.client
            .request(&path, Method::GET, NO_BODY, options)
            .await
    }

    /// PATCH /api/v1/shows/{id}/seasons/{num}
    pub async fn edit_show_season(
        &self,
        id: &str,
        season_num: i64,
        body: &EditShowSeasonBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        let path = paths::edit_show_season(id, &season_num.to_string());
        self.client
            .request(&path, Method::PATCH, Some(body), options)
            .await
    }

    /// DELETE /api/v1/shows/{id}/seasons/{num}
    pub async fn remove_show_season(
        &self,
        id: &str,
        season_num: i64,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        let path = paths::remove_show_season(id, &season_num.to_string());
        self.client
            .request(&path, Method::DELETE, NO_BODY, options)
            .await
    }

    /// Every part of every item in a season, in order
    ///
    /// GET /api/v1/shows/{id}/seasons/{num}/episodes
    pub async fn get_show_season_episodes(
        &self,
        id: &str,
        season_num: i64,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<GetShowSeasonEpisodes>> {
        let path = paths::get_show_season_episodes(id, &season_num.to_string());
        self.client
            .request(&path, Method::GET, NO_BODY, options)
            .await
    }

    /// POST /api/v1/shows/{id}/seasons/{num}/items
    pub async fn add_show_season_item(
        &self,
        id: &str,
        season_num: i64,
        body: &AddShowSeasonItemBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        let path = paths::add_show_season_item(id, &season_num.to_string());
        self.client
            .request(&path, Method::POST, Some(body), options)
            .await
    }

    /// PATCH /api/v1/shows/{id}/seasons/{num}/items/{mediaId}
    pub async fn edit_show_season_item(
        &self,
        id: &str,
        season_num: i64,
        media_id: &str,
        body: &EditShowSeasonItemBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        let path = paths::edit_show_season_item(id, &season_num.to_string(), media_id);
        self.client
            .request(&path, Method::PATCH, Some(body), options)
            .await
    }

    /// DELETE /api/v1/shows/{id}/seasons/{num}/items/{mediaId}
    pub async fn remove_show_season_item(
        &self,
        id: &str,
        season_num: i64,
        media_id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        let path = paths::remove_show_season_item(id, &season_num.to_string(), media_id);
        self.client
            .request(&path, Method::DELETE, NO_BODY, options)
            .await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Show entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    pub id: String,
    #[serde(rename = "type")]
    pub show_type: ShowType,
    pub name: String,
    pub cover_url: Option<String>,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    pub default_provider: Option<String>,
    pub providers: Vec<ProviderValue>,
}

/// Page of shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetShows {
    pub page: Page,
    pub shows: Vec<Show>,
}

/// Season with its items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowSeason {
    pub num: i64,
    pub show_id: String,
    pub name: String,
    pub search_slug: String,
    pub items: Vec<ShowSeasonItem>,
}

/// Media entry placed in a season
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowSeasonItem {
    pub show_season_num: i64,
    pub show_id: String,
    pub media_id: String,
    pub position: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
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
    pub default_provider: Option<String>,
    pub providers: Vec<ProviderValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<MediaUser>,
    pub release: Option<MediaRelease>,
}

/// Seasons of a show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetShowSeasons {
    pub seasons: Vec<ShowSeason>,
}

/// Episodes of a season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetShowSeasonEpisodes {
    pub episodes: Vec<MediaPart>,
}

/// New show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShowBody {
    #[serde(rename = "type")]
    pub show_type: ShowType,
    pub name: String,
    pub cover_url: String,
    pub banner_url: String,
    pub logo_url: String,
}

/// Show edit; absent fields stay unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditShowBody {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub show_type: Option<ShowType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
}

/// New season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddShowSeasonBody {
    pub num: i64,
    pub name: String,
    pub search_slug: String,
}

/// Season edit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditShowSeasonBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_slug: Option<String>,
}

/// Place a media entry in a season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddShowSeasonItemBody {
    pub media_id: String,
    pub position: i64,
}

/// Move a season item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditShowSeasonItemBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_type_field_is_named_type() {
        let show: Show = serde_json::from_str(
            r#"{"id": "s1", "type": "tv-series", "name": "Bluey", "coverUrl": null,
                "logoUrl": null, "bannerUrl": null, "defaultProvider": null, "providers": []}"#,
        )
        .unwrap();
        assert_eq!(show.show_type, ShowType::TvSeries);

        let body = EditShowBody {
            show_type: Some(ShowType::Anime),
            ..EditShowBody::default()
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"type": "anime"})
        );
    }

    #[test]
    fn test_season_episodes_deserialize() {
        let episodes: GetShowSeasonEpisodes = serde_json::from_str(
            r#"{"episodes": [{"index": 1, "mediaId": "m1", "name": "Pilot"}]}"#,
        )
        .unwrap();
        assert_eq!(episodes.episodes[0].name, "Pilot");
    }
}
