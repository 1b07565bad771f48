//! Provider search, import and refresh endpoints
//!
//! A provider is an external metadata source (MyAnimeList, TMDB, ...). Search
//! results carry the provider-side id that the import calls take.

use super::NO_BODY;
use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::response::{ApiResponse, NoData};
use crate::url::paths;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Providers API interface
#[derive(Clone, Copy)]
pub struct ProvidersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProvidersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// GET /api/v1/providers
    pub async fn get_providers(
        &self,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<GetProviders>> {
        self.client
            .request(&paths::get_providers(), Method::GET, NO_BODY, options)
            .await
    }

    /// Search a provider for media; the term goes in the `query` parameter
    ///
    /// GET /api/v1/providers/{name}/media
    pub async fn search_media(
        &self,
        provider_name: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<GetProviderSearch>> {
        self.client
            .request(
                &paths::provider_search_media(provider_name),
                Method::GET,
                NO_BODY,
                options,
            )
            .await
    }

    /// GET /api/v1/providers/{name}/collections
    pub async fn search_collections(
        &self,
        provider_name: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<GetProviderSearch>> {
        self.client
            .request(
                &paths::provider_search_collections(provider_name),
                Method::GET,
                NO_BODY,
                options,
            )
            .await
    }

    /// GET /api/v1/providers/{name}/shows
    pub async fn search_shows(
        &self,
        provider_name: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<GetProviderSearch>> {
        self.client
            .request(
                &paths::provider_search_shows(provider_name),
                Method::GET,
                NO_BODY,
                options,
            )
            .await
    }

    /// POST /api/v1/providers/{name}/media/import
    pub async fn import_media(
        &self,
        provider_name: &str,
        body: &ProviderImportBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(
                &paths::provider_import_media(provider_name),
                Method::POST,
                Some(body),
                options,
            )
            .await
    }

    /// POST /api/v1/providers/{name}/collections/import
    pub async fn import_collections(
        &self,
        provider_name: &str,
        body: &ProviderImportBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(
                &paths::provider_import_collections(provider_name),
                Method::POST,
                Some(body),
                options,
            )
            .await
    }

    /// POST /api/v1/providers/{name}/shows/import
    pub async fn import_shows(
        &self,
        provider_name: &str,
        body: &ProviderImportBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(
                &paths::provider_import_shows(provider_name),
                Method::POST,
                Some(body),
                options,
            )
            .await
    }

    /// Refresh a media entry from its provider
    ///
    /// PATCH /api/v1/providers/{name}/media/{mediaId}
    pub async fn update_media(
        &self,
        provider_name: &str,
        media_id: &str,
        body: &ProviderMediaUpdateBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(
                &paths::provider_update_media(provider_name, media_id),
                Method::PATCH,
                Some(body),
                options,
            )
            .await
    }

    /// PATCH /api/v1/providers/{name}/collections/{collectionId}
    pub async fn update_collection(
        &self,
        provider_name: &str,
        collection_id: &str,
        body: &ProviderCollectionUpdateBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(
                &paths::provider_update_collection(provider_name, collection_id),
                Method::PATCH,
                Some(body),
                options,
            )
            .await
    }

    /// PATCH /api/v1/providers/{name}/collections/{showId}
    pub async fn update_show(
        &self,
        provider_name: &str,
        show_id: &str,
        body: &ProviderCollectionUpdateBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(
                &paths::provider_update_show(provider_name, show_id),
                Method::PATCH,
                Some(body),
                options,
            )
            .await
    }

    /// Retry provider lookups for media with unknown metadata
    ///
    /// POST /api/v1/providers/updateUnknownMedia
    pub async fn update_unknown_media(
        &self,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::provider_update_unknown_media(), Method::POST, NO_BODY, options)
            .await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// What a provider can do
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSupports {
    pub get_media: bool,
    pub search_media: bool,
    pub get_collection: bool,
    pub search_collection: bool,
}

/// Provider entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub name: String,
    pub display_name: String,
    pub supports: ProviderSupports,
}

/// Provider listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetProviders {
    pub providers: Vec<Provider>,
}

/// One search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSearchResult {
    pub provider_name: String,
    pub provider_id: String,
    pub title: String,
    pub image_url: String,
}

/// Search hits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProviderSearch {
    pub search_results: Vec<ProviderSearchResult>,
}

/// Provider-side ids to import
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderImportBody {
    pub ids: Vec<String>,
}

impl ProviderImportBody {
    /// Import the given ids
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Refresh switches for a media entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderMediaUpdateBody {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub replace_images: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub override_parts: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub set_release: bool,
}

/// Refresh switches for a collection or show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderCollectionUpdateBody {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub replace_images: bool,
}
