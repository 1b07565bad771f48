//! Collection endpoints

use super::NO_BODY;
use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::facets::{CollectionType, MediaRating, MediaStatus, MediaType};
use crate::response::{ApiResponse, NoData};
use crate::types::{Created, MediaUser, Page};
use crate::url::paths;
use reqwest::multipart::Form;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Collections API interface
#[derive(Clone, Copy)]
pub struct CollectionsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> CollectionsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// GET /api/v1/collections
    pub async fn get_collections(
        &self,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<GetCollections>> {
        self.client
            .request(&paths::get_collections(), Method::GET, NO_BODY, options)
            .await
    }

    /// GET /api/v1/collections/{id}
    pub async fn get_collection_by_id(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<Collection>> {
        self.client
            .request(&paths::get_collection_by_id(id), Method::GET, NO_BODY, options)
            .await
    }

    /// GET /api/v1/collections/{id}/items
    pub async fn get_collection_items(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<GetCollectionItems>> {
        self.client
            .request(&paths::get_collection_items(id), Method::GET, NO_BODY, options)
            .await
    }

    /// POST /api/v1/collections
    pub async fn create_collection(
        &self,
        body: &CreateCollectionBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<Created>> {
        self.client
            .request(&paths::create_collection(), Method::POST, Some(body), options)
            .await
    }

    /// PATCH /api/v1/collections/{id}
    pub async fn edit_collection(
        &self,
        id: &str,
        body: &EditCollectionBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::edit_collection(id), Method::PATCH, Some(body), options)
            .await
    }

    /// DELETE /api/v1/collections/{id}
    pub async fn delete_collection(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::delete_collection(id), Method::DELETE, NO_BODY, options)
            .await
    }

    /// PATCH /api/v1/collections/{id}/images
    pub async fn change_collection_images(
        &self,
        id: &str,
        form: Form,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request_form(&paths::change_collection_images(id), Method::PATCH, form, options)
            .await
    }

    /// POST /api/v1/collections/{id}/items
    pub async fn add_collection_item(
        &self,
        id: &str,
        body: &AddCollectionItemBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::add_collection_item(id), Method::POST, Some(body), options)
            .await
    }

    /// PATCH /api/v1/collections/{id}/items/{mediaId}
    pub async fn edit_collection_item(
        &self,
        id: &str,
        media_id: &str,
        body: &EditCollectionItemBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(
                &paths::edit_collection_item(id, media_id),
                Method::PATCH,
                Some(body),
                options,
            )
            .await
    }

    /// DELETE /api/v1/collections/{id}/items/{mediaId}
    pub async fn remove_collection_item(
        &self,
        id: &str,
        media_id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(
                &paths::remove_collection_item(id, media_id),
                Method::DELETE,
                NO_BODY,
                options,
            )
            .await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Collection entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: String,
    pub collection_type: CollectionType,
    pub name: String,
    pub cover_url: Option<String>,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
}

/// Page of collections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetCollections {
    pub page: Page,
    pub collections: Vec<Collection>,
}

/// Media entry inside a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    pub collection_id: String,
    pub media_id: String,
    /// Name of the entry within the collection, e.g. "Season 2"
    pub collection_name: String,
    pub search_slug: String,
    pub position: i64,
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
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<MediaUser>,
}

/// Items of a collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetCollectionItems {
    pub items: Vec<CollectionItem>,
}

/// New collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectionBody {
    pub collection_type: CollectionType,
    pub name: String,
}

/// Collection edit; absent fields stay unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCollectionBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_type: Option<CollectionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_status: Option<String>,
}

/// Add a media entry to a collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCollectionItemBody {
    pub media_id: String,
    pub name: String,
    pub search_slug: String,
    pub position: i64,
}

/// Collection item edit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditCollectionItemBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
}
