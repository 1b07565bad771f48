//! Folder (playlist) endpoints

use super::NO_BODY;
use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::facets::{MediaRating, MediaStatus, MediaType};
use crate::response::{ApiResponse, NoData};
use crate::types::{Created, MediaUser};
use crate::url::paths;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Folders API interface
#[derive(Clone, Copy)]
pub struct FoldersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> FoldersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Folders of the signed-in user
    ///
    /// GET /api/v1/folders
    pub async fn get_folders(
        &self,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<GetFolders>> {
        self.client
            .request(&paths::get_folders(), Method::GET, NO_BODY, options)
            .await
    }

    /// GET /api/v1/folders/{id}
    pub async fn get_folder_by_id(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<Folder>> {
        self.client
            .request(&paths::get_folder_by_id(id), Method::GET, NO_BODY, options)
            .await
    }

    /// GET /api/v1/folders/{id}/items
    pub async fn get_folder_items(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<GetFolderItems>> {
        self.client
            .request(&paths::get_folder_items(id), Method::GET, NO_BODY, options)
            .await
    }

    /// POST /api/v1/folders
    pub async fn create_folder(
        &self,
        body: &CreateFolderBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<Created>> {
        self.client
            .request(&paths::create_folder(), Method::POST, Some(body), options)
            .await
    }

    /// PATCH /api/v1/folders/{id}
    pub async fn edit_folder(
        &self,
        id: &str,
        body: &EditFolderBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::edit_folder(id), Method::PATCH, Some(body), options)
            .await
    }

    /// DELETE /api/v1/folders/{id}
    pub async fn delete_folder(
        &self,
        id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::delete_folder(id), Method::DELETE, NO_BODY, options)
            .await
    }

    /// POST /api/v1/folders/{id}/items/{mediaId}
    pub async fn add_folder_item(
        &self,
        id: &str,
        media_id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::add_folder_item(id, media_id), Method::POST, NO_BODY, options)
            .await
    }

    /// DELETE /api/v1/folders/{id}/items/{mediaId}
    pub async fn remove_folder_item(
        &self,
        id: &str,
        media_id: &str,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(
                &paths::remove_folder_item(id, media_id),
                Method::DELETE,
                NO_BODY,
                options,
            )
            .await
    }

    /// Move an item to a new position
    ///
    /// POST /api/v1/folders/{id}/items/{mediaId}/move/{pos}
    pub async fn move_folder_item(
        &self,
        id: &str,
        media_id: &str,
        pos: i64,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        let path = paths::move_folder_item(id, media_id, &pos.to_string());
        self.client
            .request(&path, Method::POST, NO_BODY, options)
            .await
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Folder entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub item_count: i64,
    pub cover_url: Option<String>,
}

/// Folder listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetFolders {
    pub folders: Vec<Folder>,
}

/// Media entry inside a folder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderItem {
    pub folder_id: String,
    pub media_id: String,
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

/// Items of a folder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetFolderItems {
    pub items: Vec<FolderItem>,
}

/// New folder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderBody {
    pub name: String,
    pub cover_url: String,
}

/// Folder edit; absent fields stay unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditFolderBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}
