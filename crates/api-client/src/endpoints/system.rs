//! System info and library download endpoints

use super::NO_BODY;
use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiResult;
use crate::response::{ApiResponse, NoData};
use crate::url::paths;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// System API interface
#[derive(Clone, Copy)]
pub struct SystemApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SystemApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// GET /api/v1/system/info
    pub async fn get_system_info(
        &self,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<GetSystemInfo>> {
        self.client
            .request(&paths::get_system_info(), Method::GET, NO_BODY, options)
            .await
    }

    /// Start syncing the given library entries
    ///
    /// POST /api/v1/system/download
    pub async fn start_download(
        &self,
        body: &StartDownloadBody,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::start_download(), Method::POST, Some(body), options)
            .await
    }

    /// DELETE /api/v1/system/download
    pub async fn cancel_download(
        &self,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<NoData>> {
        self.client
            .request(&paths::cancel_download(), Method::DELETE, NO_BODY, options)
            .await
    }
}

/// Backend version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetSystemInfo {
    pub version: String,
}

/// Entries to sync
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartDownloadBody {
    pub ids: Vec<String>,
}
