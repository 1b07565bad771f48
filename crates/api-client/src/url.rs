//! URL construction
//!
//! [`create_url`] resolves an already-interpolated path against the base
//! address. [`paths`] pins the path of every operation so the typed endpoint
//! methods never assemble paths by hand; [`ClientUrls`] resolves the same
//! paths against a base address for callers that need absolute URLs (image
//! links, redirects).

use crate::error::{ApiError, ApiResult};
use std::borrow::Cow;

pub use url::Url;

/// Resolve `path` against `base` into an absolute URL.
///
/// The path is appended verbatim; identifiers must already be interpolated
/// (see [`segment`]). A trailing slash on `base` is ignored. A `.` or `..`
/// segment is rejected: URL parsing collapses those (and `%2E`) into a
/// different route.
pub fn create_url(base: &str, path: &str) -> ApiResult<Url> {
    if let Some(dot) = path.split('/').find(|s| matches!(*s, "." | "..")) {
        return Err(ApiError::InvalidPathIdentifier(dot.to_string()));
    }

    let base = base.trim_end_matches('/');
    let url = Url::parse(&format!("{base}{path}"))
        .map_err(|e| ApiError::InvalidBaseAddress(format!("{base}: {e}")))?;

    if !url.has_host() || !matches!(url.scheme(), "http" | "https") {
        return Err(ApiError::InvalidBaseAddress(base.to_string()));
    }

    Ok(url)
}

/// Percent-encode a path parameter so it always occupies exactly one segment.
///
/// `.` and `..` survive encoding; [`create_url`] refuses them.
#[must_use]
pub fn segment(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

/// Set `key` on the URL's query string, replacing any existing value.
pub fn set_query_param(url: &mut Url, key: &str, value: &str) {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    for (k, v) in &kept {
        pairs.append_pair(k, v);
    }
    pairs.append_pair(key, value);
}

/// Per-operation URL builders bound to one base address.
#[derive(Debug, Clone)]
pub struct ClientUrls {
    base_url: String,
}

macro_rules! urls {
    ($( $(#[$doc:meta])* $name:ident ( $($arg:ident),* ) => $fmt:literal; )*) => {
        /// Interpolated request paths, one function per operation
        pub mod paths {
            use super::segment;

            $(
                $(#[$doc])*
                #[must_use]
                pub fn $name($($arg: &str),*) -> String {
                    $(let $arg = segment($arg);)*
                    format!($fmt)
                }
            )*
        }

        impl ClientUrls {
            $(
                $(#[$doc])*
                pub fn $name(&self, $($arg: &str),*) -> ApiResult<Url> {
                    create_url(&self.base_url, &paths::$name($($arg),*))
                }
            )*
        }
    };
}

impl ClientUrls {
    /// Create URL builders for a base address
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// The base address these URLs resolve against
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

urls! {
    // auth
    signup() => "/api/v1/auth/signup";
    signin() => "/api/v1/auth/signin";
    change_password() => "/api/v1/auth/password";
    get_me() => "/api/v1/auth/me";

    // users
    get_user(id) => "/api/v1/users/{id}";
    get_user_stats(id) => "/api/v1/users/{id}/stats";
    update_user_settings() => "/api/v1/user/settings";
    import_mal_anime_list(username) => "/api/v1/users/import/mal/{username}/anime";

    // api tokens
    create_api_token() => "/api/v1/user/apitoken";
    get_all_api_tokens() => "/api/v1/user/apitoken";
    delete_api_token(id) => "/api/v1/user/apitoken/{id}";

    // media
    get_media() => "/api/v1/media";
    create_media() => "/api/v1/media";
    get_media_by_id(id) => "/api/v1/media/{id}";
    edit_media(id) => "/api/v1/media/{id}";
    delete_media(id) => "/api/v1/media/{id}";
    get_media_parts(id) => "/api/v1/media/{id}/parts";
    set_parts(id) => "/api/v1/media/{id}/parts";
    add_part(id) => "/api/v1/media/{id}/single/parts";
    edit_part(id, index) => "/api/v1/media/{id}/parts/{index}";
    remove_part(id, index) => "/api/v1/media/{id}/parts/{index}";
    set_media_user_data(id) => "/api/v1/media/{id}/user";
    delete_media_user_data(id) => "/api/v1/media/{id}/user";
    set_media_release(id) => "/api/v1/media/{id}/release";
    delete_media_release(id) => "/api/v1/media/{id}/release";
    /// Unauthenticated image asset, outside the JSON envelope
    get_media_image(id, file) => "/files/media/{id}/images/{file}";

    // shows
    get_shows() => "/api/v1/shows";
    create_show() => "/api/v1/shows";
    get_show_by_id(id) => "/api/v1/shows/{id}";
    edit_show(id) => "/api/v1/shows/{id}";
    delete_show(id) => "/api/v1/shows/{id}";
    change_show_images(id) => "/api/v1/shows/{id}/images";
    get_show_seasons(id) => "/api/v1/shows/{id}/seasons";
    add_show_season(id) => "/api/v1/shows/{id}/seasons";
    get_show_season(id, season_num) => "/api/v1/shows/{id}/seasons/{season_num}";
    edit_show_season(id, season_num) => "/api/v1/shows/{id}/seasons/{season_num}";
    remove_show_season(id, season_num) => "/api/v1/shows/{id}/seasons/{season_num}";
    get_show_season_episodes(id, season_num) => "/api/v1/shows/{id}/seasons/{season_num}/episodes";
    add_show_season_item(id, season_num) => "/api/v1/shows/{id}/seasons/{season_num}/items";
    edit_show_season_item(id, season_num, media_id) => "/api/v1/shows/{id}/seasons/{season_num}/items/{media_id}";
    remove_show_season_item(id, season_num, media_id) => "/api/v1/shows/{id}/seasons/{season_num}/items/{media_id}";
    /// Unauthenticated image asset, outside the JSON envelope
    get_show_image(id, file) => "/files/shows/{id}/images/{file}";

    // collections
    get_collections() => "/api/v1/collections";
    create_collection() => "/api/v1/collections";
    get_collection_by_id(id) => "/api/v1/collections/{id}";
    edit_collection(id) => "/api/v1/collections/{id}";
    delete_collection(id) => "/api/v1/collections/{id}";
    change_collection_images(id) => "/api/v1/collections/{id}/images";
    get_collection_items(id) => "/api/v1/collections/{id}/items";
    add_collection_item(id) => "/api/v1/collections/{id}/items";
    edit_collection_item(id, media_id) => "/api/v1/collections/{id}/items/{media_id}";
    remove_collection_item(id, media_id) => "/api/v1/collections/{id}/items/{media_id}";
    /// Unauthenticated image asset, outside the JSON envelope
    get_collection_image(id, file) => "/files/collections/{id}/images/{file}";

    // folders
    get_folders() => "/api/v1/folders";
    create_folder() => "/api/v1/folders";
    get_folder_by_id(id) => "/api/v1/folders/{id}";
    edit_folder(id) => "/api/v1/folders/{id}";
    delete_folder(id) => "/api/v1/folders/{id}";
    get_folder_items(id) => "/api/v1/folders/{id}/items";
    add_folder_item(id, media_id) => "/api/v1/folders/{id}/items/{media_id}";
    remove_folder_item(id, media_id) => "/api/v1/folders/{id}/items/{media_id}";
    move_folder_item(id, media_id, pos) => "/api/v1/folders/{id}/items/{media_id}/move/{pos}";

    // providers
    get_providers() => "/api/v1/providers";
    provider_search_media(provider_name) => "/api/v1/providers/{provider_name}/media";
    provider_search_collections(provider_name) => "/api/v1/providers/{provider_name}/collections";
    provider_search_shows(provider_name) => "/api/v1/providers/{provider_name}/shows";
    provider_import_media(provider_name) => "/api/v1/providers/{provider_name}/media/import";
    provider_import_collections(provider_name) => "/api/v1/providers/{provider_name}/collections/import";
    provider_import_shows(provider_name) => "/api/v1/providers/{provider_name}/shows/import";
    provider_update_media(provider_name, media_id) => "/api/v1/providers/{provider_name}/media/{media_id}";
    provider_update_collection(provider_name, collection_id) => "/api/v1/providers/{provider_name}/collections/{collection_id}";
    /// Shows are refreshed through the collections route on the backend
    provider_update_show(provider_name, show_id) => "/api/v1/providers/{provider_name}/collections/{show_id}";
    provider_update_unknown_media() => "/api/v1/providers/updateUnknownMedia";

    // releases
    get_releases() => "/api/v1/releases";
    get_release_by_id(id) => "/api/v1/releases/{id}";

    // system
    get_system_info() => "/api/v1/system/info";
    start_download() => "/api/v1/system/download";
    cancel_download() => "/api/v1/system/download";
}
