//! Drives the real client over HTTP against an in-process mock backend.

use axum::body::Bytes;
use axum::extract::{Path, Query};
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::routing::{delete, get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use tokio::net::TcpListener;
use watchbook_api_client::endpoints::auth::SigninBody;
use watchbook_api_client::endpoints::collections::AddCollectionItemBody;
use watchbook_api_client::endpoints::providers::ProviderImportBody;
use watchbook_api_client::loader::FormOutcome;
use watchbook_api_client::prelude::*;
use watchbook_api_client::query::page_options;
use watchbook_api_client::session::{sign_in, SessionUser};

const TOKEN: &str = "tok-1";

fn failure(code: StatusCode, kind: &str, message: &str, extra: Value) -> (StatusCode, Json<Value>) {
    (
        code,
        Json(json!({
            "success": false,
            "error": {"code": code.as_u16(), "message": message, "type": kind, "extra": extra}
        })),
    )
}

fn success(data: Value) -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({"success": true, "data": data})))
}

async fn signin(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let username = body["username"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();

    match (username, password) {
        ("", _) => failure(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            "Body Validation Error",
            json!({"username": "cannot be blank"}),
        ),
        ("patrik", "secret") => success(json!({"token": TOKEN})),
        ("patrik", _) => failure(
            StatusCode::UNAUTHORIZED,
            "INVALID_CREDENTIALS",
            "Invalid Credentials",
            Value::Null,
        ),
        _ => failure(StatusCode::NOT_FOUND, "USER_NOT_FOUND", "User not found", Value::Null),
    }
}

async fn me(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some("Bearer tok-1");

    if authorized {
        success(json!({"id": "u1", "username": "patrik", "role": "admin", "displayName": "Patrik"}))
    } else {
        failure(StatusCode::UNAUTHORIZED, "INVALID_AUTH", "Invalid auth", Value::Null)
    }
}

/// Echoes the received filter and sort through the first item's fields
async fn media(Query(query): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    let filter = query.get("filter").cloned().unwrap_or_default();
    let sort = query.get("sort").cloned().unwrap_or_default();
    success(json!({
        "page": {"page": 0, "perPage": 50, "totalItems": 1, "totalPages": 1},
        "media": [{
            "id": "m1",
            "title": filter,
            "description": sort,
            "mediaType": "movie",
            "score": null,
            "status": "completed",
            "rating": "pg",
            "partCount": 1,
            "airingSeason": null,
            "startDate": null,
            "endDate": null,
            "creators": [],
            "tags": [],
            "coverUrl": null,
            "bannerUrl": null,
            "logoUrl": null,
            "providers": [],
            "release": null
        }]
    }))
}

async fn user(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    success(json!({"id": id, "username": "patrik"}))
}

async fn delete_token() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({"success": true})))
}

async fn not_json() -> (StatusCode, &'static str) {
    (StatusCode::BAD_GATEWAY, "<html>502 Bad Gateway</html>")
}

async fn wrong_shape() -> Json<Value> {
    Json(json!({"ok": true, "releases": []}))
}

async fn show_images(headers: HeaderMap, body: Bytes) -> (StatusCode, Json<Value>) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    let has_part = String::from_utf8_lossy(&body).contains("name=\"cover\"");

    if content_type.starts_with("multipart/form-data; boundary=") && has_part {
        (StatusCode::OK, Json(json!({"success": true})))
    } else {
        failure(StatusCode::BAD_REQUEST, "BAD_FORM", content_type, Value::Null)
    }
}

async fn releases(Query(query): Query<HashMap<String, String>>) -> (StatusCode, Json<Value>) {
    let page: u64 = query.get("page").and_then(|p| p.parse().ok()).unwrap_or(0);
    success(json!({
        "page": {"page": page, "perPage": 20, "totalItems": 0, "totalPages": 1},
        "releases": []
    }))
}

async fn user_stats(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    success(json!({"userId": id, "completed": 12, "meanScore": 7.5}))
}

async fn folders() -> (StatusCode, Json<Value>) {
    success(json!({"folders": [
        {"id": "f1", "userId": "u1", "name": "Weekend", "itemCount": 0, "coverUrl": null}
    ]}))
}

async fn folder_items(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    if id == "f1" {
        success(json!({"items": []}))
    } else {
        failure(StatusCode::NOT_FOUND, "FOLDER_NOT_FOUND", "Folder not found", Value::Null)
    }
}

async fn move_folder_item(
    Path((id, media_id, pos)): Path<(String, String, String)>,
) -> (StatusCode, Json<Value>) {
    match (id.as_str(), media_id.as_str(), pos.as_str()) {
        ("f1", "m1", "2") => success(Value::Null),
        _ => failure(StatusCode::BAD_REQUEST, "BAD_MOVE", &format!("{id}/{media_id}/{pos}"), Value::Null),
    }
}

async fn show_seasons(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    success(json!({"seasons": [
        {"num": 1, "showId": id, "name": "Season 1", "searchSlug": "season-1", "items": []}
    ]}))
}

async fn remove_show_season(Path((id, num)): Path<(String, String)>) -> (StatusCode, Json<Value>) {
    if id == "s1" && num == "1" {
        success(Value::Null)
    } else {
        failure(StatusCode::NOT_FOUND, "SHOW_SEASON_NOT_FOUND", "Season not found", Value::Null)
    }
}

async fn add_collection_item(
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if id == "c1" && body["mediaId"] == "m1" && body["position"] == 3 {
        success(Value::Null)
    } else {
        failure(StatusCode::BAD_REQUEST, "BAD_ITEM", &body.to_string(), Value::Null)
    }
}

async fn import_media(Path(name): Path<String>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if name == "myanimelist" && body["ids"] == json!(["1", "2"]) {
        success(Value::Null)
    } else {
        failure(StatusCode::BAD_REQUEST, "BAD_IMPORT", &body.to_string(), Value::Null)
    }
}

/// Any verb/path the backend does not serve
async fn unrouted(method: Method, uri: Uri) -> (StatusCode, Json<Value>) {
    failure(StatusCode::NOT_FOUND, "ROUTE_NOT_FOUND", &format!("{method} {uri}"), Value::Null)
}

fn app() -> Router {
    Router::new()
        .route("/api/v1/auth/signin", post(signin))
        .route("/api/v1/auth/me", get(me))
        .route("/api/v1/media", get(media))
        .route("/api/v1/users/{id}", get(user))
        .route("/api/v1/user/apitoken/{id}", delete(delete_token))
        .route("/api/v1/system/info", get(not_json))
        .route("/api/v1/releases", get(releases))
        .route("/api/v1/releases/{id}", get(wrong_shape))
        .route("/api/v1/users/{id}/stats", get(user_stats))
        .route("/api/v1/folders", get(folders))
        .route("/api/v1/folders/{id}/items", get(folder_items))
        .route("/api/v1/folders/{id}/items/{media_id}/move/{pos}", post(move_folder_item))
        .route("/api/v1/shows/{id}/images", patch(show_images))
        .route("/api/v1/shows/{id}/seasons", get(show_seasons))
        .route("/api/v1/shows/{id}/seasons/{num}", delete(remove_show_season))
        .route("/api/v1/collections/{id}/items", post(add_collection_item))
        .route("/api/v1/providers/{name}/media/import", post(import_media))
        .fallback(unrouted)
}

async fn spawn_backend() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app()).await.unwrap();
    });
    format!("http://{addr}")
}

fn credentials(username: &str, password: &str) -> SigninBody {
    SigninBody {
        username: username.to_string(),
        password: password.to_string(),
    }
}

#[tokio::test]
async fn signin_returns_token() {
    let client = ApiClient::new(spawn_backend().await).unwrap();
    let res = client
        .auth()
        .signin(&credentials("patrik", "secret"), None)
        .await
        .unwrap();
    assert_eq!(res.data().unwrap().token, TOKEN);
}

#[tokio::test]
async fn failure_envelope_is_not_an_error() {
    let client = ApiClient::new(spawn_backend().await).unwrap();
    let res = client
        .auth()
        .signin(&credentials("patrik", "wrong"), None)
        .await
        .unwrap();

    let failure = res.failure().unwrap();
    assert_eq!(failure.code, 401);
    assert!(failure.is(error_types::INVALID_CREDENTIALS));
}

#[tokio::test]
async fn bearer_token_is_sent_and_removed() {
    let mut client = ApiClient::new(spawn_backend().await).unwrap();

    client.set_authorization_token(Some(TOKEN));
    let res = client.auth().get_me(None).await.unwrap();
    assert_eq!(res.data().unwrap().username, "patrik");

    client.set_authorization_token(None);
    let res = client.auth().get_me(None).await.unwrap();
    assert!(res.failure().unwrap().is(error_types::INVALID_AUTH));
}

#[tokio::test]
async fn listing_query_reaches_backend() {
    let client = ApiClient::new(spawn_backend().await).unwrap();
    let params: SearchParams = [
        ("query", "abc"),
        ("filterType", "movie,tv"),
        ("sort", "score-high"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let (_, options) = listing_options::<MediaFilter>(&params).unwrap();
    let res = client.media().get_media(Some(&options)).await.unwrap();
    let media = &res.data().unwrap().media[0];
    assert_eq!(media.title, r#"title % "%abc%" && hasType("movie","tv")"#);
    assert_eq!(media.description.as_deref(), Some("sort=-score"));
}

#[tokio::test]
async fn path_identifiers_arrive_intact() {
    let client = ApiClient::new(spawn_backend().await).unwrap();
    let res = client.users().get_user("a/b c", None).await.unwrap();
    assert_eq!(res.data().unwrap().id, "a/b c");
}

#[tokio::test]
async fn empty_success_decodes_as_no_data() {
    let client = ApiClient::new(spawn_backend().await).unwrap();
    let res = client.tokens().delete_api_token("t1", None).await.unwrap();
    assert_eq!(res, ApiResponse::Success(NoData));
}

#[tokio::test]
async fn malformed_body_is_distinguishable() {
    let client = ApiClient::new(spawn_backend().await).unwrap();
    let err = client.system().get_system_info(None).await.unwrap_err();
    assert!(matches!(err, ApiError::MalformedResponseBody(_)));
}

#[tokio::test]
async fn wrong_envelope_is_schema_mismatch() {
    let client = ApiClient::new(spawn_backend().await).unwrap();
    let err = client.releases().get_release_by_id("r1", None).await.unwrap_err();
    assert!(matches!(err, ApiError::ResponseSchemaMismatch(_)));
    assert!(err.is_contract_violation());
}

#[tokio::test]
async fn multipart_upload_carries_boundary() {
    let client = ApiClient::new(spawn_backend().await).unwrap();
    let part = reqwest::multipart::Part::bytes(vec![0x89, 0x50, 0x4e, 0x47])
        .file_name("cover.png")
        .mime_str("image/png")
        .unwrap();
    let form = reqwest::multipart::Form::new().part("cover", part);

    let res = client.shows().change_show_images("s1", form, None).await.unwrap();
    assert!(res.is_success(), "{res:?}");
}

#[tokio::test]
async fn sign_in_flow_builds_cookie() {
    let mut client = ApiClient::new(spawn_backend().await).unwrap();
    let outcome = sign_in(&mut client, &credentials("patrik", "secret")).await.unwrap();

    let FormOutcome::Success(signed_in) = outcome else {
        panic!("expected success, got {outcome:?}");
    };
    assert_eq!(signed_in.cookie.token, TOKEN);
    assert_eq!(
        signed_in.cookie.user,
        SessionUser {
            id: "u1".to_string(),
            username: "patrik".to_string()
        }
    );
    assert_eq!(signed_in.redirect.location, "/");
    assert!(client.has_token());
}

#[tokio::test]
async fn sign_in_flow_maps_field_errors() {
    let mut client = ApiClient::new(spawn_backend().await).unwrap();

    let outcome = sign_in(&mut client, &credentials("nobody", "x")).await.unwrap();
    let FormOutcome::Invalid(errors) = outcome else {
        panic!("expected field errors");
    };
    assert_eq!(errors.get("username"), Some("The user does not exist"));

    let outcome = sign_in(&mut client, &credentials("", "x")).await.unwrap();
    let FormOutcome::Invalid(errors) = outcome else {
        panic!("expected field errors");
    };
    assert_eq!(errors.get("username"), Some("Cannot be blank"));
    assert!(!client.has_token());
}

#[tokio::test]
async fn rejected_session_expires() {
    let mut client = ApiClient::new(spawn_backend().await).unwrap();
    let cookie = AuthCookie {
        token: "stale".to_string(),
        user: SessionUser {
            id: "u1".to_string(),
            username: "patrik".to_string(),
        },
    };

    let state = resolve_session(&mut client, Some(&cookie)).await.unwrap();
    let SessionState::Expired(redirect) = state else {
        panic!("expected expired session, got {state:?}");
    };
    assert_eq!(redirect.location, "/");
    assert!(!client.has_token());
}

#[tokio::test]
async fn dot_identifiers_never_leave_the_client() {
    let client = ApiClient::new(spawn_backend().await).unwrap();
    for id in [".", ".."] {
        let err = client.media().get_media_by_id(id, None).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidPathIdentifier(_)), "{err}");
    }
    let err = client.tokens().delete_api_token("..", None).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidPathIdentifier(_)));
}

#[tokio::test]
async fn unserved_route_comes_back_as_failure() {
    let client = ApiClient::new(spawn_backend().await).unwrap();
    let res = client.media().get_media_by_id("m1", None).await.unwrap();
    let failure = res.failure().unwrap();
    assert_eq!(failure.code, 404);
    assert_eq!(failure.message, "GET /api/v1/media/m1");
}

#[tokio::test]
async fn release_listing_passes_paging_through() {
    let client = ApiClient::new(spawn_backend().await).unwrap();
    let params: SearchParams = [("page", "2"), ("unrelated", "x")]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    let options = page_options(&params);
    assert!(!options.query.contains_key("unrelated"));

    let data = page_data(client.releases().get_releases(Some(&options)).await).unwrap();
    assert_eq!(data.page.page, 2);
    assert!(data.releases.is_empty());
}

#[tokio::test]
async fn user_stats_keep_every_value() {
    let client = ApiClient::new(spawn_backend().await).unwrap();
    let stats = page_data(client.users().get_user_stats("u1", None).await).unwrap();
    assert_eq!(stats.number("completed"), Some(12.0));
    assert_eq!(stats.number("meanScore"), Some(7.5));
    assert_eq!(stats.stats["userId"], "u1");
}

#[tokio::test]
async fn folder_operations_reach_their_routes() {
    let client = ApiClient::new(spawn_backend().await).unwrap();
    let folders = client.folders();

    let listing = page_data(folders.get_folders(None).await).unwrap();
    assert_eq!(listing.folders[0].name, "Weekend");

    let items = page_data(folders.get_folder_items("f1", None).await).unwrap();
    assert!(items.items.is_empty());

    let missing = folders.get_folder_items("f2", None).await.unwrap();
    assert!(missing.failure().unwrap().is("FOLDER_NOT_FOUND"));

    let moved = folders.move_folder_item("f1", "m1", 2, None).await.unwrap();
    assert!(moved.is_success(), "{moved:?}");
}

#[tokio::test]
async fn show_season_operations_reach_their_routes() {
    let client = ApiClient::new(spawn_backend().await).unwrap();

    let seasons = page_data(client.shows().get_show_seasons("s1", None).await).unwrap();
    assert_eq!(seasons.seasons[0].show_id, "s1");
    assert_eq!(seasons.seasons[0].num, 1);

    let removed = client.shows().remove_show_season("s1", 1, None).await.unwrap();
    assert!(removed.is_success(), "{removed:?}");
}

#[tokio::test]
async fn collection_item_body_reaches_backend() {
    let client = ApiClient::new(spawn_backend().await).unwrap();
    let body = AddCollectionItemBody {
        media_id: "m1".to_string(),
        name: "Season 2".to_string(),
        search_slug: "season-2".to_string(),
        position: 3,
    };

    let res = client.collections().add_collection_item("c1", &body, None).await.unwrap();
    assert!(res.is_success(), "{res:?}");
}

#[tokio::test]
async fn provider_import_sends_ids() {
    let client = ApiClient::new(spawn_backend().await).unwrap();
    let res = client
        .providers()
        .import_media("myanimelist", &ProviderImportBody::new(["1", "2"]), None)
        .await
        .unwrap();
    assert!(res.is_success(), "{res:?}");
}
