//! Base request client
//!
//! [`ApiClient`] owns the base address and a mutable header set. It is meant
//! to live for one session scope (one incoming page request, one CLI
//! invocation) and is never shared between independent sessions, so the
//! header set needs no locking: mutation goes through `&mut self`.

use crate::config::ClientConfig;
use crate::endpoints::{
    AuthApi, CollectionsApi, FoldersApi, MediaApi, ProvidersApi, ReleasesApi, ShowsApi,
    SystemApi, TokensApi, UsersApi,
};
use crate::error::{ApiError, ApiResult};
use crate::response::ApiResponse;
use crate::url::{create_url, set_query_param, ClientUrls, Url};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::multipart::Form;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// Header key the bearer token is stored under
pub const AUTHORIZATION_KEY: &str = "Authorization";

/// Extra headers and query parameters for a single call.
///
/// Entries here win over the client's own headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Extra headers
    pub headers: BTreeMap<String, String>,
    /// Query parameters
    pub query: BTreeMap<String, String>,
}

impl RequestOptions {
    /// Create empty options
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a header
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add or replace a query parameter
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Options carrying only query parameters
    #[must_use]
    pub fn from_query(query: BTreeMap<String, String>) -> Self {
        Self {
            query,
            ..Self::default()
        }
    }
}

/// Body of an outgoing request
enum Body<'a, B: ?Sized> {
    Empty,
    Json(&'a B),
    Multipart(Form),
}

/// Watchbook API client
///
/// Typed operations are reached through the group accessors
/// ([`media`](Self::media), [`shows`](Self::shows), ...); each pins the path,
/// verb and payload types of its operations and forwards the envelope
/// unchanged.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Client,
    base_url: String,
    headers: BTreeMap<String, String>,
    urls: ClientUrls,
}

impl ApiClient {
    /// Create a new client with configuration from the environment
    pub fn from_env() -> ApiResult<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a client for a base address with default settings
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Self::with_config(ClientConfig::default().with_base_url(base_url))
    }

    /// Create a new client with specific configuration
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;
        // Unusable addresses fail here, not on the first request
        create_url(&config.base_url, "/")?;

        let mut default_headers = HeaderMap::new();
        let agent = HeaderValue::from_str(&config.user_agent)
            .map_err(|e| ApiError::invalid_header("User-Agent", e))?;
        default_headers.insert(USER_AGENT, agent);

        let inner = Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()
            .map_err(ApiError::Request)?;

        Ok(Self {
            inner,
            urls: ClientUrls::new(config.base_url.clone()),
            base_url: config.base_url,
            headers: BTreeMap::new(),
        })
    }

    /// Get the base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL builders for every operation, including unauthenticated assets
    #[must_use]
    pub fn urls(&self) -> &ClientUrls {
        &self.urls
    }

    /// Headers sent with every request
    #[must_use]
    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Set or remove a default header
    pub fn set_header(&mut self, name: impl Into<String>, value: Option<String>) {
        let name = name.into();
        match value {
            Some(value) => {
                self.headers.insert(name, value);
            }
            None => {
                self.headers.remove(&name);
            }
        }
    }

    /// Set or clear the bearer token.
    ///
    /// `Some(token)` sends `Authorization: Bearer <token>` on every later
    /// request; `None` removes the header entirely.
    pub fn set_authorization_token(&mut self, token: Option<&str>) {
        self.set_header(AUTHORIZATION_KEY, token.map(|t| format!("Bearer {t}")));
    }

    /// Whether a bearer token is currently set
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.headers.contains_key(AUTHORIZATION_KEY)
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Sign-up, sign-in, password and current-user endpoints
    #[must_use]
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    /// User profile, settings and list import endpoints
    #[must_use]
    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    /// API token management
    #[must_use]
    pub fn tokens(&self) -> TokensApi<'_> {
        TokensApi::new(self)
    }

    /// Media catalog endpoints
    #[must_use]
    pub fn media(&self) -> MediaApi<'_> {
        MediaApi::new(self)
    }

    /// Show, season and episode endpoints
    #[must_use]
    pub fn shows(&self) -> ShowsApi<'_> {
        ShowsApi::new(self)
    }

    /// Collection endpoints
    #[must_use]
    pub fn collections(&self) -> CollectionsApi<'_> {
        CollectionsApi::new(self)
    }

    /// Folder (playlist) endpoints
    #[must_use]
    pub fn folders(&self) -> FoldersApi<'_> {
        FoldersApi::new(self)
    }

    /// Provider search, import and refresh endpoints
    #[must_use]
    pub fn providers(&self) -> ProvidersApi<'_> {
        ProvidersApi::new(self)
    }

    /// Release schedule endpoints
    #[must_use]
    pub fn releases(&self) -> ReleasesApi<'_> {
        ReleasesApi::new(self)
    }

    /// System info and library download endpoints
    #[must_use]
    pub fn system(&self) -> SystemApi<'_> {
        SystemApi::new(self)
    }

    // -------------------------------------------------------------------------
    // Low-level request methods
    // -------------------------------------------------------------------------

    /// Perform a request with an optional JSON body and validate the envelope.
    pub async fn request<T, E, B>(
        &self,
        path: &str,
        method: Method,
        body: Option<&B>,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<T, E>>
    where
        T: DeserializeOwned,
        E: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = body.map_or(Body::Empty, Body::Json);
        self.execute(path, method, body, options).await
    }

    /// Perform a request with a multipart form body and validate the envelope.
    pub async fn request_form<T, E>(
        &self,
        path: &str,
        method: Method,
        form: Form,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<T, E>>
    where
        T: DeserializeOwned,
        E: DeserializeOwned,
    {
        self.execute::<T, E, ()>(path, method, Body::Multipart(form), options)
            .await
    }

    /// Build the outgoing request without sending it
    fn prepare<B: Serialize + ?Sized>(
        &self,
        url: Url,
        method: Method,
        body: Body<'_, B>,
        options: Option<&RequestOptions>,
        request_id: &str,
    ) -> ApiResult<RequestBuilder> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            insert_header(&mut headers, name, value)?;
        }

        let payload = match body {
            Body::Empty => None,
            Body::Json(value) => {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                Some(serde_json::to_vec(value).map_err(ApiError::Serialization)?)
            }
            // The multipart encoder sets `multipart/form-data` with its boundary
            Body::Multipart(_) => None,
        };

        if let Some(options) = options {
            for (name, value) in &options.headers {
                insert_header(&mut headers, name, value)?;
            }
        }

        let mut url = url;
        if let Some(options) = options {
            for (key, value) in &options.query {
                set_query_param(&mut url, key, value);
            }
        }

        let mut request = self
            .inner
            .request(method, url)
            .header(X_REQUEST_ID, request_id)
            .headers(headers);

        if let Some(bytes) = payload {
            request = request.body(bytes);
        } else if let Body::Multipart(form) = body {
            request = request.multipart(form);
        }

        Ok(request)
    }

    async fn execute<T, E, B>(
        &self,
        path: &str,
        method: Method,
        body: Body<'_, B>,
        options: Option<&RequestOptions>,
    ) -> ApiResult<ApiResponse<T, E>>
    where
        T: DeserializeOwned,
        E: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let request_id = Uuid::new_v4().to_string();
        let url = create_url(&self.base_url, path)?;
        let request = self.prepare(url, method.clone(), body, options, &request_id)?;

        let start = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let elapsed = start.elapsed();

        let result = parse_envelope::<T, E>(&bytes);
        match &result {
            Ok(ApiResponse::Success(_)) => debug!(
                request_id = %request_id,
                method = %method,
                path = %path,
                status = status.as_u16(),
                elapsed_ms = elapsed.as_millis(),
                "Request succeeded"
            ),
            Ok(ApiResponse::Failure(failure)) => debug!(
                request_id = %request_id,
                method = %method,
                path = %path,
                status = status.as_u16(),
                error_type = %failure.kind,
                elapsed_ms = elapsed.as_millis(),
                "Request returned failure envelope"
            ),
            Err(e) => warn!(
                request_id = %request_id,
                method = %method,
                path = %path,
                status = status.as_u16(),
                error = %e,
                "Response violated the API contract"
            ),
        }

        result
    }
}

/// Parse raw body bytes into a validated envelope.
///
/// Invalid JSON and well-formed JSON of the wrong shape are kept apart.
pub fn parse_envelope<T, E>(bytes: &[u8]) -> ApiResult<ApiResponse<T, E>>
where
    T: DeserializeOwned,
    E: DeserializeOwned,
{
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(ApiError::MalformedResponseBody)?;
    serde_json::from_value(value).map_err(ApiError::ResponseSchemaMismatch)
}

fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> ApiResult<()> {
    let header_name =
        HeaderName::from_bytes(name.as_bytes()).map_err(|e| ApiError::invalid_header(name, e))?;
    let header_value = HeaderValue::from_str(value).map_err(|e| ApiError::invalid_header(name, e))?;
    if header_name == AUTHORIZATION {
        let mut sensitive = header_value;
        sensitive.set_sensitive(true);
        headers.insert(header_name, sensitive);
    } else {
        headers.insert(header_name, header_value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::NoData;
    use serde_json::json;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:3000").unwrap()
    }

    #[test]
    fn test_client_creation_rejects_bad_base() {
        assert!(ApiClient::new("localhost:3000").is_err());
        assert!(ApiClient::new("").is_err());
    }

    #[test]
    fn test_set_authorization_token() {
        let mut client = client();
        assert!(!client.has_token());

        client.set_authorization_token(Some("abc"));
        assert_eq!(
            client.headers().get(AUTHORIZATION_KEY).map(String::as_str),
            Some("Bearer abc")
        );

        client.set_authorization_token(None);
        assert!(client.headers().get(AUTHORIZATION_KEY).is_none());
        assert!(client.headers().is_empty());
    }

    #[test]
    fn test_prepare_merges_headers_and_query() {
        let mut client = client();
        client.set_authorization_token(Some("abc"));
        client.set_header("X-Client", Some("web".to_string()));

        let options = RequestOptions::new()
            .with_header("X-Client", "cli")
            .with_query("filter", "hasType(\"movie\")")
            .with_query("page", "2");

        let url = create_url(client.base_url(), "/api/v1/media").unwrap();
        let request = client
            .prepare::<()>(url, Method::GET, Body::Empty, Some(&options), "req-1")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.headers()["authorization"], "Bearer abc");
        assert_eq!(request.headers()["x-client"], "cli");
        assert_eq!(request.headers()["x-request-id"], "req-1");
        assert!(request.headers().get("content-type").is_none());

        let query: BTreeMap<String, String> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(query["filter"], "hasType(\"movie\")");
        assert_eq!(query["page"], "2");
    }

    #[test]
    fn test_prepare_without_token_sends_no_authorization() {
        let mut client = client();
        client.set_authorization_token(Some("abc"));
        client.set_authorization_token(None);

        let url = create_url(client.base_url(), "/api/v1/auth/me").unwrap();
        let request = client
            .prepare::<()>(url, Method::GET, Body::Empty, None, "req-2")
            .unwrap()
            .build()
            .unwrap();
        assert!(request.headers().get("authorization").is_none());
    }

    #[test]
    fn test_prepare_json_body() {
        let client = client();
        let body = json!({"username": "patrik", "password": "secret"});
        let url = create_url(client.base_url(), "/api/v1/auth/signin").unwrap();
        let request = client
            .prepare(url, Method::POST, Body::Json(&body), None, "req-3")
            .unwrap()
            .build()
            .unwrap();

        assert_eq!(request.headers()["content-type"], "application/json");
        let sent: serde_json::Value =
            serde_json::from_slice(request.body().unwrap().as_bytes().unwrap()).unwrap();
        assert_eq!(sent, body);
    }

    #[test]
    fn test_prepare_multipart_body() {
        let client = client();
        let form = Form::new().text("name", "cover");
        let url = create_url(client.base_url(), "/api/v1/shows/s1/images").unwrap();
        let request = client
            .prepare::<()>(url, Method::PATCH, Body::Multipart(form), None, "req-4")
            .unwrap()
            .build()
            .unwrap();

        let content_type = request.headers()["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data"));
    }

    #[test]
    fn test_prepare_rejects_invalid_header_value() {
        let mut client = client();
        client.set_authorization_token(Some("bad\ntoken"));
        let url = create_url(client.base_url(), "/api/v1/auth/me").unwrap();
        let result = client.prepare::<()>(url, Method::GET, Body::Empty, None, "req-5");
        assert!(matches!(result, Err(ApiError::InvalidHeader { .. })));
    }

    #[test]
    fn test_parse_envelope_distinguishes_failures() {
        let malformed = parse_envelope::<NoData, serde_json::Value>(b"<html>oops</html>");
        assert!(matches!(malformed, Err(ApiError::MalformedResponseBody(_))));

        let mismatch = parse_envelope::<NoData, serde_json::Value>(br#"{"ok": true}"#);
        assert!(matches!(mismatch, Err(ApiError::ResponseSchemaMismatch(_))));

        let fine = parse_envelope::<NoData, serde_json::Value>(br#"{"success": true}"#).unwrap();
        assert!(fine.is_success());
    }

    #[test]
    fn test_transport_failure_is_an_error_not_an_envelope() {
        // Port 9 (discard) on loopback is not expected to accept connections
        let client = ApiClient::new("http://127.0.0.1:9").unwrap();
        let result = tokio_test::block_on(client.request::<NoData, serde_json::Value, ()>(
            "/api/v1/auth/me",
            Method::GET,
            None,
            None,
        ));
        assert!(matches!(result, Err(ref e) if e.is_transport()));
    }
}
