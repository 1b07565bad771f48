//! Smoke tests against a running backend.
//!
//! Run with `API_ADDRESS=http://host:port cargo test --features integration`.

#![cfg(feature = "integration")]

use watchbook_api_client::prelude::*;

fn client() -> ApiClient {
    ApiClient::from_env().expect("API_ADDRESS must point at a backend")
}

#[tokio::test]
async fn system_info_has_version() {
    let info = page_data(client().system().get_system_info(None).await).unwrap();
    assert!(!info.version.is_empty());
}

#[tokio::test]
async fn anonymous_media_listing() {
    let (_, options) = listing_options::<MediaFilter>(&SearchParams::new()).unwrap();
    let data = page_data(client().media().get_media(Some(&options)).await).unwrap();
    assert!(data.media.len() as u64 <= data.page.per_page);
}

#[tokio::test]
async fn me_without_token_is_failure_envelope() {
    let res = client().auth().get_me(None).await.unwrap();
    assert!(!res.is_success());
}
