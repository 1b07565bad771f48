//! Typed client for the Watchbook media library backend
//!
//! Every backend response is a discriminated envelope,
//! `{success: true, data}` or `{success: false, error}`, and every call here
//! checks the body against the operation's declared shape before handing it
//! back as an [`ApiResponse`]. Transport failures, unparsable bodies and
//! shape mismatches are [`ApiError`]s; a well-formed failure envelope is not.
//!
//! # Features
//!
//! - **URL builder**: one path per operation, identifiers percent-encoded
//! - **Base request client**: bearer token, JSON or multipart bodies, request IDs
//! - **Typed operations**: auth, users, tokens, media, shows, collections,
//!   folders, providers, releases, system
//! - **Query builder**: filter expressions and sort directives for listing pages
//! - **Session helpers**: auth cookie, route guard, sign-in/sign-up/sign-out
//!
//! # Example
//!
//! ```rust,no_run
//! use watchbook_api_client::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut client = ApiClient::from_env()?;
//!     client.set_authorization_token(Some("token"));
//!
//!     let (_, options) = listing_options::<MediaFilter>(&SearchParams::new())?;
//!     match client.media().get_media(Some(&options)).await? {
//!         ApiResponse::Success(page) => println!("{} media", page.page.total_items),
//!         ApiResponse::Failure(err) => eprintln!("{}: {}", err.kind, err.message),
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod facets;
pub mod loader;
pub mod query;
pub mod response;
pub mod session;
pub mod types;
pub mod url;

pub use client::{ApiClient, RequestOptions};
pub use config::ClientConfig;
pub use error::{ApiError, ApiResult};
pub use response::{ApiFailure, ApiResponse, NoData};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::{ApiClient, RequestOptions};
    pub use crate::config::ClientConfig;
    pub use crate::endpoints::{
        AuthApi, CollectionsApi, FoldersApi, MediaApi, ProvidersApi, ReleasesApi, ShowsApi,
        SystemApi, TokensApi, UsersApi,
    };
    pub use crate::error::{ApiError, ApiResult};
    pub use crate::facets::{
        CollectionType, MediaRating, MediaStatus, MediaType, MediaUserList, ShowType,
    };
    pub use crate::loader::{page_data, unwrap_form, unwrap_page, FormErrors, FormOutcome, PageError, Redirect};
    pub use crate::query::{
        listing_options, search_options, CollectionFilter, ListingFilter, MediaFilter,
        SearchParams, ShowFilter, WatchlistFilter,
    };
    pub use crate::response::{error_types, ApiFailure, ApiResponse, NoData};
    pub use crate::session::{guard_route, resolve_session, AuthCookie, SessionState};
}
