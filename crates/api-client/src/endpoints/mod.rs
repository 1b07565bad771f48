//! Typed operation groups
//!
//! Each group borrows the [`ApiClient`](crate::client::ApiClient) and exposes
//! one method per backend operation. A method pins the path, verb and payload
//! types, then hands back the validated envelope untouched; mapping failures
//! to page or form errors is the caller's job (see [`crate::loader`]).
//!
//! | Module | Backend prefix | Description |
//! |--------|----------------|-------------|
//! | `auth` | `/api/v1/auth` | Sign-up, sign-in, password, current user |
//! | `users` | `/api/v1/users`, `/api/v1/user` | Profiles, settings, API tokens, imports |
//! | `media` | `/api/v1/media` | Media catalog, parts, user data, releases |
//! | `shows` | `/api/v1/shows` | Shows, seasons, season items |
//! | `collections` | `/api/v1/collections` | Collections and their items |
//! | `folders` | `/api/v1/folders` | Personal folders (playlists) |
//! | `providers` | `/api/v1/providers` | Provider search, import, refresh |
//! | `releases` | `/api/v1/releases` | Release schedule |
//! | `system` | `/api/v1/system` | Version info, library download |

pub mod auth;
pub mod collections;
pub mod folders;
pub mod media;
pub mod providers;
pub mod releases;
pub mod shows;
pub mod system;
pub mod users;

pub use auth::AuthApi;
pub use collections::CollectionsApi;
pub use folders::FoldersApi;
pub use media::MediaApi;
pub use providers::ProvidersApi;
pub use releases::ReleasesApi;
pub use shows::ShowsApi;
pub use system::SystemApi;
pub use users::{TokensApi, UsersApi};

/// Body argument for operations that send none
pub(crate) const NO_BODY: Option<&()> = None;
