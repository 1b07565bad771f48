//! Auth cookie, session resolution, route guard and the account actions
//!
//! The session lives in one cookie, `auth`, holding `{token, user}` as JSON.
//! Each incoming request builds its own [`ApiClient`], restores the bearer
//! token from the cookie and confirms it with `get_me` before any page code
//! runs.

use crate::client::ApiClient;
use crate::endpoints::auth::{GetMe, SigninBody, SignupBody};
use crate::error::{ApiError, ApiResult};
use crate::loader::{capitalize, unwrap_form, unwrap_page, FormErrors, FormOutcome, PageError, Redirect};
use crate::response::{error_types, ApiFailure, ApiResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Cookie name
pub const AUTH_COOKIE: &str = "auth";

const COOKIE_ATTRIBUTES: &str = "Path=/; SameSite=Strict";

/// Paths only anonymous visitors may open
pub const GUEST_ONLY_PATHS: &[&str] = &["/login", "/register"];

/// Path prefixes that require a signed-in user
pub const MEMBER_PREFIXES: &[&str] = &["/taglists", "/playlists", "/account"];

/// User part of the auth cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// User ID
    pub id: String,
    /// Login name
    pub username: String,
}

/// Contents of the `auth` cookie
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCookie {
    /// Bearer token
    pub token: String,
    /// Who the token belongs to
    pub user: SessionUser,
}

impl AuthCookie {
    /// JSON document stored in the cookie
    pub fn to_json(&self) -> ApiResult<String> {
        serde_json::to_string(self).map_err(ApiError::Serialization)
    }

    /// Parse the JSON document stored in the cookie
    pub fn from_json(raw: &str) -> ApiResult<Self> {
        serde_json::from_str(raw).map_err(|e| ApiError::InvalidSession(e.to_string()))
    }

    /// `Set-Cookie` value that stores this session
    pub fn set_cookie(&self) -> ApiResult<String> {
        let json = self.to_json()?;
        Ok(format!(
            "{AUTH_COOKIE}={}; {COOKIE_ATTRIBUTES}",
            urlencoding::encode(&json)
        ))
    }

    /// `Set-Cookie` value that deletes the session
    #[must_use]
    pub fn delete_cookie() -> String {
        format!("{AUTH_COOKIE}=; {COOKIE_ATTRIBUTES}; Max-Age=0")
    }

    /// Find and decode the `auth` cookie in a `Cookie` request header.
    ///
    /// `Ok(None)` when the header has no such cookie.
    pub fn from_cookie_header(header: &str) -> ApiResult<Option<Self>> {
        let Some(raw) = header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == AUTH_COOKIE)
            .map(|(_, value)| value)
        else {
            return Ok(None);
        };

        let json = urlencoding::decode(raw).map_err(|e| ApiError::InvalidSession(e.to_string()))?;
        Self::from_json(&json).map(Some)
    }
}

/// Outcome of restoring a session for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// No cookie
    Anonymous,
    /// Token confirmed; the client now carries it
    SignedIn(GetMe),
    /// Cookie present but unusable: delete it and redirect home
    Expired(Redirect),
}

impl SessionState {
    /// The confirmed user, if any
    #[must_use]
    pub fn user(&self) -> Option<&GetMe> {
        match self {
            Self::SignedIn(user) => Some(user),
            Self::Anonymous | Self::Expired(_) => None,
        }
    }
}

/// Restore the session from the request's cookie.
///
/// A token the backend rejects yields [`SessionState::Expired`]; a backend
/// that cannot be reached yields the generic page error.
pub async fn resolve_session(
    client: &mut ApiClient,
    cookie: Option<&AuthCookie>,
) -> Result<SessionState, PageError> {
    let Some(cookie) = cookie else {
        return Ok(SessionState::Anonymous);
    };

    client.set_authorization_token(Some(&cookie.token));
    match client.auth().get_me(None).await? {
        ApiResponse::Success(me) => {
            debug!(user = %me.username, "Session restored");
            Ok(SessionState::SignedIn(me))
        }
        ApiResponse::Failure(failure) => {
            info!(error_type = %failure.kind, "Stored session rejected, clearing it");
            client.set_authorization_token(None);
            Ok(SessionState::Expired(Redirect::moved_permanently("/")))
        }
    }
}

/// Redirect a request to a section the visitor may not open.
#[must_use]
pub fn guard_route(path: &str, signed_in: bool) -> Option<Redirect> {
    let blocked = if signed_in {
        GUEST_ONLY_PATHS.contains(&path)
    } else {
        MEMBER_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
    };
    blocked.then(|| Redirect::moved_permanently("/"))
}

/// Result of a successful sign-in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedIn {
    /// Session to store
    pub cookie: AuthCookie,
    /// Where to send the user
    pub redirect: Redirect,
}

fn field_message(extra: &Value, field: &str) -> String {
    capitalize(extra.get(field).and_then(Value::as_str).unwrap_or_default())
}

fn validation_errors(failure: &ApiFailure<Value>, fields: &[&str]) -> FormErrors {
    let mut errors = FormErrors::new();
    for field in fields {
        errors.set(*field, field_message(&failure.extra, field));
    }
    errors
}

/// Sign in and build the session cookie.
///
/// On success the client keeps the new bearer token.
pub async fn sign_in(
    client: &mut ApiClient,
    body: &SigninBody,
) -> Result<FormOutcome<SignedIn>, PageError> {
    let response = client.auth().signin(body, None).await?;
    let outcome = unwrap_form(response, |failure| match failure.kind.as_str() {
        error_types::VALIDATION_ERROR => Some(validation_errors(failure, &["username", "password"])),
        error_types::USER_NOT_FOUND => {
            Some(FormErrors::new().with("username", "The user does not exist"))
        }
        error_types::INVALID_CREDENTIALS => {
            Some(FormErrors::new().with("password", "Invalid credentials"))
        }
        _ => None,
    })?;

    let signin = match outcome {
        FormOutcome::Success(signin) => signin,
        FormOutcome::Invalid(errors) => return Ok(FormOutcome::Invalid(errors)),
    };

    client.set_authorization_token(Some(&signin.token));
    let me = unwrap_page(client.auth().get_me(None).await?)?;
    info!(user = %me.username, "Signed in");

    Ok(FormOutcome::Success(SignedIn {
        cookie: AuthCookie {
            token: signin.token,
            user: SessionUser {
                id: me.id,
                username: me.username,
            },
        },
        redirect: Redirect::found("/"),
    }))
}

/// Register an account; success sends the user to the sign-in page.
pub async fn sign_up(
    client: &ApiClient,
    body: &SignupBody,
) -> Result<FormOutcome<Redirect>, PageError> {
    let response = client.auth().signup(body, None).await?;
    let outcome = unwrap_form(response, |failure| match failure.kind.as_str() {
        error_types::VALIDATION_ERROR => Some(validation_errors(
            failure,
            &["username", "password", "passwordConfirm"],
        )),
        error_types::USER_ALREADY_EXISTS => {
            Some(FormErrors::new().with("username", "User already exists"))
        }
        _ => None,
    })?;

    Ok(match outcome {
        FormOutcome::Success(signup) => {
            info!(user = %signup.username, "Account created");
            FormOutcome::Success(Redirect::found("/login"))
        }
        FormOutcome::Invalid(errors) => FormOutcome::Invalid(errors),
    })
}

/// Drop the token; returns the cookie deletion and the redirect to send.
pub fn sign_out(client: &mut ApiClient) -> (String, Redirect) {
    client.set_authorization_token(None);
    (AuthCookie::delete_cookie(), Redirect::see_other("/login"))
}
