//! Client settings: backend address, timeout, user agent
//!
//! `API_ADDRESS` names the backend. Server-side callers that run next to the
//! backend leave it unset and get [`DEFAULT_API_ADDRESS`].

use crate::error::{ApiError, ApiResult};
use std::env;
use std::time::Duration;

/// Default backend address when `API_ADDRESS` is not set
pub const DEFAULT_API_ADDRESS: &str = "http://localhost:3000";

/// Environment variable holding the backend address
pub const API_ADDRESS_ENV: &str = "API_ADDRESS";

/// Environment variable holding the request timeout in seconds
pub const TIMEOUT_ENV: &str = "WATCHBOOK_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address of the backend, e.g. `http://localhost:3000`
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Value sent as `User-Agent`
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_ADDRESS.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("watchbook-api-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Blank or missing address means the default
fn base_url_from(raw: Option<String>) -> String {
    raw.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_API_ADDRESS.to_string())
}

fn timeout_from(raw: Option<String>) -> ApiResult<Duration> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_TIMEOUT);
    };
    raw.trim()
        .parse()
        .map(Duration::from_secs)
        .map_err(|_| ApiError::config(format!("{TIMEOUT_ENV} must be a whole number of seconds, got `{raw}`")))
}

impl ClientConfig {
    /// Read `API_ADDRESS` and `WATCHBOOK_TIMEOUT_SECS`, then validate.
    pub fn from_env() -> ApiResult<Self> {
        let config = Self {
            base_url: base_url_from(env::var(API_ADDRESS_ENV).ok()),
            timeout: timeout_from(env::var(TIMEOUT_ENV).ok())?,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Use another backend address
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Use another per-request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send another `User-Agent`
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Reject empty or non-http(s) addresses and a zero timeout
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !["http://", "https://"].iter().any(|s| self.base_url.starts_with(s)) {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}
