//! Per-invocation client and session

use crate::store::SessionStore;
use crate::OutputFormat;
use anyhow::{bail, Result};
use owo_colors::OwoColorize;
use tracing::debug;
use watchbook_api_client::endpoints::auth::GetMe;
use watchbook_api_client::prelude::*;

/// Everything a command needs
pub struct Context {
    pub client: ApiClient,
    pub store: SessionStore,
    pub format: OutputFormat,
}

impl Context {
    /// Build the client from the environment, with `api` taking precedence
    pub fn new(api: Option<&str>, format: OutputFormat) -> Result<Self> {
        let mut config = ClientConfig::from_env()?;
        if let Some(api) = api.map(str::trim).filter(|a| !a.is_empty()) {
            config = config.with_base_url(api);
        }
        debug!(base_url = %config.base_url, "Using backend");

        Ok(Self {
            client: ApiClient::with_config(config)?,
            store: SessionStore::from_env()?,
            format,
        })
    }

    pub fn json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Restore the stored session; the client carries its token afterwards.
    ///
    /// A session the backend rejects, or a file that no longer parses, is
    /// removed and the command continues signed out.
    pub async fn session(&mut self) -> Result<SessionState> {
        let cookie = match self.store.load() {
            Ok(cookie) => cookie,
            Err(e) => {
                debug!(error = %e, "Discarding unreadable session");
                self.expire()?;
                return Ok(SessionState::Anonymous);
            }
        };

        let state = resolve_session(&mut self.client, cookie.as_ref()).await?;
        if let SessionState::Expired(_) = state {
            self.expire()?;
        }
        Ok(state)
    }

    /// The signed-in user, or an error telling how to sign in
    pub async fn require_user(&mut self) -> Result<GetMe> {
        match self.session().await? {
            SessionState::SignedIn(me) => Ok(me),
            SessionState::Anonymous | SessionState::Expired(_) => {
                bail!("not signed in, run `watchbook login <username>` first")
            }
        }
    }

    fn expire(&mut self) -> Result<()> {
        self.store.clear()?;
        if !self.json() {
            eprintln!("{}", "Stored session expired, signed out.".yellow());
        }
        Ok(())
    }
}
