//! Persisted auth session
//!
//! The file holds the same JSON document the web front end keeps in its
//! `auth` cookie.

use anyhow::{Context as _, Result};
use std::fs;
use std::path::{Path, PathBuf};
use watchbook_api_client::session::AuthCookie;

/// Overrides the config directory
pub const CONFIG_DIR_ENV: &str = "WATCHBOOK_CONFIG_DIR";

const SESSION_FILE: &str = "auth.json";

/// Location of the stored session
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// `$WATCHBOOK_CONFIG_DIR/auth.json`, else `<config_dir>/watchbook/auth.json`
    pub fn from_env() -> Result<Self> {
        let dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => dirs::config_dir()
                .context("no config directory on this system")?
                .join("watchbook"),
        };
        Ok(Self::in_dir(dir))
    }

    /// Store inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored session, `None` when signed out
    pub fn load(&self) -> Result<Option<AuthCookie>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("reading {}", self.path.display()))?;
        Ok(Some(AuthCookie::from_json(&raw)?))
    }

    pub fn save(&self, cookie: &AuthCookie) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&self.path, cookie.to_json()?)
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }

    /// Remove the stored session; a missing file is fine
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("removing {}", self.path.display())),
        }
    }
}
