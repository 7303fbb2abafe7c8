//! Session state and persistence
//!
//! The backend hands out a bearer token on login; the token and the
//! resolved member identity travel together as an explicit [`Session`]
//! value passed to whichever client needs it. Persistence is a small
//! JSON file so a restart does not force a fresh login.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::User;

/// An authenticated session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token attached to backend requests
    pub token: String,
    /// The member this session belongs to, once resolved via `/api/auth/me`
    #[serde(default)]
    pub user: Option<User>,
    /// When the token was obtained
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a session from a freshly issued token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user: None,
            created_at: Utc::now(),
        }
    }

    /// Attach the resolved member identity.
    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    /// Whether the event-creation flow should offer travel-time scheduling.
    pub fn travel_time_enabled(&self) -> bool {
        self.user
            .as_ref()
            .map(|u| u.travel_time_enabled())
            .unwrap_or(false)
    }
}

/// File-backed session store
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Create a store persisting to the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Load the saved session, if any.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path)?;
        let session: Session = serde_json::from_str(&content)
            .map_err(|e| Error::Session(format!("Corrupt session file: {}", e)))?;

        debug!("Loaded session from {}", self.path.display());
        Ok(Some(session))
    }

    /// Persist a session, creating parent directories as needed.
    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(session)?;
        std::fs::write(&self.path, content)?;

        debug!("Saved session to {}", self.path.display());
        Ok(())
    }

    /// Remove the saved session (logout).
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
