//! Persistence of the refresh token between command invocations.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use securedocs_core::error::AppError;

/// What is written to the session file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    /// Refresh token of the last login.
    pub refresh_token: String,
    /// Username shown while the session is being restored.
    #[serde(default)]
    pub username: Option<String>,
    /// When the session was saved.
    pub saved_at: DateTime<Utc>,
}

/// File-backed store for a single session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    /// Location of the session file.
    path: PathBuf,
}

impl SessionStore {
    /// Creates a store writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the stored session, `None` when no file exists.
    pub async fn load(&self) -> Result<Option<StoredSession>, AppError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Saves `refresh_token`, replacing any previous session.
    pub async fn save(&self, refresh_token: &str, username: Option<&str>) -> Result<(), AppError> {
        let stored = StoredSession {
            refresh_token: refresh_token.to_string(),
            username: username.map(String::from),
            saved_at: Utc::now(),
        };
        let json = serde_json::to_vec_pretty(&stored)?;
        tokio::fs::write(&self.path, json).await?;
        tracing::debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    /// Removes the session file. A missing file is not an error.
    pub async fn clear(&self) -> Result<(), AppError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
