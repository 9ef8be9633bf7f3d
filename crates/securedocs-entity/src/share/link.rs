//! Share link value object.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A link granting external access to a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareLink {
    /// The share token embedded in the public URL.
    pub token: String,
    /// When the link stops working (None = never).
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether opening the link requires a one-time password.
    #[serde(default)]
    pub requires_otp: bool,
}

impl ShareLink {
    /// Check if the link has expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|exp| exp <= now).unwrap_or(false)
    }

    /// Check if the link has expired.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Path of the public share route for this link.
    pub fn path(&self) -> String {
        format!("/share/{}", self.token)
    }

    /// Full public URL of the link under `origin`.
    pub fn url(&self, origin: &str) -> String {
        format!("{}{}", origin.trim_end_matches('/'), self.path())
    }
}
