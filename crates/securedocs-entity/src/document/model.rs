//! Document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use securedocs_core::types::{DocumentId, FolderId, UserId};

/// A document stored on the API server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Unique document identifier.
    pub id: DocumentId,
    /// Display name (usually including the extension).
    pub name: String,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Declared MIME type; empty when the server did not record one.
    #[serde(default)]
    pub content_type: String,
    /// Content size in bytes.
    pub size: u64,
    /// Checksum of the content as reported by the server.
    #[serde(default)]
    pub checksum: String,
    /// Containing folder (None for documents at the root).
    #[serde(default)]
    pub folder_id: Option<FolderId>,
    /// The user who uploaded the document.
    pub created_by: UserId,
    /// The document owner.
    pub owner_id: UserId,
    /// When the document was created.
    pub created_at: DateTime<Utc>,
    /// When the document was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Document {
    /// Check if the document sits at the root (no folder).
    pub fn is_in_root(&self) -> bool {
        self.folder_id.is_none()
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name && !ext.is_empty())
            .map(|ext| ext.to_lowercase())
    }

    /// The checksum as a SHA-256 hex digest, when it has that shape.
    pub fn sha256_checksum(&self) -> Option<&str> {
        let checksum = self.checksum.trim();
        let is_hex = checksum.len() == 64 && checksum.chars().all(|c| c.is_ascii_hexdigit());
        is_hex.then_some(checksum)
    }
}

/// Partial update sent with `PUT /documents/<id>`.
///
/// Only fields that are set are serialized. `folder_id: Some(None)` is sent
/// as an explicit `null` and moves the document to the root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocument {
    /// New display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New containing folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<Option<FolderId>>,
}

impl UpdateDocument {
    /// Rename the document.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Move the document into a folder, or to the root with `None`.
    pub fn move_to(folder_id: Option<FolderId>) -> Self {
        Self {
            folder_id: Some(folder_id),
            ..Self::default()
        }
    }

    /// Whether the update carries no change at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.folder_id.is_none()
    }
}
