//! Permission record.

use serde::{Deserialize, Serialize};

use securedocs_core::types::UserId;

/// Actions a user can attempt on a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentAction {
    /// View, preview or download.
    Read,
    /// Rename, move, or upload a new version.
    Write,
    /// Delete the document.
    Delete,
    /// Create share links.
    Share,
}

impl DocumentAction {
    /// Return the action as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::Delete => "delete",
            Self::Share => "share",
        }
    }
}

impl std::fmt::Display for DocumentAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's access rights on one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    /// The user the rights apply to.
    pub user_id: UserId,
    /// May view and download.
    pub can_read: bool,
    /// May rename, move and replace content.
    pub can_write: bool,
    /// May delete.
    pub can_delete: bool,
    /// May create share links.
    pub can_share: bool,
}

impl Permission {
    /// Read-only access.
    pub fn read_only(user_id: UserId) -> Self {
        Self {
            user_id,
            can_read: true,
            can_write: false,
            can_delete: false,
            can_share: false,
        }
    }

    /// Every right.
    pub fn full(user_id: UserId) -> Self {
        Self {
            user_id,
            can_read: true,
            can_write: true,
            can_delete: true,
            can_share: true,
        }
    }

    /// Check whether the permission allows `action`.
    pub fn allows(&self, action: DocumentAction) -> bool {
        match action {
            DocumentAction::Read => self.can_read,
            DocumentAction::Write => self.can_write,
            DocumentAction::Delete => self.can_delete,
            DocumentAction::Share => self.can_share,
        }
    }
}
