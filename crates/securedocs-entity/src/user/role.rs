//! User role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use securedocs_core::error::AppError;

/// Application roles granted by the identity provider.
///
/// Role claims arrive as upper-case strings (`ADMIN`, `EDITOR`, `VIEWER`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    /// Full administrator, including the admin area.
    Admin,
    /// May upload, edit, delete and share documents.
    Editor,
    /// Read-only access.
    Viewer,
}

impl UserRole {
    /// Return the role as its claim string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Editor => "EDITOR",
            Self::Viewer => "VIEWER",
        }
    }

    /// Whether the role may change content (upload, edit, delete, share).
    pub fn can_modify(&self) -> bool {
        matches!(self, Self::Admin | Self::Editor)
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "EDITOR" => Ok(Self::Editor),
            "VIEWER" => Ok(Self::Viewer),
            _ => Err(AppError::validation(format!("Invalid role: '{s}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("editor".parse::<UserRole>().unwrap(), UserRole::Editor);
        assert!("offline_access".parse::<UserRole>().is_err());
    }

    #[test]
    fn test_can_modify() {
        assert!(UserRole::Admin.can_modify());
        assert!(UserRole::Editor.can_modify());
        assert!(!UserRole::Viewer.can_modify());
    }
}
