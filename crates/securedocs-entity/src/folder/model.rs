//! Folder entity model and request bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use securedocs_core::error::AppError;
use securedocs_core::types::{FolderId, UserId};

/// A folder in the document hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Optional free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Parent folder ID (null for root folders).
    #[serde(default)]
    pub parent_id: Option<FolderId>,
    /// The user who created the folder.
    pub created_by: UserId,
    /// The folder owner.
    pub owner_id: UserId,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Body of `POST /folders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolder {
    /// Folder name.
    #[validate(
        length(min = 1, max = 255, message = "Folder name is required"),
        custom(function = "validate_folder_name")
    )]
    pub name: String,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Parent folder (None creates a root folder).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<FolderId>,
}

impl CreateFolder {
    /// Build a request for a folder under `parent_id`.
    pub fn new(name: impl Into<String>, parent_id: Option<FolderId>) -> Self {
        Self {
            name: name.into().trim().to_string(),
            description: None,
            parent_id,
        }
    }

    /// Attach a description; blank descriptions are dropped.
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = description.filter(|d| !d.trim().is_empty());
        self
    }

    /// Validate the request, mapping failures into [`AppError`].
    pub fn check(&self) -> Result<(), AppError> {
        self.validate().map_err(validation_error)
    }
}

/// Body of `PUT /folders/<id>`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFolder {
    /// New folder name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(
        length(min = 1, max = 255, message = "Folder name is required"),
        custom(function = "validate_folder_name")
    )]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdateFolder {
    /// Rename the folder.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into().trim().to_string()),
            description: None,
        }
    }

    /// Validate the request, mapping failures into [`AppError`].
    pub fn check(&self) -> Result<(), AppError> {
        self.validate().map_err(validation_error)
    }
}

/// Folder names may only contain letters, numbers, whitespace, `.`, `_`, and `-`.
fn validate_folder_name(name: &str) -> Result<(), ValidationError> {
    let allowed = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '.' | '_' | '-'));

    if allowed {
        Ok(())
    } else {
        let mut err = ValidationError::new("folder_name");
        err.message = Some(
            "Folder name can only contain letters, numbers, spaces, and these characters: . _ -"
                .into(),
        );
        Err(err)
    }
}

fn validation_error(errors: validator::ValidationErrors) -> AppError {
    let message = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter())
        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .next()
        .unwrap_or_else(|| errors.to_string());

    AppError::validation(message)
}
