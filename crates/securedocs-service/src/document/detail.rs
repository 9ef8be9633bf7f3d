//! The document detail view model.

use serde::Serialize;

use securedocs_entity::document::Document;
use securedocs_entity::permission::Permission;

use crate::context::UserContext;
use crate::format::{DocumentIcon, format_file_size};
use crate::preview::PreviewMode;

/// Message shown when a document cannot be opened.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load document. The document may have been \
     deleted or you might not have permission to view it.";

/// Everything the detail screen shows about one document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentDetail {
    pub document: Document,
    /// The user's rights on this document.
    pub permission: Permission,
    pub preview_mode: PreviewMode,
    pub icon: DocumentIcon,
    /// Human-readable size.
    pub size_label: String,
}

impl DocumentDetail {
    /// Build the view model of `document` for `ctx`'s user.
    pub fn new(ctx: &UserContext, document: Document) -> Self {
        Self {
            permission: ctx.permission_on(&document),
            preview_mode: PreviewMode::for_content_type(&document.content_type),
            icon: DocumentIcon::for_content_type(&document.content_type),
            size_label: format_file_size(document.size),
            document,
        }
    }
}
