//! Document lookups and edits.

use std::sync::Arc;

use securedocs_client::DocumentApi;
use securedocs_core::error::AppError;
use securedocs_core::result::AppResult;
use securedocs_core::types::{DocumentId, FolderId};
use securedocs_entity::document::{Document, UpdateDocument};
use securedocs_entity::permission::DocumentAction;

use super::detail::{DocumentDetail, LOAD_FAILED_MESSAGE};
use crate::context::UserContext;

/// Opens, renames, moves, describes and deletes documents.
#[derive(Debug, Clone)]
pub struct DocumentService {
    /// Document endpoints.
    api: Arc<dyn DocumentApi>,
}

impl DocumentService {
    /// Creates a new document service.
    pub fn new(api: Arc<dyn DocumentApi>) -> Self {
        Self { api }
    }

    /// Load the detail view of a document.
    ///
    /// Session failures pass through unchanged so the caller can start a
    /// login; other failures carry the generic load message.
    pub async fn detail(&self, ctx: &UserContext, id: DocumentId) -> AppResult<DocumentDetail> {
        let document = self.api.get_document(id).await.map_err(|e| {
            if e.is_session_failure() {
                e
            } else {
                tracing::warn!(document_id = %id, error = %e, "Failed to load document");
                AppError::with_source(e.kind, LOAD_FAILED_MESSAGE, e)
            }
        })?;
        Ok(DocumentDetail::new(ctx, document))
    }

    /// Load a document and check that `action` is allowed on it.
    async fn authorized(
        &self,
        ctx: &UserContext,
        id: DocumentId,
        action: DocumentAction,
    ) -> AppResult<Document> {
        let document = self.api.get_document(id).await?;
        if !ctx.permission_on(&document).allows(action) {
            return Err(AppError::forbidden(format!(
                "Not allowed to {action} '{}'",
                document.name
            )));
        }
        Ok(document)
    }

    /// Rename a document.
    pub async fn rename(&self, ctx: &UserContext, id: DocumentId, name: &str) -> AppResult<Document> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Document name is required"));
        }
        self.authorized(ctx, id, DocumentAction::Write).await?;
        let updated = self
            .api
            .update_document(id, &UpdateDocument::rename(name))
            .await?;
        tracing::info!(document_id = %id, name, "Document renamed");
        Ok(updated)
    }

    /// Move a document into `folder_id`, or to the root.
    pub async fn move_to(
        &self,
        ctx: &UserContext,
        id: DocumentId,
        folder_id: Option<FolderId>,
    ) -> AppResult<Document> {
        let document = self.authorized(ctx, id, DocumentAction::Write).await?;
        if document.folder_id == folder_id {
            return Ok(document);
        }
        if let Some(folder_id) = folder_id {
            // Fails with NotFound before the document is touched.
            self.api.get_folder(folder_id).await?;
        }
        let updated = self
            .api
            .update_document(id, &UpdateDocument::move_to(folder_id))
            .await?;
        tracing::info!(document_id = %id, folder_id = ?folder_id, "Document moved");
        Ok(updated)
    }

    /// Set or clear a document's description.
    pub async fn describe(
        &self,
        ctx: &UserContext,
        id: DocumentId,
        description: &str,
    ) -> AppResult<Document> {
        self.authorized(ctx, id, DocumentAction::Write).await?;
        let update = UpdateDocument {
            description: Some(description.trim().to_string()),
            ..UpdateDocument::default()
        };
        self.api.update_document(id, &update).await
    }

    /// Delete a document.
    pub async fn delete(&self, ctx: &UserContext, id: DocumentId) -> AppResult<()> {
        let document = self.authorized(ctx, id, DocumentAction::Delete).await?;
        self.api.delete_document(id).await?;
        tracing::info!(document_id = %id, name = %document.name, "Document deleted");
        Ok(())
    }
}
