//! Folder creation, renaming and deletion.

use std::sync::Arc;

use securedocs_client::DocumentApi;
use securedocs_core::error::AppError;
use securedocs_core::result::AppResult;
use securedocs_core::types::FolderId;
use securedocs_entity::folder::{CreateFolder, Folder, UpdateFolder};

use crate::context::UserContext;

/// Manages folders for users whose roles allow changes.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder endpoints.
    api: Arc<dyn DocumentApi>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(api: Arc<dyn DocumentApi>) -> Self {
        Self { api }
    }

    fn require_edit(ctx: &UserContext) -> AppResult<()> {
        if ctx.capabilities.can_edit {
            Ok(())
        } else {
            Err(AppError::forbidden("Your role does not allow changing folders"))
        }
    }

    /// Fetch one folder.
    pub async fn get(&self, id: FolderId) -> AppResult<Folder> {
        self.api.get_folder(id).await
    }

    /// Create a folder under `parent_id`.
    ///
    /// The name is validated before anything is sent.
    pub async fn create(
        &self,
        ctx: &UserContext,
        name: &str,
        parent_id: Option<FolderId>,
        description: Option<String>,
    ) -> AppResult<Folder> {
        let request = CreateFolder::new(name, parent_id).with_description(description);
        request.check()?;
        Self::require_edit(ctx)?;

        let folder = self.api.create_folder(&request).await?;
        tracing::info!(folder_id = %folder.id, name = %folder.name, "Folder created");
        Ok(folder)
    }

    /// Rename a folder.
    pub async fn rename(&self, ctx: &UserContext, id: FolderId, name: &str) -> AppResult<Folder> {
        let request = UpdateFolder::rename(name);
        request.check()?;
        Self::require_edit(ctx)?;

        let folder = self.api.update_folder(id, &request).await?;
        tracing::info!(folder_id = %id, name = %folder.name, "Folder renamed");
        Ok(folder)
    }

    /// Delete a folder.
    pub async fn delete(&self, ctx: &UserContext, id: FolderId) -> AppResult<()> {
        if !ctx.capabilities.can_delete {
            return Err(AppError::forbidden("Your role does not allow deleting folders"));
        }
        self.api.delete_folder(id).await?;
        tracing::info!(folder_id = %id, "Folder deleted");
        Ok(())
    }
}
