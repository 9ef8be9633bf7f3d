//! Folder content listing.

use std::sync::Arc;

use serde::Serialize;

use securedocs_client::DocumentApi;
use securedocs_core::config::NavigationConfig;
use securedocs_core::result::AppResult;
use securedocs_core::types::FolderId;
use securedocs_entity::document::Document;
use securedocs_entity::folder::Folder;

/// Children of one folder.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FolderContents {
    /// The listed folder; `None` is the root.
    pub folder_id: Option<FolderId>,
    /// Child folders.
    pub folders: Vec<Folder>,
    /// Documents in the folder.
    pub documents: Vec<Document>,
}

impl FolderContents {
    /// Whether the folder has no children at all.
    pub fn is_empty(&self) -> bool {
        self.folders.is_empty() && self.documents.is_empty()
    }

    /// Total number of children.
    pub fn len(&self) -> usize {
        self.folders.len() + self.documents.len()
    }
}

/// Fetches the children of a folder.
#[derive(Debug, Clone)]
pub struct ContentLister {
    /// Listing endpoints.
    api: Arc<dyn DocumentApi>,
    /// Sort children by name.
    sort_by_name: bool,
}

impl ContentLister {
    /// Creates a lister.
    pub fn new(api: Arc<dyn DocumentApi>, config: &NavigationConfig) -> Self {
        Self {
            api,
            sort_by_name: config.sort_by_name,
        }
    }

    /// List folders and documents of `folder_id`.
    ///
    /// Both listings are requested concurrently and both must succeed; a
    /// single failure fails the whole listing.
    pub async fn list(&self, folder_id: Option<FolderId>) -> AppResult<FolderContents> {
        let (mut folders, mut documents) = tokio::try_join!(
            self.api.list_folders(folder_id),
            self.api.list_documents(folder_id),
        )?;

        if self.sort_by_name {
            folders.sort_by_key(|f| f.name.to_lowercase());
            documents.sort_by_key(|d| d.name.to_lowercase());
        }

        tracing::debug!(
            folder_id = ?folder_id,
            folders = folders.len(),
            documents = documents.len(),
            "Folder listed"
        );

        Ok(FolderContents {
            folder_id,
            folders,
            documents,
        })
    }
}
