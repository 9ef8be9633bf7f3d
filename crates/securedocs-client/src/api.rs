//! The document/folder API as a trait.

use std::fmt;
use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use securedocs_core::result::AppResult;
use securedocs_core::types::{DocumentId, FolderId};
use securedocs_entity::document::{Document, UpdateDocument};
use securedocs_entity::folder::{CreateFolder, Folder, UpdateFolder};

/// A byte stream used for document content.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// A file to upload with `POST /documents`.
pub struct UploadFile {
    /// Name the document is stored under.
    pub file_name: String,
    /// MIME type of the content.
    pub content_type: String,
    /// Content length in bytes.
    pub size: u64,
    /// Target folder; `None` uploads to the root.
    pub folder_id: Option<FolderId>,
    /// The content.
    pub body: ByteStream,
}

impl UploadFile {
    /// An upload of in-memory content.
    pub fn from_bytes(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        folder_id: Option<FolderId>,
        data: Bytes,
    ) -> Self {
        let size = data.len() as u64;
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            size,
            folder_id,
            body: Box::pin(futures::stream::once(async move { Ok(data) })),
        }
    }
}

impl fmt::Debug for UploadFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.size)
            .field("folder_id", &self.folder_id)
            .finish_non_exhaustive()
    }
}

/// Operations offered by the document API server.
///
/// Every call is made on behalf of the signed-in user. Implementations
/// fail with `Unauthenticated` without contacting the server when there
/// is no session.
#[async_trait]
pub trait DocumentApi: Send + Sync + fmt::Debug + 'static {
    /// List folders under `parent_id`, or the root folders for `None`.
    async fn list_folders(&self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>>;

    /// Fetch one folder.
    async fn get_folder(&self, id: FolderId) -> AppResult<Folder>;

    /// Create a folder.
    async fn create_folder(&self, request: &CreateFolder) -> AppResult<Folder>;

    /// Update a folder's name or description.
    async fn update_folder(&self, id: FolderId, request: &UpdateFolder) -> AppResult<Folder>;

    /// Delete a folder.
    async fn delete_folder(&self, id: FolderId) -> AppResult<()>;

    /// List documents in `folder_id`, or in the root for `None`.
    async fn list_documents(&self, folder_id: Option<FolderId>) -> AppResult<Vec<Document>>;

    /// Fetch one document's metadata.
    async fn get_document(&self, id: DocumentId) -> AppResult<Document>;

    /// Download a document's content into memory.
    async fn download(&self, id: DocumentId) -> AppResult<Bytes>;

    /// Download a document's content as a stream.
    async fn download_stream(&self, id: DocumentId) -> AppResult<ByteStream>;

    /// Upload a new document.
    async fn upload(&self, file: UploadFile) -> AppResult<Document>;

    /// Rename, move or describe a document.
    async fn update_document(&self, id: DocumentId, request: &UpdateDocument) -> AppResult<Document>;

    /// Delete a document.
    async fn delete_document(&self, id: DocumentId) -> AppResult<()>;
}
