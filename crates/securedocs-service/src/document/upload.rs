//! Uploading local files.

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use tokio_util::io::ReaderStream;

use securedocs_client::{DocumentApi, UploadFile};
use securedocs_core::error::{AppError, ErrorKind};
use securedocs_core::result::AppResult;
use securedocs_core::types::FolderId;
use securedocs_entity::document::Document;

use crate::context::UserContext;

/// Uploads documents on behalf of users allowed to.
#[derive(Debug, Clone)]
pub struct UploadService {
    /// Upload endpoint.
    api: Arc<dyn DocumentApi>,
}

/// The stored name for an upload: the custom name, if given, keeps the
/// original file's extension.
pub fn upload_name(original: &str, custom: Option<&str>) -> String {
    let Some(custom) = custom.map(str::trim).filter(|c| !c.is_empty()) else {
        return original.to_string();
    };

    match Path::new(original).extension().and_then(|e| e.to_str()) {
        Some(ext) if !ext.is_empty() => format!("{custom}.{ext}"),
        _ => custom.to_string(),
    }
}

/// Guess a content type from a file name.
pub fn guess_content_type(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(api: Arc<dyn DocumentApi>) -> Self {
        Self { api }
    }

    /// Upload the file at `path` into `folder_id`.
    pub async fn upload_file(
        &self,
        ctx: &UserContext,
        path: &Path,
        folder_id: Option<FolderId>,
        custom_name: Option<&str>,
    ) -> AppResult<Document> {
        ctx.capabilities.require_upload()?;

        let original = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| AppError::validation(format!("Not a file: {}", path.display())))?;

        let file = tokio::fs::File::open(path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Io,
                format!("Failed to open {}", path.display()),
                e,
            )
        })?;
        let metadata = file.metadata().await?;
        if !metadata.is_file() {
            return Err(AppError::validation(format!("Not a file: {}", path.display())));
        }

        let upload = UploadFile {
            file_name: upload_name(original, custom_name),
            content_type: guess_content_type(original),
            size: metadata.len(),
            folder_id,
            body: Box::pin(ReaderStream::new(file)),
        };
        self.send(upload).await
    }

    /// Upload in-memory content named `file_name`.
    pub async fn upload_bytes(
        &self,
        ctx: &UserContext,
        file_name: &str,
        folder_id: Option<FolderId>,
        data: Bytes,
    ) -> AppResult<Document> {
        ctx.capabilities.require_upload()?;
        let upload = UploadFile::from_bytes(file_name, guess_content_type(file_name), folder_id, data);
        self.send(upload).await
    }

    async fn send(&self, upload: UploadFile) -> AppResult<Document> {
        let name = upload.file_name.clone();
        let document = self.api.upload(upload).await?;
        tracing::info!(document_id = %document.id, name = %name, size = document.size, "Document uploaded");
        Ok(document)
    }
}
