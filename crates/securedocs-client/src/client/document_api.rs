//! Endpoint implementations.

use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use reqwest::Method;
use reqwest::multipart::{Form, Part};

use securedocs_core::result::AppResult;
use securedocs_core::types::{DocumentId, FolderId};
use securedocs_entity::document::{Document, UpdateDocument};
use securedocs_entity::folder::{CreateFolder, Folder, UpdateFolder};

use super::ApiClient;
use crate::api::{ByteStream, DocumentApi, UploadFile};
use crate::error::transport_error;

#[async_trait]
impl DocumentApi for ApiClient {
    async fn list_folders(&self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>> {
        let mut url = self.endpoint("folders")?;
        if let Some(parent_id) = parent_id {
            url.query_pairs_mut()
                .append_pair("parentId", &parent_id.to_string());
        }
        let request = self.request(Method::GET, url).await?;
        self.send_json(request).await
    }

    async fn get_folder(&self, id: FolderId) -> AppResult<Folder> {
        let url = self.endpoint(&format!("folders/{id}"))?;
        let request = self.request(Method::GET, url).await?;
        self.send_json(request).await
    }

    async fn create_folder(&self, body: &CreateFolder) -> AppResult<Folder> {
        body.check()?;
        let url = self.endpoint("folders")?;
        let request = self.request(Method::POST, url).await?.json(body);
        self.send_json(request).await
    }

    async fn update_folder(&self, id: FolderId, body: &UpdateFolder) -> AppResult<Folder> {
        body.check()?;
        let url = self.endpoint(&format!("folders/{id}"))?;
        let request = self.request(Method::PUT, url).await?.json(body);
        self.send_json(request).await
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<()> {
        let url = self.endpoint(&format!("folders/{id}"))?;
        let request = self.request(Method::DELETE, url).await?;
        self.send_empty(request).await
    }

    async fn list_documents(&self, folder_id: Option<FolderId>) -> AppResult<Vec<Document>> {
        let mut url = self.endpoint("documents")?;
        if let Some(folder_id) = folder_id {
            url.query_pairs_mut()
                .append_pair("folderId", &folder_id.to_string());
        }
        let request = self.request(Method::GET, url).await?;
        self.send_json(request).await
    }

    async fn get_document(&self, id: DocumentId) -> AppResult<Document> {
        let url = self.endpoint(&format!("documents/{id}"))?;
        let request = self.request(Method::GET, url).await?;
        self.send_json(request).await
    }

    async fn download(&self, id: DocumentId) -> AppResult<Bytes> {
        let url = self.endpoint(&format!("documents/{id}/content"))?;
        let request = self.request(Method::GET, url).await?;
        let response = self.send(request).await?;
        response.bytes().await.map_err(transport_error)
    }

    async fn download_stream(&self, id: DocumentId) -> AppResult<ByteStream> {
        let url = self.endpoint(&format!("documents/{id}/content"))?;
        let request = self.request(Method::GET, url).await?;
        let response = self.send(request).await?;
        Ok(Box::pin(response.bytes_stream().map_err(std::io::Error::other)))
    }

    async fn upload(&self, file: UploadFile) -> AppResult<Document> {
        let url = self.endpoint("documents")?;
        // The token is checked before the body stream is consumed.
        let request = self.request(Method::POST, url).await?;

        let part = Part::stream_with_length(reqwest::Body::wrap_stream(file.body), file.size)
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)
            .map_err(transport_error)?;
        let mut form = Form::new().part("file", part);
        if let Some(folder_id) = file.folder_id {
            form = form.text("folderId", folder_id.to_string());
        }

        tracing::debug!(file = %file.file_name, size = file.size, "Uploading document");
        self.send_json(request.multipart(form)).await
    }

    async fn update_document(&self, id: DocumentId, body: &UpdateDocument) -> AppResult<Document> {
        let url = self.endpoint(&format!("documents/{id}"))?;
        let request = self.request(Method::PUT, url).await?.json(body);
        self.send_json(request).await
    }

    async fn delete_document(&self, id: DocumentId) -> AppResult<()> {
        let url = self.endpoint(&format!("documents/{id}"))?;
        let request = self.request(Method::DELETE, url).await?;
        self.send_empty(request).await
    }
}
