//! In-memory `DocumentApi` used by the service tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use futures::TryStreamExt;

use securedocs_client::{ByteStream, DocumentApi, UploadFile};
use securedocs_core::error::AppError;
use securedocs_core::result::AppResult;
use securedocs_core::types::{DocumentId, FolderId, UserId};
use securedocs_entity::document::{Document, UpdateDocument};
use securedocs_entity::folder::{CreateFolder, Folder, UpdateFolder};

pub(crate) fn folder(name: &str, parent_id: Option<FolderId>) -> Folder {
    let now = Utc::now();
    Folder {
        id: FolderId::new(),
        name: name.to_string(),
        description: None,
        parent_id,
        created_by: owner(),
        owner_id: owner(),
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn document(name: &str, content_type: &str, folder_id: Option<FolderId>) -> Document {
    let now = Utc::now();
    Document {
        id: DocumentId::new(),
        name: name.to_string(),
        description: None,
        content_type: content_type.to_string(),
        size: 0,
        checksum: String::new(),
        folder_id,
        created_by: owner(),
        owner_id: owner(),
        created_at: now,
        updated_at: now,
    }
}

pub(crate) fn owner() -> UserId {
    UserId::from_uuid(uuid::Uuid::from_u128(0xA11CE))
}

#[derive(Debug, Default)]
struct Store {
    folders: HashMap<FolderId, Folder>,
    documents: Vec<Document>,
    content: HashMap<DocumentId, Bytes>,
    uploads: Vec<(String, String, Option<FolderId>, Bytes)>,
}

/// Fake API server state with failure and latency injection.
#[derive(Debug, Default)]
pub(crate) struct InMemoryApi {
    store: Mutex<Store>,
    broken_folders: Mutex<HashSet<FolderId>>,
    broken_listings: Mutex<HashSet<Option<FolderId>>>,
    broken_downloads: Mutex<HashSet<DocumentId>>,
    listing_delays: Mutex<HashMap<Option<FolderId>, Duration>>,
    pub(crate) folder_fetches: AtomicUsize,
    pub(crate) downloads: AtomicUsize,
}

impl InMemoryApi {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_folder(&self, folder: Folder) -> Folder {
        self.store
            .lock()
            .unwrap()
            .folders
            .insert(folder.id, folder.clone());
        folder
    }

    pub(crate) fn add_document(&self, document: Document, content: &[u8]) -> Document {
        let mut store = self.store.lock().unwrap();
        store
            .content
            .insert(document.id, Bytes::copy_from_slice(content));
        store.documents.push(document.clone());
        document
    }

    /// Build a chain of `depth + 1` folders and return it root first.
    pub(crate) fn add_chain(&self, depth: usize) -> Vec<Folder> {
        let mut chain = Vec::with_capacity(depth + 1);
        let mut parent = None;
        for level in 0..=depth {
            let f = self.add_folder(folder(&format!("level-{level}"), parent));
            parent = Some(f.id);
            chain.push(f);
        }
        chain
    }

    pub(crate) fn break_folder(&self, id: FolderId) {
        self.broken_folders.lock().unwrap().insert(id);
    }

    pub(crate) fn break_listing(&self, parent: Option<FolderId>) {
        self.broken_listings.lock().unwrap().insert(parent);
    }

    pub(crate) fn break_download(&self, id: DocumentId) {
        self.broken_downloads.lock().unwrap().insert(id);
    }

    pub(crate) fn delay_listing(&self, parent: Option<FolderId>, delay: Duration) {
        self.listing_delays.lock().unwrap().insert(parent, delay);
    }

    pub(crate) fn set_parent(&self, id: FolderId, parent: Option<FolderId>) {
        if let Some(f) = self.store.lock().unwrap().folders.get_mut(&id) {
            f.parent_id = parent;
        }
    }

    pub(crate) fn uploads(&self) -> Vec<(String, String, Option<FolderId>, Bytes)> {
        self.store.lock().unwrap().uploads.clone()
    }

    pub(crate) fn document_count(&self) -> usize {
        self.store.lock().unwrap().documents.len()
    }

    async fn listing_delay(&self, parent: Option<FolderId>) -> AppResult<()> {
        let delay = self.listing_delays.lock().unwrap().get(&parent).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.broken_listings.lock().unwrap().contains(&parent) {
            return Err(AppError::server("listing failed"));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentApi for InMemoryApi {
    async fn list_folders(&self, parent_id: Option<FolderId>) -> AppResult<Vec<Folder>> {
        self.listing_delay(parent_id).await?;
        let store = self.store.lock().unwrap();
        Ok(store
            .folders
            .values()
            .filter(|f| f.parent_id == parent_id)
            .cloned()
            .collect())
    }

    async fn get_folder(&self, id: FolderId) -> AppResult<Folder> {
        self.folder_fetches.fetch_add(1, Ordering::SeqCst);
        if self.broken_folders.lock().unwrap().contains(&id) {
            return Err(AppError::forbidden("no access to folder"));
        }
        self.store
            .lock()
            .unwrap()
            .folders
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    async fn create_folder(&self, request: &CreateFolder) -> AppResult<Folder> {
        request.check()?;
        let mut created = folder(&request.name, request.parent_id);
        created.description = request.description.clone();
        Ok(self.add_folder(created))
    }

    async fn update_folder(&self, id: FolderId, request: &UpdateFolder) -> AppResult<Folder> {
        request.check()?;
        let mut store = self.store.lock().unwrap();
        let f = store
            .folders
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found("Folder not found"))?;
        if let Some(name) = &request.name {
            f.name = name.clone();
        }
        if let Some(description) = &request.description {
            f.description = Some(description.clone());
        }
        Ok(f.clone())
    }

    async fn delete_folder(&self, id: FolderId) -> AppResult<()> {
        self.store
            .lock()
            .unwrap()
            .folders
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found("Folder not found"))
    }

    async fn list_documents(&self, folder_id: Option<FolderId>) -> AppResult<Vec<Document>> {
        self.listing_delay(folder_id).await?;
        let store = self.store.lock().unwrap();
        Ok(store
            .documents
            .iter()
            .filter(|d| d.folder_id == folder_id)
            .cloned()
            .collect())
    }

    async fn get_document(&self, id: DocumentId) -> AppResult<Document> {
        self.store
            .lock()
            .unwrap()
            .documents
            .iter()
            .find(|d| d.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Document not found"))
    }

    async fn download(&self, id: DocumentId) -> AppResult<Bytes> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        if self.broken_downloads.lock().unwrap().contains(&id) {
            return Err(AppError::network("connection reset"));
        }
        self.store
            .lock()
            .unwrap()
            .content
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Document not found"))
    }

    async fn download_stream(&self, id: DocumentId) -> AppResult<ByteStream> {
        let data = self.download(id).await?;
        let chunks: Vec<Result<Bytes, std::io::Error>> = data
            .chunks(4)
            .map(|c| Ok(Bytes::copy_from_slice(c)))
            .collect();
        Ok(Box::pin(futures::stream::iter(chunks)))
    }

    async fn upload(&self, file: UploadFile) -> AppResult<Document> {
        let chunks: Vec<Bytes> = file.body.try_collect().await?;
        let data = Bytes::from(chunks.concat());

        let mut created = document(&file.file_name, &file.content_type, file.folder_id);
        created.size = data.len() as u64;

        let mut store = self.store.lock().unwrap();
        store.uploads.push((
            file.file_name,
            file.content_type,
            file.folder_id,
            data.clone(),
        ));
        store.content.insert(created.id, data);
        store.documents.push(created.clone());
        Ok(created)
    }

    async fn update_document(&self, id: DocumentId, request: &UpdateDocument) -> AppResult<Document> {
        let mut store = self.store.lock().unwrap();
        let d = store
            .documents
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| AppError::not_found("Document not found"))?;
        if let Some(name) = &request.name {
            d.name = name.clone();
        }
        if let Some(description) = &request.description {
            d.description = Some(description.clone());
        }
        if let Some(folder_id) = request.folder_id {
            d.folder_id = folder_id;
        }
        Ok(d.clone())
    }

    async fn delete_document(&self, id: DocumentId) -> AppResult<()> {
        let mut store = self.store.lock().unwrap();
        let before = store.documents.len();
        store.documents.retain(|d| d.id != id);
        if store.documents.len() == before {
            return Err(AppError::not_found("Document not found"));
        }
        store.content.remove(&id);
        Ok(())
    }
}
