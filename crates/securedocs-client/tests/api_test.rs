//! HTTP-level tests of `ApiClient` against an in-process mock API server.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::extract::{Multipart, Path, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use bytes::Bytes;
use futures::TryStreamExt;
use serde_json::{Value, json};

use securedocs_auth::session::{SessionProvider, StaticSession};
use securedocs_client::{ApiClient, DocumentApi, UploadFile};
use securedocs_core::error::ErrorKind;
use securedocs_core::types::{DocumentId, FolderId};
use securedocs_entity::document::UpdateDocument;
use securedocs_entity::folder::{CreateFolder, UpdateFolder};

const TOKEN: &str = "test-token";
const OWNER: &str = "0b0e6d3e-4f1f-4a35-8f2e-3d7f9e1c2a11";
const MISSING: &str = "00000000-0000-0000-0000-000000000404";
const BROKEN: &str = "00000000-0000-0000-0000-000000000500";

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    uri: String,
    authorization: Option<String>,
}

#[derive(Clone, Default)]
struct Mock {
    requests: Arc<Mutex<Vec<Recorded>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
    uploads: Arc<Mutex<Vec<(String, String, Bytes)>>>,
}

impl Mock {
    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

fn folder_json(id: &str, name: &str, parent: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": name,
        "parentId": parent,
        "createdBy": OWNER,
        "ownerId": OWNER,
        "createdAt": "2024-03-01T10:00:00Z",
        "updatedAt": "2024-03-01T10:00:00Z",
    })
}

fn document_json(id: &str, name: &str, folder: Option<&str>) -> Value {
    json!({
        "id": id,
        "name": name,
        "contentType": "text/plain",
        "size": 11,
        "checksum": "",
        "folderId": folder,
        "createdBy": OWNER,
        "ownerId": OWNER,
        "createdAt": "2024-03-01T10:00:00Z",
        "updatedAt": "2024-03-02T10:00:00Z",
    })
}

async fn record(State(mock): State<Mock>, request: Request, next: Next) -> Response {
    let authorization = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    mock.requests.lock().unwrap().push(Recorded {
        method: request.method().to_string(),
        uri: request.uri().to_string(),
        authorization: authorization.clone(),
    });

    let expected = format!("Bearer {TOKEN}");
    if authorization.as_deref() != Some(expected.as_str()) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    next.run(request).await
}

async fn list_folders() -> Json<Value> {
    Json(json!([folder_json(
        "6f1c1d8e-0000-4000-8000-000000000001",
        "Reports",
        None
    )]))
}

async fn create_folder(State(mock): State<Mock>, Json(body): Json<Value>) -> Response {
    mock.bodies.lock().unwrap().push(body.clone());
    if body["name"] == "Taken" {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Folder already exists" })),
        )
            .into_response();
    }
    let name = body["name"].as_str().unwrap_or_default();
    let parent = body["parentId"].as_str();
    (
        StatusCode::CREATED,
        Json(folder_json("6f1c1d8e-0000-4000-8000-0000000000aa", name, parent)),
    )
        .into_response()
}

async fn folder(Path(id): Path<String>) -> Response {
    match id.as_str() {
        MISSING => (StatusCode::NOT_FOUND, Json(json!({ "message": "Folder not found" })))
            .into_response(),
        BROKEN => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        _ => Json(folder_json(&id, "Reports", None)).into_response(),
    }
}

async fn update_folder(
    State(mock): State<Mock>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    mock.bodies.lock().unwrap().push(body.clone());
    Json(folder_json(&id, body["name"].as_str().unwrap_or_default(), None))
}

async fn list_documents() -> Json<Value> {
    Json(json!([
        document_json("9a9a9a9a-0000-4000-8000-000000000001", "notes.txt", None),
        document_json("9a9a9a9a-0000-4000-8000-000000000002", "todo.txt", None),
    ]))
}

async fn document(Path(id): Path<String>) -> Response {
    if id == BROKEN {
        return (StatusCode::OK, "{ not json").into_response();
    }
    Json(document_json(&id, "notes.txt", None)).into_response()
}

async fn update_document(
    State(mock): State<Mock>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    mock.bodies.lock().unwrap().push(body.clone());
    Json(document_json(&id, "notes.txt", body["folderId"].as_str()))
}

async fn content(Path(_id): Path<String>) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert("content-type", "text/plain".parse().unwrap());
    (headers, Body::from("hello world")).into_response()
}

async fn upload(State(mock): State<Mock>, mut multipart: Multipart) -> Response {
    let mut folder_id = None;
    let mut file_name = String::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let data = field.bytes().await.unwrap();
                mock.uploads
                    .lock()
                    .unwrap()
                    .push((file_name.clone(), content_type, data));
            }
            "folderId" => folder_id = Some(field.text().await.unwrap()),
            _ => {}
        }
    }
    let body = document_json(
        "9a9a9a9a-0000-4000-8000-0000000000ff",
        &file_name,
        folder_id.as_deref(),
    );
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn spawn(mock: Mock) -> String {
    let app = Router::new()
        .route("/api/folders", get(list_folders).post(create_folder))
        .route(
            "/api/folders/{id}",
            get(folder)
                .put(update_folder)
                .delete(|| async { StatusCode::NO_CONTENT }),
        )
        .route("/api/documents", get(list_documents).post(upload))
        .route(
            "/api/documents/{id}",
            get(document)
                .put(update_document)
                .delete(|| async { StatusCode::NO_CONTENT }),
        )
        .route("/api/documents/{id}/content", get(content))
        .layer(middleware::from_fn_with_state(mock.clone(), record))
        .with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

async fn client_with(session: StaticSession) -> (ApiClient, Mock) {
    let mock = Mock::default();
    let base_url = spawn(mock.clone()).await;
    let session: Arc<dyn SessionProvider> = Arc::new(session);
    let client = ApiClient::builder(session)
        .base_url(base_url)
        .build()
        .unwrap();
    (client, mock)
}

async fn client() -> (ApiClient, Mock) {
    client_with(StaticSession::new(TOKEN)).await
}

fn folder_id(raw: &str) -> FolderId {
    raw.parse().unwrap()
}

#[tokio::test]
async fn test_every_request_carries_bearer_token() {
    let (client, mock) = client().await;
    let parent = folder_id("6f1c1d8e-0000-4000-8000-000000000001");

    client.list_folders(None).await.unwrap();
    client.list_folders(Some(parent)).await.unwrap();
    client.list_documents(Some(parent)).await.unwrap();
    client.get_folder(parent).await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests.len(), 4);
    for request in &requests {
        assert_eq!(request.authorization.as_deref(), Some("Bearer test-token"));
    }
    assert_eq!(requests[0].uri, "/api/folders");
    assert_eq!(requests[1].uri, format!("/api/folders?parentId={parent}"));
    assert_eq!(requests[2].uri, format!("/api/documents?folderId={parent}"));
    assert_eq!(requests[3].uri, format!("/api/folders/{parent}"));
}

#[tokio::test]
async fn test_no_session_sends_no_request() {
    let (client, mock) = client_with(StaticSession::anonymous()).await;

    let err = client.list_folders(None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthenticated);
    assert!(err.is_session_failure());

    let err = client
        .upload(UploadFile::from_bytes("a.txt", "text/plain", None, Bytes::from_static(b"a")))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthenticated);

    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_rejected_token_is_unauthenticated() {
    let (client, _mock) = client_with(StaticSession::new("stale-token")).await;
    let err = client.list_documents(None).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Unauthenticated);
}

#[tokio::test]
async fn test_listing_decodes_entities() {
    let (client, _mock) = client().await;

    let folders = client.list_folders(None).await.unwrap();
    assert_eq!(folders.len(), 1);
    assert_eq!(folders[0].name, "Reports");
    assert!(folders[0].is_root());

    let documents = client.list_documents(None).await.unwrap();
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].content_type, "text/plain");
    assert!(documents[1].is_in_root());
}

#[tokio::test]
async fn test_status_codes_map_to_error_kinds() {
    let (client, _mock) = client().await;

    let err = client.get_folder(folder_id(MISSING)).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message, "Folder not found");

    let err = client.get_folder(folder_id(BROKEN)).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Server);

    let err = client
        .create_folder(&CreateFolder::new("Taken", None))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
    assert_eq!(err.message, "Folder already exists");
}

#[tokio::test]
async fn test_malformed_body_is_serialization_error() {
    let (client, _mock) = client().await;
    let id: DocumentId = BROKEN.parse().unwrap();
    let err = client.get_document(id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Serialization);
}

#[tokio::test]
async fn test_create_and_rename_folder() {
    let (client, mock) = client().await;
    let parent = folder_id("6f1c1d8e-0000-4000-8000-000000000001");

    let created = client
        .create_folder(
            &CreateFolder::new("Q1 Reports", Some(parent))
                .with_description(Some("Quarterly".into())),
        )
        .await
        .unwrap();
    assert_eq!(created.name, "Q1 Reports");
    assert_eq!(created.parent_id, Some(parent));

    let renamed = client
        .update_folder(created.id, &UpdateFolder::rename("Q1 Final"))
        .await
        .unwrap();
    assert_eq!(renamed.name, "Q1 Final");

    let bodies = mock.bodies.lock().unwrap().clone();
    assert_eq!(
        bodies[0],
        json!({ "name": "Q1 Reports", "description": "Quarterly", "parentId": parent.to_string() })
    );
    assert_eq!(bodies[1], json!({ "name": "Q1 Final" }));
}

#[tokio::test]
async fn test_invalid_folder_name_is_rejected_locally() {
    let (client, mock) = client().await;
    let err = client
        .create_folder(&CreateFolder::new("bad/name", None))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(mock.requests().is_empty());
}

#[tokio::test]
async fn test_move_document_to_root_sends_null() {
    let (client, mock) = client().await;
    let id: DocumentId = "9a9a9a9a-0000-4000-8000-000000000001".parse().unwrap();

    let moved = client
        .update_document(id, &UpdateDocument::move_to(None))
        .await
        .unwrap();
    assert!(moved.is_in_root());

    let bodies = mock.bodies.lock().unwrap().clone();
    assert_eq!(bodies[0], json!({ "folderId": null }));
    assert_eq!(mock.requests()[0].method, "PUT");
}

#[tokio::test]
async fn test_download_bytes_and_stream() {
    let (client, _mock) = client().await;
    let id: DocumentId = "9a9a9a9a-0000-4000-8000-000000000001".parse().unwrap();

    let bytes = client.download(id).await.unwrap();
    assert_eq!(&bytes[..], b"hello world");

    let chunks: Vec<Bytes> = client
        .download_stream(id)
        .await
        .unwrap()
        .try_collect()
        .await
        .unwrap();
    assert_eq!(chunks.concat(), b"hello world");
}

#[tokio::test]
async fn test_multipart_upload() {
    let (client, mock) = client().await;
    let folder = folder_id("6f1c1d8e-0000-4000-8000-000000000001");

    let document = client
        .upload(UploadFile::from_bytes(
            "report.pdf",
            "application/pdf",
            Some(folder),
            Bytes::from_static(b"%PDF-1.7"),
        ))
        .await
        .unwrap();
    assert_eq!(document.name, "report.pdf");
    assert_eq!(document.folder_id, Some(folder));

    let uploads = mock.uploads.lock().unwrap().clone();
    assert_eq!(uploads.len(), 1);
    assert_eq!(uploads[0].0, "report.pdf");
    assert_eq!(uploads[0].1, "application/pdf");
    assert_eq!(&uploads[0].2[..], b"%PDF-1.7");
}

#[tokio::test]
async fn test_delete_endpoints() {
    let (client, mock) = client().await;
    let doc: DocumentId = "9a9a9a9a-0000-4000-8000-000000000001".parse().unwrap();
    let folder = folder_id("6f1c1d8e-0000-4000-8000-000000000001");

    client.delete_document(doc).await.unwrap();
    client.delete_folder(folder).await.unwrap();

    let requests = mock.requests();
    assert_eq!(requests[0].method, "DELETE");
    assert_eq!(requests[0].uri, format!("/api/documents/{doc}"));
    assert_eq!(requests[1].uri, format!("/api/folders/{folder}"));
}
