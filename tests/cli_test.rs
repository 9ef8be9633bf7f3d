//! End-to-end tests running the `securedocs` binary against a mock API server.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Output;

use axum::extract::{Path as UrlPath, Query, Request};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::process::Command;

const TOKEN: &str = "test-token";
const OWNER: &str = "0b0e6d3e-4f1f-4a35-8f2e-3d7f9e1c2a11";
const PROJECTS: &str = "11111111-0000-4000-8000-000000000001";
const SPECS: &str = "11111111-0000-4000-8000-000000000002";
const NOTES: &str = "22222222-0000-4000-8000-000000000001";
const MISSING: &str = "22222222-0000-4000-8000-000000000404";
const HELLO_SHA256: &str = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";

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

fn notes_json() -> Value {
    json!({
        "id": NOTES,
        "name": "notes.txt",
        "contentType": "text/plain",
        "size": 11,
        "checksum": HELLO_SHA256,
        "folderId": null,
        "createdBy": OWNER,
        "ownerId": OWNER,
        "createdAt": "2024-03-01T10:00:00Z",
        "updatedAt": "2024-03-02T10:00:00Z",
    })
}

fn all_folders() -> Vec<Value> {
    vec![
        folder_json(PROJECTS, "Projects", None),
        folder_json(SPECS, "Specs", Some(PROJECTS)),
    ]
}

async fn require_token(request: Request, next: Next) -> Response {
    let expected = format!("Bearer {TOKEN}");
    let authorized = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str());
    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    next.run(request).await
}

async fn list_folders(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    let parent = query.get("parentId").map(String::as_str);
    let children: Vec<Value> = all_folders()
        .into_iter()
        .filter(|f| f["parentId"].as_str() == parent)
        .collect();
    Json(Value::Array(children))
}

async fn folder(UrlPath(id): UrlPath<String>) -> Response {
    match all_folders().into_iter().find(|f| f["id"] == id.as_str()) {
        Some(f) => Json(f).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"message": "Folder not found"}))).into_response(),
    }
}

async fn list_documents(Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    if query.contains_key("folderId") {
        Json(json!([]))
    } else {
        Json(json!([notes_json()]))
    }
}

async fn document(UrlPath(id): UrlPath<String>) -> Response {
    if id == NOTES {
        Json(notes_json()).into_response()
    } else {
        (StatusCode::NOT_FOUND, Json(json!({"message": "Document not found"}))).into_response()
    }
}

async fn content(UrlPath(id): UrlPath<String>) -> Response {
    if id == NOTES {
        "hello world".into_response()
    } else {
        StatusCode::NOT_FOUND.into_response()
    }
}

async fn spawn() -> String {
    let app = Router::new()
        .route("/api/folders", get(list_folders))
        .route("/api/folders/{id}", get(folder))
        .route("/api/documents", get(list_documents))
        .route("/api/documents/{id}", get(document))
        .route("/api/documents/{id}/content", get(content))
        .layer(middleware::from_fn(require_token));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

fn work_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("securedocs-cli-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

async fn run(base_url: &str, token: Option<&str>, dir: &Path, args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_securedocs"));
    cmd.current_dir(dir)
        .arg("--config")
        .arg(dir.join("absent.toml"))
        .args(args)
        .env("SECUREDOCS__API__BASE_URL", base_url)
        .env("RUST_LOG", "off")
        .env_remove("SECUREDOCS__AUTH__TOKEN");
    if let Some(token) = token {
        cmd.env("SECUREDOCS__AUTH__TOKEN", token);
    }
    cmd.output().await.unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[tokio::test]
async fn test_ls_root_as_json() {
    let base_url = spawn().await;
    let dir = work_dir();

    let output = run(&base_url, Some(TOKEN), &dir, &["--format", "json", "ls"]).await;
    assert!(output.status.success(), "{}", stderr(&output));

    let view: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(view["folder_id"].is_null());
    assert_eq!(view["breadcrumbs"]["outcome"]["status"], "complete");
    assert_eq!(view["breadcrumbs"]["entries"], json!([]));
    assert_eq!(view["contents"]["folders"][0]["name"], "Projects");
    assert_eq!(view["contents"]["documents"][0]["name"], "notes.txt");
}

#[tokio::test]
async fn test_ls_table_shows_breadcrumb_line() {
    let base_url = spawn().await;
    let dir = work_dir();

    let output = run(&base_url, Some(TOKEN), &dir, &["ls", SPECS]).await;
    assert!(output.status.success(), "{}", stderr(&output));

    let out = stdout(&output);
    assert_eq!(out.lines().next(), Some("Home / Projects / Specs"));
    assert!(out.contains("No results found."));
}

#[tokio::test]
async fn test_path_of_nested_folder() {
    let base_url = spawn().await;
    let dir = work_dir();

    let output = run(&base_url, Some(TOKEN), &dir, &["-f", "json", "path", SPECS]).await;
    assert!(output.status.success(), "{}", stderr(&output));

    let trail: Value = serde_json::from_str(&stdout(&output)).unwrap();
    let names: Vec<&str> = trail["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Projects", "Specs"]);
}

#[tokio::test]
async fn test_commands_require_login() {
    let base_url = spawn().await;
    let dir = work_dir();

    let output = run(&base_url, None, &dir, &["ls"]).await;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Not logged in"));
}

#[tokio::test]
async fn test_rejected_token_fails() {
    let base_url = spawn().await;
    let dir = work_dir();

    let output = run(&base_url, Some("stale-token"), &dir, &["ls"]).await;
    assert!(!output.status.success());
}

#[tokio::test]
async fn test_show_missing_document() {
    let base_url = spawn().await;
    let dir = work_dir();

    let output = run(&base_url, Some(TOKEN), &dir, &["show", MISSING]).await;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Failed to load document"));
}

#[tokio::test]
async fn test_preview_prints_text() {
    let base_url = spawn().await;
    let dir = work_dir();

    let output = run(&base_url, Some(TOKEN), &dir, &["preview", NOTES]).await;
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output).trim_end(), "hello world");
}

#[tokio::test]
async fn test_download_verifies_checksum() {
    let base_url = spawn().await;
    let dir = work_dir();

    let output = run(&base_url, Some(TOKEN), &dir, &["-f", "json", "download", NOTES]).await;
    assert!(output.status.success(), "{}", stderr(&output));

    let report: Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["sha256"], HELLO_SHA256);
    assert_eq!(report["verified"], true);
    assert_eq!(std::fs::read(dir.join("notes.txt")).unwrap(), b"hello world");
}

#[tokio::test]
async fn test_guest_cannot_create_folder() {
    let base_url = spawn().await;
    let dir = work_dir();

    let output = run(&base_url, Some(TOKEN), &dir, &["mkdir", "Reports"]).await;
    assert!(!output.status.success());
    assert!(stderr(&output).contains("does not allow"));
}
