//! Document commands.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};
use securedocs_core::error::AppError;
use securedocs_core::types::{DocumentId, FolderId};
use securedocs_entity::document::Document;
use securedocs_service::document::download::resolve_output_path;
use securedocs_service::format::format_file_size;
use securedocs_service::{
    DocumentService, DownloadService, PreviewContent, PreviewLoader, PreviewMode, UploadService,
};

use super::browse::DocumentRow;
use super::connection::Connection;

/// Arguments naming a single document
#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Document ID
    pub document_id: DocumentId,
}

/// Arguments for `download`
#[derive(Debug, Args)]
pub struct DownloadArgs {
    /// Document ID
    pub document_id: DocumentId,
    /// Target file or directory (defaults to the document name)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for `upload`
#[derive(Debug, Args)]
pub struct UploadArgs {
    /// Local file to upload
    pub file: PathBuf,
    /// Destination folder (the root when omitted)
    #[arg(long)]
    pub folder: Option<FolderId>,
    /// Display name; the file's extension is kept
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Arguments for `rename`
#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Document ID
    pub document_id: DocumentId,
    /// New name
    pub name: String,
}

/// Arguments for `move`
#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Document ID
    pub document_id: DocumentId,
    /// Destination folder (the root when omitted)
    #[arg(long)]
    pub folder: Option<FolderId>,
}

/// Arguments for `describe`
#[derive(Debug, Args)]
pub struct DescribeArgs {
    /// Document ID
    pub document_id: DocumentId,
    /// New description; an empty string clears it
    pub description: String,
}

/// Arguments for `rm`
#[derive(Debug, Args)]
pub struct RmArgs {
    /// Document ID
    pub document_id: DocumentId,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// JSON form of a preview
#[derive(Debug, Serialize)]
struct PreviewOutput {
    mode: PreviewMode,
    available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

impl From<&PreviewContent> for PreviewOutput {
    fn from(content: &PreviewContent) -> Self {
        let mut out = Self {
            mode: content.mode(),
            available: content.is_available(),
            text: None,
            bytes: None,
            reason: None,
        };
        match content {
            PreviewContent::Text(text) => out.text = Some(text.clone()),
            PreviewContent::Media { data, .. } => out.bytes = Some(data.len() as u64),
            PreviewContent::Unavailable { reason, .. } => out.reason = Some(reason.clone()),
            PreviewContent::Unsupported => {}
        }
        out
    }
}

/// Show a document's details.
pub async fn show(args: &ShowArgs, conn: &Connection, format: OutputFormat) -> Result<(), AppError> {
    let ctx = conn.user().await?;
    let detail = DocumentService::new(conn.api.clone())
        .detail(&ctx, args.document_id)
        .await?;

    if format == OutputFormat::Json {
        output::print_json(&detail);
        return Ok(());
    }

    let doc = &detail.document;
    output::print_kv("ID", &doc.id.to_string());
    output::print_kv("Name", &doc.name);
    output::print_kv("Description", doc.description.as_deref().unwrap_or("-"));
    output::print_kv("Kind", detail.icon.label());
    output::print_kv("Content type", &doc.content_type);
    output::print_kv("Size", &detail.size_label);
    output::print_kv("Folder", &location(doc));
    output::print_kv("Owner", &doc.owner_id.to_string());
    output::print_kv("Created", &doc.created_at.to_rfc3339());
    output::print_kv("Updated", &doc.updated_at.to_rfc3339());
    if !doc.checksum.is_empty() {
        output::print_kv("Checksum", &doc.checksum);
    }
    output::print_kv("Preview", detail.preview_mode.as_str());
    output::print_kv("Can edit", output::yes_no(detail.permission.can_write));
    output::print_kv("Can delete", output::yes_no(detail.permission.can_delete));
    output::print_kv("Can share", output::yes_no(detail.permission.can_share));
    Ok(())
}

/// Print a document preview.
pub async fn preview(args: &ShowArgs, conn: &Connection, format: OutputFormat) -> Result<(), AppError> {
    let ctx = conn.user().await?;
    let detail = DocumentService::new(conn.api.clone())
        .detail(&ctx, args.document_id)
        .await?;
    let content = PreviewLoader::new(conn.api.clone()).load(&detail.document).await;

    if format == OutputFormat::Json {
        output::print_json(&PreviewOutput::from(&content));
        return Ok(());
    }

    match content {
        PreviewContent::Text(text) => println!("{}", text),
        PreviewContent::Media { mode, data } => {
            output::print_kv("Preview", mode.as_str());
            output::print_kv("Size", &format_file_size(data.len() as u64));
            println!(
                "Use `securedocs download {}` to open it locally.",
                args.document_id
            );
        }
        PreviewContent::Unavailable { mode, reason } => {
            output::print_warning(&format!("{} preview unavailable: {}", mode.as_str(), reason));
        }
        PreviewContent::Unsupported => {
            output::print_warning(&format!(
                "No preview for {}. Use `securedocs download {}` instead.",
                detail.document.content_type, args.document_id
            ));
        }
    }
    Ok(())
}

/// Download a document, verifying its checksum.
pub async fn download(
    args: &DownloadArgs,
    conn: &Connection,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = conn.user().await?;
    let detail = DocumentService::new(conn.api.clone())
        .detail(&ctx, args.document_id)
        .await?;
    let path = resolve_output_path(&detail.document, args.output.as_deref()).await?;
    let report = DownloadService::new(conn.api.clone())
        .download_to(&detail.document, &path)
        .await?;

    match format {
        OutputFormat::Json => output::print_json(&report),
        OutputFormat::Table => {
            output::print_success(&format!(
                "Downloaded '{}' to {}",
                detail.document.name,
                report.path.display()
            ));
            output::print_kv("Size", &format_file_size(report.bytes));
            output::print_kv("SHA-256", &report.sha256);
            output::print_kv("Checksum verified", output::yes_no(report.verified));
        }
    }
    Ok(())
}

/// Upload a local file.
pub async fn upload(args: &UploadArgs, conn: &Connection, format: OutputFormat) -> Result<(), AppError> {
    let ctx = conn.user().await?;
    let document = UploadService::new(conn.api.clone())
        .upload_file(&ctx, &args.file, args.folder, args.name.as_deref())
        .await?;
    print_document(&document, format, &format!("Uploaded '{}'", document.name));
    Ok(())
}

/// Rename a document.
pub async fn rename(args: &RenameArgs, conn: &Connection, format: OutputFormat) -> Result<(), AppError> {
    let ctx = conn.user().await?;
    let document = DocumentService::new(conn.api.clone())
        .rename(&ctx, args.document_id, &args.name)
        .await?;
    print_document(&document, format, &format!("Renamed to '{}'", document.name));
    Ok(())
}

/// Move a document.
pub async fn move_to(args: &MoveArgs, conn: &Connection, format: OutputFormat) -> Result<(), AppError> {
    let ctx = conn.user().await?;
    let document = DocumentService::new(conn.api.clone())
        .move_to(&ctx, args.document_id, args.folder)
        .await?;
    let msg = format!("Moved '{}' to {}", document.name, location(&document));
    print_document(&document, format, &msg);
    Ok(())
}

/// Set a document's description.
pub async fn describe(
    args: &DescribeArgs,
    conn: &Connection,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = conn.user().await?;
    let document = DocumentService::new(conn.api.clone())
        .describe(&ctx, args.document_id, &args.description)
        .await?;
    print_document(&document, format, &format!("Description of '{}' updated", document.name));
    Ok(())
}

/// Delete a document after confirmation.
pub async fn remove(args: &RmArgs, conn: &Connection) -> Result<(), AppError> {
    let ctx = conn.user().await?;
    let service = DocumentService::new(conn.api.clone());

    if !args.yes {
        let detail = service.detail(&ctx, args.document_id).await?;
        let prompt = format!("Delete document '{}'?", detail.document.name);
        if !super::confirm(&prompt)? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    service.delete(&ctx, args.document_id).await?;
    output::print_success(&format!("Document {} deleted", args.document_id));
    Ok(())
}

fn print_document(document: &Document, format: OutputFormat, msg: &str) {
    match format {
        OutputFormat::Json => output::print_json(document),
        OutputFormat::Table => {
            output::print_success(msg);
            output::print_list(&[DocumentRow::from(document)], format);
        }
    }
}

fn location(document: &Document) -> String {
    match document.folder_id {
        Some(id) => id.to_string(),
        None => "Home".to_string(),
    }
}
