//! Folder browsing commands.

use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use securedocs_core::error::AppError;
use securedocs_core::types::FolderId;
use securedocs_entity::document::Document;
use securedocs_entity::folder::Folder;
use securedocs_service::format::{DocumentIcon, format_file_size};
use securedocs_service::{BreadcrumbTrail, Navigator, PathOutcome, PathResolver};

use super::connection::Connection;

/// Arguments for `ls`
#[derive(Debug, Args)]
pub struct LsArgs {
    /// Folder to list (the root when omitted)
    pub folder_id: Option<FolderId>,
}

/// Arguments for `path`
#[derive(Debug, Args)]
pub struct PathArgs {
    /// Folder whose path is shown
    pub folder_id: FolderId,
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Folder ID
    id: String,
    /// Name
    name: String,
    /// Description
    description: String,
    /// Updated at
    updated_at: String,
}

impl From<&Folder> for FolderRow {
    fn from(f: &Folder) -> Self {
        Self {
            id: f.id.to_string(),
            name: f.name.clone(),
            description: f.description.clone().unwrap_or_default(),
            updated_at: f.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Document display row
#[derive(Debug, Serialize, Tabled)]
pub(crate) struct DocumentRow {
    /// Document ID
    id: String,
    /// Kind
    kind: String,
    /// Name
    name: String,
    /// Size
    size: String,
    /// Updated at
    updated_at: String,
}

impl From<&Document> for DocumentRow {
    fn from(d: &Document) -> Self {
        Self {
            id: d.id.to_string(),
            kind: DocumentIcon::for_content_type(&d.content_type).to_string(),
            name: d.name.clone(),
            size: format_file_size(d.size),
            updated_at: d.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}

/// Breadcrumb display row
#[derive(Debug, Serialize, Tabled)]
struct CrumbRow {
    /// Depth below the root
    level: usize,
    /// Folder ID
    id: String,
    /// Name
    name: String,
}

/// List a folder.
pub async fn ls(args: &LsArgs, conn: &Connection, format: OutputFormat) -> Result<(), AppError> {
    let navigator = Navigator::new(conn.api.clone(), &conn.config.navigation);
    let view = navigator
        .navigate(args.folder_id)
        .await?
        .ok_or_else(|| AppError::internal("Navigation was superseded"))?;

    match format {
        OutputFormat::Json => output::print_json(&view),
        OutputFormat::Table => {
            println!("{}", view.breadcrumbs);
            warn_incomplete(&view.breadcrumbs);

            let folders: Vec<FolderRow> = view.contents.folders.iter().map(FolderRow::from).collect();
            let documents: Vec<DocumentRow> =
                view.contents.documents.iter().map(DocumentRow::from).collect();

            output::print_heading("Folders");
            output::print_list(&folders, format);
            output::print_heading("Documents");
            output::print_list(&documents, format);
        }
    }
    Ok(())
}

/// Show a folder's breadcrumb trail.
pub async fn path(args: &PathArgs, conn: &Connection, format: OutputFormat) -> Result<(), AppError> {
    let resolver = PathResolver::new(conn.api.clone(), &conn.config.navigation);
    let trail = resolver.resolve(Some(args.folder_id)).await;

    match format {
        OutputFormat::Json => output::print_json(&trail),
        OutputFormat::Table => {
            println!("{}", trail);
            warn_incomplete(&trail);
            let rows: Vec<CrumbRow> = trail
                .entries
                .iter()
                .enumerate()
                .map(|(level, crumb)| CrumbRow {
                    level: level + 1,
                    id: crumb.id.to_string(),
                    name: crumb.name.clone(),
                })
                .collect();
            output::print_list(&rows, format);
        }
    }
    Ok(())
}

fn warn_incomplete(trail: &BreadcrumbTrail) {
    if let Some(reason) = describe_outcome(&trail.outcome) {
        output::print_warning(&reason);
    }
}

/// Explain why a trail does not reach the root.
fn describe_outcome(outcome: &PathOutcome) -> Option<String> {
    match outcome {
        PathOutcome::Complete => None,
        PathOutcome::Truncated { at, kind } => {
            Some(format!("Path truncated: folder {} could not be loaded ({})", at, kind))
        }
        PathOutcome::CycleDetected { at } => {
            Some(format!("Path truncated: folder {} is its own ancestor", at))
        }
        PathOutcome::DepthExceeded { limit } => {
            Some(format!("Path truncated after {} levels", limit))
        }
    }
}
