//! Folder management commands.

use clap::Args;

use crate::output::{self, OutputFormat};
use securedocs_core::error::AppError;
use securedocs_core::types::FolderId;
use securedocs_entity::folder::Folder;
use securedocs_service::FolderService;

use super::connection::Connection;

/// Arguments for `mkdir`
#[derive(Debug, Args)]
pub struct MkdirArgs {
    /// Folder name
    pub name: String,
    /// Parent folder ID (omit for root)
    #[arg(short, long)]
    pub parent: Option<FolderId>,
    /// Optional description
    #[arg(short, long)]
    pub description: Option<String>,
}

/// Arguments for `rename-folder`
#[derive(Debug, Args)]
pub struct RenameFolderArgs {
    /// Folder ID
    pub folder_id: FolderId,
    /// New name
    pub name: String,
}

/// Arguments for `rmdir`
#[derive(Debug, Args)]
pub struct RmdirArgs {
    /// Folder ID
    pub folder_id: FolderId,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Create a folder.
pub async fn mkdir(args: &MkdirArgs, conn: &Connection, format: OutputFormat) -> Result<(), AppError> {
    let ctx = conn.user().await?;
    let folder = FolderService::new(conn.api.clone())
        .create(&ctx, &args.name, args.parent, args.description.clone())
        .await?;
    print_folder(
        &folder,
        format,
        &format!("Folder '{}' created (id: {})", folder.name, folder.id),
    );
    Ok(())
}

/// Rename a folder.
pub async fn rename(
    args: &RenameFolderArgs,
    conn: &Connection,
    format: OutputFormat,
) -> Result<(), AppError> {
    let ctx = conn.user().await?;
    let folder = FolderService::new(conn.api.clone())
        .rename(&ctx, args.folder_id, &args.name)
        .await?;
    print_folder(&folder, format, &format!("Folder renamed to '{}'", folder.name));
    Ok(())
}

/// Delete a folder after confirmation.
pub async fn remove(args: &RmdirArgs, conn: &Connection) -> Result<(), AppError> {
    let ctx = conn.user().await?;
    let service = FolderService::new(conn.api.clone());

    if !args.yes {
        let folder = service.get(args.folder_id).await?;
        let prompt = format!("Delete folder '{}' and everything in it?", folder.name);
        if !super::confirm(&prompt)? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    service.delete(&ctx, args.folder_id).await?;
    output::print_success(&format!("Folder {} deleted", args.folder_id));
    Ok(())
}

fn print_folder(folder: &Folder, format: OutputFormat, msg: &str) {
    match format {
        OutputFormat::Json => output::print_json(folder),
        OutputFormat::Table => output::print_success(msg),
    }
}
