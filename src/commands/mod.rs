//! CLI command definitions and dispatch.

pub mod browse;
pub mod connection;
pub mod document;
pub mod folder;
pub mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use securedocs_auth::guard::Route;
use securedocs_core::config::AppConfig;
use securedocs_core::error::AppError;

use self::connection::Connection;

/// SecureDocs: browse, preview and manage documents from the terminal
#[derive(Debug, Parser)]
#[command(name = "securedocs", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// File holding the saved login session
    #[arg(long, default_value = ".securedocs-session.json")]
    pub session: PathBuf,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in with the identity provider
    Login(session::LoginArgs),
    /// End the current session
    Logout,
    /// Show the signed-in user, roles and capabilities
    Whoami,
    /// List a folder's subfolders and documents
    Ls(browse::LsArgs),
    /// Show the breadcrumb trail of a folder
    Path(browse::PathArgs),
    /// Show a document's details
    Show(document::ShowArgs),
    /// Print a document preview
    Preview(document::ShowArgs),
    /// Download a document
    Download(document::DownloadArgs),
    /// Upload a local file
    Upload(document::UploadArgs),
    /// Create a folder
    Mkdir(folder::MkdirArgs),
    /// Rename a folder
    RenameFolder(folder::RenameFolderArgs),
    /// Rename a document
    Rename(document::RenameArgs),
    /// Move a document to another folder
    Move(document::MoveArgs),
    /// Set a document's description
    Describe(document::DescribeArgs),
    /// Delete a document
    Rm(document::RmArgs),
    /// Delete a folder
    Rmdir(folder::RmdirArgs),
}

impl Commands {
    /// The route a command must be allowed on, `None` for commands that
    /// run without a session.
    pub fn route(&self) -> Option<Route> {
        match self {
            Self::Login(_) | Self::Logout => None,
            Self::Whoami => Some(Route::Dashboard),
            _ => Some(Route::Documents),
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        if let Commands::Login(args) = &self.command {
            return session::login(args, &config, &self.session, self.format).await;
        }

        let conn = Connection::open(config, &self.session).await?;
        if let Some(route) = self.command.route() {
            conn.guard(route).await?;
        }

        let format = self.format;
        let result = match &self.command {
            Commands::Login(_) => Ok(()),
            Commands::Logout => return session::logout(&conn).await,
            Commands::Whoami => session::whoami(&conn, format).await,
            Commands::Ls(args) => browse::ls(args, &conn, format).await,
            Commands::Path(args) => browse::path(args, &conn, format).await,
            Commands::Show(args) => document::show(args, &conn, format).await,
            Commands::Preview(args) => document::preview(args, &conn, format).await,
            Commands::Download(args) => document::download(args, &conn, format).await,
            Commands::Upload(args) => document::upload(args, &conn, format).await,
            Commands::Mkdir(args) => folder::mkdir(args, &conn, format).await,
            Commands::RenameFolder(args) => folder::rename(args, &conn, format).await,
            Commands::Rename(args) => document::rename(args, &conn, format).await,
            Commands::Move(args) => document::move_to(args, &conn, format).await,
            Commands::Describe(args) => document::describe(args, &conn, format).await,
            Commands::Rm(args) => document::remove(args, &conn).await,
            Commands::Rmdir(args) => folder::remove(args, &conn).await,
        };

        if let Err(e) = conn.persist().await {
            tracing::warn!(error = %e, "Failed to save session");
        }
        result
    }
}

/// Ask the user to confirm a destructive action.
pub fn confirm(prompt: &str) -> Result<bool, AppError> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {}", e)))
}
