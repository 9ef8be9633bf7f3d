//! Login, logout and identity commands.

use std::path::Path;

use clap::Args;
use serde::Serialize;

use crate::output::{self, OutputFormat};
use securedocs_auth::guard::Capabilities;
use securedocs_auth::session::{OidcSession, SessionStore};
use securedocs_core::config::AppConfig;
use securedocs_core::error::AppError;
use securedocs_entity::user::UserProfile;

use super::connection::Connection;

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Username at the identity provider
    #[arg(short, long)]
    pub username: String,
    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

/// `whoami` output
#[derive(Debug, Serialize)]
struct Identity<'a> {
    profile: &'a UserProfile,
    capabilities: Capabilities,
}

/// Sign in with the password grant and save the session.
pub async fn login(
    args: &LoginArgs,
    config: &AppConfig,
    session_path: &Path,
    format: OutputFormat,
) -> Result<(), AppError> {
    if config.auth.has_static_token() {
        return Err(AppError::configuration(
            "A static token is configured; remove auth.token to log in",
        ));
    }

    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {}", e)))?,
    };

    let session = OidcSession::new(config.auth.clone())?;
    let profile = session.login_password(&args.username, &password).await?;

    let refresh_token = session
        .refresh_token()
        .await
        .ok_or_else(|| AppError::unauthenticated("Identity provider issued no refresh token"))?;
    SessionStore::new(session_path)
        .save(&refresh_token, profile.username.as_deref())
        .await?;

    match format {
        OutputFormat::Json => output::print_json(&profile),
        OutputFormat::Table => {
            output::print_success(&format!("Logged in as {}", profile.display_username()))
        }
    }
    Ok(())
}

/// End the session at the provider and forget the saved login.
pub async fn logout(conn: &Connection) -> Result<(), AppError> {
    let result = conn.session.logout().await;
    conn.clear().await?;
    result?;
    output::print_success("Logged out");
    Ok(())
}

/// Show the signed-in user.
pub async fn whoami(conn: &Connection, format: OutputFormat) -> Result<(), AppError> {
    let ctx = conn.user().await?;

    match format {
        OutputFormat::Json => output::print_json(&Identity {
            profile: &ctx.profile,
            capabilities: ctx.capabilities,
        }),
        OutputFormat::Table => {
            let profile = &ctx.profile;
            let caps = ctx.capabilities;
            output::print_kv("Username", profile.display_username());
            output::print_kv("Name", profile.full_name().as_deref().unwrap_or("-"));
            output::print_kv("Email", profile.email.as_deref().unwrap_or("-"));
            output::print_kv("User ID", &profile.id.to_string());
            output::print_kv("Roles", &profile.roles.join(", "));
            output::print_kv("Can upload", output::yes_no(caps.can_upload));
            output::print_kv("Can edit", output::yes_no(caps.can_edit));
            output::print_kv("Can delete", output::yes_no(caps.can_delete));
            output::print_kv("Can share", output::yes_no(caps.can_share));
            output::print_kv("Administrator", output::yes_no(caps.is_admin));
        }
    }
    Ok(())
}
