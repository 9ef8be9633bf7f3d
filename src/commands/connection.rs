//! Session and API client wiring shared by all commands.

use std::path::Path;
use std::sync::Arc;

use securedocs_auth::guard::{Route, RouteGuard};
use securedocs_auth::session::{OidcSession, SessionProvider, SessionStore, StaticSession};
use securedocs_client::{ApiClient, DocumentApi};
use securedocs_core::config::AppConfig;
use securedocs_core::error::{AppError, ErrorKind};
use securedocs_service::UserContext;

/// A configured session plus the API client bound to it.
#[derive(Debug)]
pub struct Connection {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Token source for every request.
    pub session: Arc<dyn SessionProvider>,
    /// Document API.
    pub api: Arc<dyn DocumentApi>,
    /// Provider session whose refresh token is saved after the command.
    oidc: Option<Arc<OidcSession>>,
    store: SessionStore,
}

impl Connection {
    /// Build the session from configuration or the saved login.
    ///
    /// A configured static token wins; otherwise the refresh token in the
    /// session file is exchanged for fresh tokens. A rejected saved session
    /// is discarded and the command continues signed out.
    pub async fn open(config: AppConfig, session_path: &Path) -> Result<Self, AppError> {
        let store = SessionStore::new(session_path);

        let oidc = if config.auth.has_static_token() {
            tracing::debug!("Using configured static token");
            None
        } else {
            Some(Arc::new(Self::restore(&config, &store).await?))
        };

        let session: Arc<dyn SessionProvider> = match &oidc {
            Some(oidc) => oidc.clone(),
            None => Arc::new(StaticSession::new(config.auth.token.clone())),
        };

        let api: Arc<dyn DocumentApi> = Arc::new(ApiClient::from_config(&config.api, session.clone())?);

        Ok(Self {
            config,
            session,
            api,
            oidc,
            store,
        })
    }

    async fn restore(config: &AppConfig, store: &SessionStore) -> Result<OidcSession, AppError> {
        let oidc = OidcSession::new(config.auth.clone())?;
        let Some(stored) = store.load().await? else {
            return Ok(oidc);
        };

        match oidc.restore(&stored.refresh_token).await {
            Ok(profile) => {
                tracing::debug!(username = profile.display_username(), "Session restored");
            }
            Err(e) if e.is_session_failure() => {
                tracing::warn!(error = %e, "Saved session rejected, discarding it");
                store.clear().await?;
            }
            Err(e) => return Err(e),
        }
        Ok(oidc)
    }

    /// Fail unless the session may enter `route`.
    pub async fn guard(&self, route: Route) -> Result<(), AppError> {
        RouteGuard::new()
            .require(self.session.as_ref(), route)
            .await
            .map_err(|e| match e.kind {
                ErrorKind::Unauthenticated => {
                    AppError::unauthenticated("Not logged in. Run `securedocs login` first.")
                }
                _ => e,
            })
    }

    /// The signed-in user's profile and capabilities.
    pub async fn user(&self) -> Result<UserContext, AppError> {
        UserContext::load(self.session.as_ref()).await
    }

    /// Save the possibly rotated refresh token for the next invocation.
    pub async fn persist(&self) -> Result<(), AppError> {
        let Some(oidc) = &self.oidc else {
            return Ok(());
        };
        let Some(refresh_token) = oidc.refresh_token().await else {
            return Ok(());
        };
        let username = self
            .session
            .profile()
            .await
            .ok()
            .and_then(|p| p.username);
        self.store.save(&refresh_token, username.as_deref()).await
    }

    /// Forget the saved login.
    pub async fn clear(&self) -> Result<(), AppError> {
        self.store.clear().await
    }
}
