//! OpenID Connect session against the identity provider's token endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;
use url::form_urlencoded;

use securedocs_core::config::AuthConfig;
use securedocs_core::error::{AppError, ErrorKind};
use securedocs_entity::user::UserProfile;

use super::provider::SessionProvider;
use super::token_set::{TokenResponse, TokenSet};

/// OAuth2 error body returned by the token endpoint.
#[derive(Debug, Deserialize)]
struct OAuthError {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// Session that logs in with the password grant and keeps itself fresh
/// with the refresh-token grant.
#[derive(Debug)]
pub struct OidcSession {
    /// Provider settings.
    config: AuthConfig,
    /// HTTP client for the provider.
    http: reqwest::Client,
    /// Tokens of the current session.
    tokens: RwLock<Option<TokenSet>>,
}

impl OidcSession {
    /// Creates a session with no tokens.
    pub fn new(config: AuthConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to build HTTP client", e))?;

        Ok(Self::with_client(config, http))
    }

    /// Creates a session using an existing HTTP client.
    pub fn with_client(config: AuthConfig, http: reqwest::Client) -> Self {
        Self {
            config,
            http,
            tokens: RwLock::new(None),
        }
    }

    /// Log in with username and password.
    pub async fn login_password(&self, username: &str, password: &str) -> Result<UserProfile, AppError> {
        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "password")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("username", username)
            .append_pair("password", password)
            .append_pair("scope", "openid")
            .finish();

        let set = self.request_tokens(body).await?;
        let profile = set.claims.to_profile();
        tracing::info!(username = %profile.display_username(), "Logged in");
        *self.tokens.write().await = Some(set);
        Ok(profile)
    }

    /// Resume a session from a stored refresh token.
    pub async fn restore(&self, refresh_token: &str) -> Result<UserProfile, AppError> {
        let set = self.refresh_with(refresh_token).await?;
        let profile = set.claims.to_profile();
        *self.tokens.write().await = Some(set);
        Ok(profile)
    }

    /// The refresh token of the current session, for persisting.
    pub async fn refresh_token(&self) -> Option<String> {
        self.tokens
            .read()
            .await
            .as_ref()
            .and_then(|t| t.refresh_token.clone())
    }

    async fn refresh_with(&self, refresh_token: &str) -> Result<TokenSet, AppError> {
        let body = form_urlencoded::Serializer::new(String::new())
            .append_pair("grant_type", "refresh_token")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("refresh_token", refresh_token)
            .finish();

        let mut set = self.request_tokens(body).await?;
        if set.refresh_token.is_none() {
            set.refresh_token = Some(refresh_token.to_string());
        }
        tracing::debug!(expires_at = %set.expires_at, "Access token refreshed");
        Ok(set)
    }

    async fn request_tokens(&self, body: String) -> Result<TokenSet, AppError> {
        let endpoint = self.config.token_endpoint();
        tracing::debug!(url = %endpoint, "POST token endpoint");

        let response = self
            .http
            .post(&endpoint)
            .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Network, "Identity provider unreachable", e)
            })?;

        let status = response.status();
        if status.is_success() {
            let body: TokenResponse = response.json().await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Serialization,
                    "Invalid token endpoint response",
                    e,
                )
            })?;
            return TokenSet::from_response(body);
        }

        let detail = match response.json::<OAuthError>().await {
            Ok(err) => err.error_description.unwrap_or(err.error),
            Err(_) => status.to_string(),
        };

        if status.is_client_error() {
            Err(AppError::unauthenticated(format!("Login rejected: {detail}")))
        } else {
            Err(AppError::server(format!("Identity provider error: {detail}")))
        }
    }
}

#[async_trait]
impl SessionProvider for OidcSession {
    async fn is_logged_in(&self) -> bool {
        self.tokens
            .read()
            .await
            .as_ref()
            .is_some_and(|t| !t.is_expired() || t.refresh_token.is_some())
    }

    async fn access_token(&self) -> Result<String, AppError> {
        let min_validity = self.config.min_validity_seconds;

        {
            let guard = self.tokens.read().await;
            match guard.as_ref() {
                None => return Err(AppError::unauthenticated("Not logged in")),
                Some(set) if !set.needs_refresh(min_validity) => {
                    return Ok(set.access_token.clone());
                }
                Some(_) => {}
            }
        }

        let mut guard = self.tokens.write().await;
        let Some(current) = guard.as_ref() else {
            return Err(AppError::unauthenticated("Not logged in"));
        };
        // Another task may have refreshed while we waited for the lock.
        if !current.needs_refresh(min_validity) {
            return Ok(current.access_token.clone());
        }

        let Some(refresh_token) = current.refresh_token.clone() else {
            if current.is_expired() {
                *guard = None;
                return Err(AppError::unauthenticated("Access token has expired"));
            }
            return Ok(current.access_token.clone());
        };

        match self.refresh_with(&refresh_token).await {
            Ok(set) => {
                let token = set.access_token.clone();
                *guard = Some(set);
                Ok(token)
            }
            Err(e) if e.is_session_failure() => {
                tracing::warn!(error = %e, "Session refresh rejected, logging out");
                *guard = None;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    async fn profile(&self) -> Result<UserProfile, AppError> {
        // Refreshes when needed so the roles reflect the provider's state.
        self.access_token().await?;
        match self.tokens.read().await.as_ref() {
            Some(set) => Ok(set.claims.to_profile()),
            None => Err(AppError::unauthenticated("Not logged in")),
        }
    }

    async fn logout(&self) -> Result<(), AppError> {
        let Some(set) = self.tokens.write().await.take() else {
            return Ok(());
        };

        let Some(refresh_token) = set.refresh_token else {
            return Ok(());
        };

        // The serializer is not Send, so it must not live across the await.
        let body = {
            let mut form = form_urlencoded::Serializer::new(String::new());
            form.append_pair("client_id", &self.config.client_id)
                .append_pair("refresh_token", &refresh_token);
            if let Some(id_token) = &set.id_token {
                form.append_pair("id_token_hint", id_token);
            }
            form.finish()
        };

        let result = self
            .http
            .post(self.config.logout_endpoint())
            .header(reqwest::header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                tracing::info!("Logged out");
                Ok(())
            }
            Ok(response) => {
                tracing::warn!(status = %response.status(), "End-session request failed");
                Ok(())
            }
            Err(e) => Err(AppError::with_source(
                ErrorKind::Network,
                "Identity provider unreachable during logout",
                e,
            )),
        }
    }
}
