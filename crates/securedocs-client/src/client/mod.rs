//! HTTP implementation of [`DocumentApi`](crate::api::DocumentApi).

mod document_api;
mod request;

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use securedocs_auth::session::SessionProvider;
use securedocs_core::config::ApiConfig;
use securedocs_core::error::{AppError, ErrorKind};
use securedocs_core::result::AppResult;

/// Client for the document API server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// Shared HTTP connection pool.
    http: reqwest::Client,
    /// Base URL, always ending in `/`.
    base_url: Url,
    /// Source of the bearer token.
    session: Arc<dyn SessionProvider>,
}

impl ApiClient {
    /// Start building a client on behalf of `session`.
    pub fn builder(session: Arc<dyn SessionProvider>) -> ApiClientBuilder {
        ApiClientBuilder {
            base_url: ApiConfig::default().base_url,
            timeout: Duration::from_secs(30),
            user_agent: None,
            session,
        }
    }

    /// Build a client from the `[api]` configuration section.
    pub fn from_config(config: &ApiConfig, session: Arc<dyn SessionProvider>) -> AppResult<Self> {
        Self::builder(session)
            .base_url(&config.base_url)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(&config.user_agent)
            .build()
    }

    /// The session requests are made for.
    pub fn session(&self) -> &Arc<dyn SessionProvider> {
        &self.session
    }

    /// The API base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

/// Builder for [`ApiClient`].
#[derive(Debug)]
pub struct ApiClientBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: Option<String>,
    session: Arc<dyn SessionProvider>,
}

impl ApiClientBuilder {
    /// Set the API base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> AppResult<ApiClient> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url = Url::parse(&raw).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid API base URL '{}'", self.base_url),
                e,
            )
        })?;

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| ApiConfig::default().user_agent);
        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::with_source(ErrorKind::Internal, "Failed to build HTTP client", e))?;

        Ok(ApiClient {
            http,
            base_url,
            session: self.session,
        })
    }
}
