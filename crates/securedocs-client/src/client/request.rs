//! Request plumbing shared by every endpoint.

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use securedocs_core::error::AppError;
use securedocs_core::result::AppResult;

use super::ApiClient;
use crate::error::{status_error, transport_error};

impl ApiClient {
    /// Resolve an endpoint path against the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> AppResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AppError::internal(format!("Invalid endpoint path '{path}': {e}")))
    }

    /// Start an authenticated request.
    ///
    /// The token is fetched before anything is sent, so a missing session
    /// fails here and no request reaches the server.
    pub(crate) async fn request(&self, method: Method, url: Url) -> AppResult<RequestBuilder> {
        let token = self.session.access_token().await?;
        tracing::debug!(%method, %url, "API request");
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    /// Send a request and turn failure statuses into errors.
    pub(crate) async fn send(&self, request: RequestBuilder) -> AppResult<Response> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = status_error(status, &body);
        tracing::debug!(%status, error = %err, "API request failed");
        Err(err)
    }

    /// Send a request and decode a JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> AppResult<T> {
        let response = self.send(request).await?;
        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Send a request whose response body is ignored.
    pub(crate) async fn send_empty(&self, request: RequestBuilder) -> AppResult<()> {
        self.send(request).await?;
        Ok(())
    }
}
