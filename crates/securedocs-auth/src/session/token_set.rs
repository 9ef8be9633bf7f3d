//! Token endpoint responses and the cached token set.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use securedocs_core::error::AppError;

use crate::claims::AccessClaims;

/// Body of a successful OpenID Connect token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    /// The access token.
    pub access_token: String,
    /// Lifetime of the access token in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// The refresh token, if the grant issued one.
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// ID token, used as a hint on logout.
    #[serde(default)]
    pub id_token: Option<String>,
}

/// Tokens held by an active session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenSet {
    /// The access token.
    pub access_token: String,
    /// When the access token stops being valid.
    pub expires_at: DateTime<Utc>,
    /// Refresh token, when available.
    pub refresh_token: Option<String>,
    /// ID token, when available.
    pub id_token: Option<String>,
    /// Claims decoded from the access token.
    pub claims: AccessClaims,
}

impl TokenSet {
    /// Build a token set from a token endpoint response.
    ///
    /// The `exp` claim wins over `expires_in`; the latter only fills in
    /// when the claim is absent or out of range.
    pub fn from_response(response: TokenResponse) -> Result<Self, AppError> {
        let claims = AccessClaims::decode(&response.access_token)?;
        let expires_at = claims
            .expires_at()
            .unwrap_or_else(|| Utc::now() + Duration::seconds(response.expires_in.unwrap_or(0)));

        Ok(Self {
            access_token: response.access_token,
            expires_at,
            refresh_token: response.refresh_token,
            id_token: response.id_token,
            claims,
        })
    }

    /// Whether the access token expires within `min_validity_seconds`.
    pub fn needs_refresh(&self, min_validity_seconds: u64) -> bool {
        let threshold = Utc::now() + Duration::seconds(min_validity_seconds as i64);
        self.expires_at <= threshold
    }

    /// Whether the access token has already expired.
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}
