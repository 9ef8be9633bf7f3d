//! Access token claims issued by the identity provider.
//!
//! The client never holds the provider's signing keys, so tokens are only
//! decoded here, not verified. The API server performs verification on
//! every request.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use securedocs_core::error::AppError;
use securedocs_core::types::UserId;
use securedocs_entity::user::UserProfile;

/// Realm-level role assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmAccess {
    /// Role names granted in the realm.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject (the user ID).
    pub sub: UserId,
    /// Expiration timestamp (seconds since epoch).
    #[serde(default)]
    pub exp: Option<i64>,
    /// Login name.
    #[serde(default)]
    pub preferred_username: Option<String>,
    /// E-mail address.
    #[serde(default)]
    pub email: Option<String>,
    /// Given name.
    #[serde(default)]
    pub given_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub family_name: Option<String>,
    /// Realm roles.
    #[serde(default)]
    pub realm_access: RealmAccess,
}

impl AccessClaims {
    /// Decode the payload segment of a compact JWT.
    pub fn decode(token: &str) -> Result<Self, AppError> {
        let mut segments = token.split('.');
        let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
            (Some(_), Some(payload), Some(_), None) => payload,
            _ => return Err(AppError::unauthenticated("Malformed access token")),
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|_| AppError::unauthenticated("Malformed access token payload"))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| AppError::unauthenticated(format!("Unreadable access token claims: {e}")))
    }

    /// The `exp` claim as a timestamp, `None` when absent or out of range.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// Whether the `exp` claim has passed. Tokens without one never expire
    /// on the client side.
    pub fn is_expired(&self) -> bool {
        self.exp.is_some_and(|exp| Utc::now().timestamp() >= exp)
    }

    /// Build the user profile the claims describe.
    pub fn to_profile(&self) -> UserProfile {
        UserProfile {
            id: self.sub,
            username: self.preferred_username.clone(),
            email: self.email.clone(),
            first_name: self.given_name.clone(),
            last_name: self.family_name.clone(),
            roles: self.realm_access.roles.clone(),
        }
    }
}
