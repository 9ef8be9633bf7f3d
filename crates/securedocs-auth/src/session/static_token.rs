//! Session backed by a fixed bearer token.

use async_trait::async_trait;
use tokio::sync::RwLock;

use securedocs_core::error::AppError;
use securedocs_core::types::UserId;
use securedocs_entity::user::UserProfile;

use super::provider::SessionProvider;
use crate::claims::AccessClaims;

#[derive(Debug, Clone)]
struct StaticToken {
    token: String,
    claims: Option<AccessClaims>,
}

/// A session holding one pre-issued access token.
///
/// Identity and roles are read from the token's claims when it is a JWT.
/// Opaque tokens are still sent, but the user appears as an anonymous
/// guest without roles.
#[derive(Debug)]
pub struct StaticSession {
    state: RwLock<Option<StaticToken>>,
}

impl StaticSession {
    /// Create a session from `token`. A blank token yields no session.
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into().trim().to_string();
        let state = if token.is_empty() {
            None
        } else {
            let claims = AccessClaims::decode(&token).ok();
            if claims.is_none() {
                tracing::debug!("Static token is not a JWT, identity claims unavailable");
            }
            Some(StaticToken { token, claims })
        };

        Self {
            state: RwLock::new(state),
        }
    }

    /// A session with no token.
    pub fn anonymous() -> Self {
        Self {
            state: RwLock::new(None),
        }
    }

    fn usable(entry: &StaticToken) -> bool {
        entry.claims.as_ref().is_none_or(|c| !c.is_expired())
    }
}

#[async_trait]
impl SessionProvider for StaticSession {
    async fn is_logged_in(&self) -> bool {
        self.state.read().await.as_ref().is_some_and(Self::usable)
    }

    async fn access_token(&self) -> Result<String, AppError> {
        match self.state.read().await.as_ref() {
            Some(entry) if Self::usable(entry) => Ok(entry.token.clone()),
            Some(_) => Err(AppError::unauthenticated("Access token has expired")),
            None => Err(AppError::unauthenticated("Not logged in")),
        }
    }

    async fn profile(&self) -> Result<UserProfile, AppError> {
        match self.state.read().await.as_ref() {
            Some(entry) if Self::usable(entry) => Ok(match &entry.claims {
                Some(claims) => claims.to_profile(),
                None => UserProfile {
                    id: UserId::from_uuid(uuid::Uuid::nil()),
                    username: None,
                    email: None,
                    first_name: None,
                    last_name: None,
                    roles: Vec::new(),
                },
            }),
            Some(_) => Err(AppError::unauthenticated("Access token has expired")),
            None => Err(AppError::unauthenticated("Not logged in")),
        }
    }

    async fn logout(&self) -> Result<(), AppError> {
        *self.state.write().await = None;
        Ok(())
    }
}
