//! The session capability handed to everything that talks to the API.

use async_trait::async_trait;

use securedocs_core::error::AppError;
use securedocs_entity::user::{UserProfile, UserRole};

/// Source of the bearer token and identity of the signed-in user.
///
/// Implementations refresh tokens on their own; callers ask for a token
/// immediately before each request and never cache it.
#[async_trait]
pub trait SessionProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Whether a usable session exists.
    async fn is_logged_in(&self) -> bool;

    /// A currently valid access token, refreshed first if it is about to
    /// expire. Fails with `Unauthenticated` when there is no session.
    async fn access_token(&self) -> Result<String, AppError>;

    /// The signed-in user's profile.
    async fn profile(&self) -> Result<UserProfile, AppError>;

    /// Whether the signed-in user holds `role`. False without a session.
    async fn has_role(&self, role: UserRole) -> bool {
        match self.profile().await {
            Ok(profile) => profile.has_role(role),
            Err(_) => false,
        }
    }

    /// End the session.
    async fn logout(&self) -> Result<(), AppError>;
}
