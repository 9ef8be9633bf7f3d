//! The signed-in user as seen by the services.

use securedocs_auth::guard::Capabilities;
use securedocs_auth::session::SessionProvider;
use securedocs_core::result::AppResult;
use securedocs_entity::document::Document;
use securedocs_entity::permission::Permission;
use securedocs_entity::user::UserProfile;

/// Identity and capabilities of the user an operation runs for.
#[derive(Debug, Clone)]
pub struct UserContext {
    /// The user's profile.
    pub profile: UserProfile,
    /// Actions the user's roles allow.
    pub capabilities: Capabilities,
}

impl UserContext {
    /// Build a context from a profile.
    pub fn new(profile: UserProfile) -> Self {
        let capabilities = Capabilities::for_profile(&profile);
        Self {
            profile,
            capabilities,
        }
    }

    /// Load the context of the session's user.
    pub async fn load(session: &dyn SessionProvider) -> AppResult<Self> {
        Ok(Self::new(session.profile().await?))
    }

    /// The user's effective permission on `document`.
    pub fn permission_on(&self, document: &Document) -> Permission {
        self.capabilities
            .permission_for(self.profile.id, document.owner_id)
    }
}
