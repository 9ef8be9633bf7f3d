//! What the signed-in user may do, derived from their roles.

use serde::Serialize;

use securedocs_core::error::AppError;
use securedocs_core::types::UserId;
use securedocs_entity::permission::{DocumentAction, Permission};
use securedocs_entity::user::{UserProfile, UserRole};

/// Action flags for the user interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub can_upload: bool,
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_share: bool,
    pub is_admin: bool,
}

impl Capabilities {
    /// Capabilities of a user holding `profile`'s roles.
    pub fn for_profile(profile: &UserProfile) -> Self {
        let modify = profile.app_roles().iter().any(UserRole::can_modify);
        Self {
            can_upload: modify,
            can_edit: modify,
            can_delete: modify,
            can_share: modify,
            is_admin: profile.has_role(UserRole::Admin),
        }
    }

    /// No capabilities at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Effective permission of `user` on a document owned by `owner_id`.
    ///
    /// Owners keep full rights on their own documents regardless of role.
    pub fn permission_for(&self, user: UserId, owner_id: UserId) -> Permission {
        if user == owner_id {
            return Permission::full(user);
        }
        Permission {
            user_id: user,
            can_read: true,
            can_write: self.can_edit,
            can_delete: self.can_delete,
            can_share: self.can_share,
        }
    }

    /// Whether the capabilities cover `action`.
    pub fn allows(&self, action: DocumentAction) -> bool {
        match action {
            DocumentAction::Read => true,
            DocumentAction::Write => self.can_edit,
            DocumentAction::Delete => self.can_delete,
            DocumentAction::Share => self.can_share,
        }
    }

    /// Fail with `Forbidden` unless `action` is allowed.
    pub fn require(&self, action: DocumentAction) -> Result<(), AppError> {
        if self.allows(action) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Your role does not allow the '{action}' action"
            )))
        }
    }

    /// Fail with `Forbidden` unless uploads are allowed.
    pub fn require_upload(&self) -> Result<(), AppError> {
        if self.can_upload {
            Ok(())
        } else {
            Err(AppError::forbidden("Your role does not allow uploads"))
        }
    }
}
