//! Signed-in user profile.

use serde::{Deserialize, Serialize};

use securedocs_core::types::UserId;

use super::role::UserRole;

/// Fallback display name while no profile is available.
pub const GUEST_USERNAME: &str = "Guest";

/// The identity of the signed-in user as reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Subject identifier.
    pub id: UserId,
    /// Login name, if the provider released it.
    pub username: Option<String>,
    /// E-mail address.
    pub email: Option<String>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Raw role claims, including ones the application does not know.
    pub roles: Vec<String>,
}

impl UserProfile {
    /// The username, or `"Guest"` when unknown.
    pub fn display_username(&self) -> &str {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or(GUEST_USERNAME)
    }

    /// Full name when both parts are present.
    pub fn full_name(&self) -> Option<String> {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => Some(format!("{first} {last}")),
            (Some(first), None) => Some(first.clone()),
            (None, Some(last)) => Some(last.clone()),
            (None, None) => None,
        }
    }

    /// The application roles among the raw claims.
    pub fn app_roles(&self) -> Vec<UserRole> {
        self.roles.iter().filter_map(|r| r.parse().ok()).collect()
    }

    /// Check whether the user holds `role`.
    pub fn has_role(&self, role: UserRole) -> bool {
        self.roles
            .iter()
            .any(|r| r.eq_ignore_ascii_case(role.as_str()))
    }
}
