//! Navigable screens of the application.

use std::fmt;

use securedocs_entity::user::UserRole;

/// A screen the user can navigate to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Landing page after login; the redirect target for denied routes.
    Dashboard,
    /// Folder and document browser.
    Documents,
    /// Documents shared with the user.
    Shared,
    /// Recently used documents.
    Recent,
    /// Administration area.
    Admin,
    /// Public share link page, reachable without a session.
    PublicShare,
}

impl Route {
    /// Where denied users are sent.
    pub const HOME: Route = Route::Dashboard;

    /// Whether entering the route needs a session.
    pub fn requires_session(&self) -> bool {
        !matches!(self, Self::PublicShare)
    }

    /// Roles the user must all hold.
    pub fn required_roles(&self) -> &'static [UserRole] {
        match self {
            Self::Admin => &[UserRole::Admin],
            _ => &[],
        }
    }

    /// URL path of the route.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Documents => "/documents",
            Self::Shared => "/shared",
            Self::Recent => "/recent",
            Self::Admin => "/admin",
            Self::PublicShare => "/share",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
