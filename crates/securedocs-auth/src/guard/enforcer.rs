//! Route guard decisions.

use securedocs_core::error::AppError;
use securedocs_entity::user::UserRole;

use super::route::Route;
use crate::session::SessionProvider;

/// Outcome of a route guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Enter the route.
    Allow,
    /// Start the identity provider's login flow.
    Login,
    /// Logged in but lacking a role; go to the given route instead.
    Redirect(Route),
}

/// Decides whether a route may be entered.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard;

impl RouteGuard {
    /// Creates a new guard.
    pub fn new() -> Self {
        Self
    }

    /// Check a session against an explicit role list.
    pub async fn check(&self, session: &dyn SessionProvider, required_roles: &[UserRole]) -> GuardDecision {
        if !session.is_logged_in().await {
            return GuardDecision::Login;
        }

        if required_roles.is_empty() {
            return GuardDecision::Allow;
        }

        let profile = match session.profile().await {
            Ok(profile) => profile,
            Err(e) if e.is_session_failure() => return GuardDecision::Login,
            Err(e) => {
                tracing::warn!(error = %e, "Could not read profile for role check");
                return GuardDecision::Redirect(Route::HOME);
            }
        };

        if required_roles.iter().all(|role| profile.has_role(*role)) {
            GuardDecision::Allow
        } else {
            tracing::debug!(?required_roles, "Missing role, redirecting home");
            GuardDecision::Redirect(Route::HOME)
        }
    }

    /// Check whether `route` may be entered.
    pub async fn check_route(&self, session: &dyn SessionProvider, route: Route) -> GuardDecision {
        if !route.requires_session() {
            return GuardDecision::Allow;
        }
        self.check(session, route.required_roles()).await
    }

    /// Like [`check_route`](Self::check_route), as a `Result`.
    ///
    /// `Login` becomes `Unauthenticated`, `Redirect` becomes `Forbidden`.
    pub async fn require(&self, session: &dyn SessionProvider, route: Route) -> Result<(), AppError> {
        match self.check_route(session, route).await {
            GuardDecision::Allow => Ok(()),
            GuardDecision::Login => Err(AppError::unauthenticated(format!(
                "Login required to open {route}"
            ))),
            GuardDecision::Redirect(_) => Err(AppError::forbidden(format!(
                "Missing role for {route}"
            ))),
        }
    }
}
