//! # securedocs-auth
//!
//! Session handling against the external OpenID Connect identity provider,
//! access-token claim decoding, role-derived capabilities, and the route
//! guard that decides whether a screen may be entered.
//!
//! Session state is never global: a [`session::SessionProvider`] is created
//! once and passed explicitly to everything that calls the API.

pub mod claims;
pub mod guard;
pub mod session;

pub use claims::AccessClaims;
pub use guard::{Capabilities, GuardDecision, Route, RouteGuard};
pub use session::{OidcSession, SessionProvider, SessionStore, StaticSession};
