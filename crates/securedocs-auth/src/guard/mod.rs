//! Route guards and role-derived capabilities.

pub mod capabilities;
pub mod enforcer;
pub mod route;

pub use capabilities::Capabilities;
pub use enforcer::{GuardDecision, RouteGuard};
pub use route::Route;
