//! User domain entities.

pub mod profile;
pub mod role;

pub use profile::UserProfile;
pub use role::UserRole;
