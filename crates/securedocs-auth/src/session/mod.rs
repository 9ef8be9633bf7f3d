//! Session providers: where bearer tokens and the signed-in identity come from.

pub mod oidc;
pub mod provider;
pub mod static_token;
pub mod store;
pub mod token_set;

pub use oidc::OidcSession;
pub use provider::SessionProvider;
pub use static_token::StaticSession;
pub use store::SessionStore;
pub use token_set::{TokenResponse, TokenSet};
