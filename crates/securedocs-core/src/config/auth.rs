//! Identity provider configuration.

use serde::{Deserialize, Serialize};

/// OpenID Connect provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the identity provider (e.g. a Keycloak server).
    #[serde(default = "default_issuer_url")]
    pub issuer_url: String,
    /// Realm holding the application's users.
    #[serde(default = "default_realm")]
    pub realm: String,
    /// Public client identifier registered with the provider.
    #[serde(default = "default_client_id")]
    pub client_id: String,
    /// Refresh the access token when fewer seconds than this remain.
    #[serde(default = "default_min_validity")]
    pub min_validity_seconds: u64,
    /// Optional fixed bearer token; bypasses the provider when set.
    #[serde(default)]
    pub token: String,
}

impl AuthConfig {
    /// The realm's OpenID Connect endpoint prefix.
    pub fn realm_url(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect",
            self.issuer_url.trim_end_matches('/'),
            self.realm
        )
    }

    /// Token endpoint used for password and refresh grants.
    pub fn token_endpoint(&self) -> String {
        format!("{}/token", self.realm_url())
    }

    /// End-session endpoint used on logout.
    pub fn logout_endpoint(&self) -> String {
        format!("{}/logout", self.realm_url())
    }

    /// Whether a static token was configured.
    pub fn has_static_token(&self) -> bool {
        !self.token.trim().is_empty()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            issuer_url: default_issuer_url(),
            realm: default_realm(),
            client_id: default_client_id(),
            min_validity_seconds: default_min_validity(),
            token: String::new(),
        }
    }
}

fn default_issuer_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_realm() -> String {
    "securedocs".to_string()
}

fn default_client_id() -> String {
    "secure-docs-app".to_string()
}

fn default_min_validity() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_strip_trailing_slash() {
        let config = AuthConfig {
            issuer_url: "https://id.example.com/".to_string(),
            ..AuthConfig::default()
        };
        assert_eq!(
            config.token_endpoint(),
            "https://id.example.com/realms/securedocs/protocol/openid-connect/token"
        );
        assert_eq!(
            config.logout_endpoint(),
            "https://id.example.com/realms/securedocs/protocol/openid-connect/logout"
        );
    }
}
