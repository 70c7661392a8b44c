//! Owner authentication configuration.

use serde::{Deserialize, Serialize};

/// Settings for verifying owner session tokens issued by the identity provider.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret the identity provider signs session JWTs with (HS256).
    pub jwt_secret: String,
    /// Clock-skew leeway in seconds when checking `exp`.
    #[serde(default = "default_leeway")]
    pub jwt_leeway_seconds: u64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_leeway_seconds", &self.jwt_leeway_seconds)
            .finish()
    }
}

fn default_leeway() -> u64 {
    5
}
