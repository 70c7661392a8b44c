//! Shared-link token configuration.

use serde::{Deserialize, Serialize};

/// How shared-link passwords are hashed when they are set or changed.
///
/// Verification always accepts both formats, so switching schemes does not
/// invalidate links that were protected under the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    /// Unsalted SHA-256 hex digest (the historical stored format).
    #[default]
    Sha256,
    /// Argon2id PHC string with a random salt.
    Argon2,
}

/// Share token wire-format and secret settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Name of the environment variable holding the HMAC secret.
    #[serde(default = "default_secret_env")]
    pub secret_env: String,
    /// Token type prefix (first segment).
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Bytes of randomness in the lookup component (hex length is double).
    #[serde(default = "default_random_bytes")]
    pub random_bytes: usize,
    /// Number of hex characters of the HMAC kept as checksum.
    #[serde(default = "default_checksum_length")]
    pub checksum_length: usize,
    /// Hashing scheme for newly set link passwords.
    #[serde(default)]
    pub password_scheme: PasswordScheme,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            secret_env: default_secret_env(),
            prefix: default_prefix(),
            random_bytes: default_random_bytes(),
            checksum_length: default_checksum_length(),
            password_scheme: PasswordScheme::default(),
        }
    }
}

fn default_secret_env() -> String {
    "TOKEN_SECRET_KEY".to_string()
}

fn default_prefix() -> String {
    "cal".to_string()
}

fn default_random_bytes() -> usize {
    32
}

fn default_checksum_length() -> usize {
    8
}
