//! The process-wide share token secret.

use std::fmt;
use std::sync::Arc;

use tracing::error;

use crate::crypto::{get_required_env_var, validate_secret_key};
use crate::token::TokenError;

/// Validated HMAC key, loaded once and shared read-only.
#[derive(Clone)]
pub struct TokenSecret {
    key: Arc<str>,
}

impl TokenSecret {
    /// Wrap a secret, rejecting it when empty or shorter than 32 characters.
    pub fn new(key: impl Into<String>) -> Result<Self, TokenError> {
        let key = key.into();
        validate_secret_key(&key)?;
        Ok(Self {
            key: Arc::from(key),
        })
    }

    /// Load the secret from the named environment variable.
    pub fn from_env(var_name: &str) -> Result<Self, TokenError> {
        get_required_env_var(var_name)
            .and_then(Self::new)
            .inspect_err(|e| error!(variable = var_name, error = %e, "Token secret unavailable"))
    }

    /// The raw key material.
    pub fn expose(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("TokenSecret([REDACTED])")
    }
}
