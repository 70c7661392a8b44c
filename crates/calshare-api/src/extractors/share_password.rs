//! Link password supplied alongside a share token.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Header carrying the password of a protected shared link.
pub const SHARE_PASSWORD_HEADER: &str = "x-share-password";

/// The `X-Share-Password` header value, if any. Empty counts as absent.
#[derive(Clone, Default)]
pub struct SharePassword(pub Option<String>);

impl SharePassword {
    /// Borrow the password.
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl std::fmt::Debug for SharePassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = self.0.as_ref().map(|_| "[REDACTED]");
        f.debug_tuple("SharePassword").field(&shown).finish()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for SharePassword {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let password = parts
            .headers
            .get(SHARE_PASSWORD_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(String::from);
        Ok(SharePassword(password))
    }
}
