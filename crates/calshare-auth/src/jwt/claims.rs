//! Claims carried by owner session tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims of an HS256 session token issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerClaims {
    /// Subject: the authenticated user id.
    pub sub: Uuid,
    /// Expiration (seconds since epoch).
    pub exp: i64,
    /// Issued-at (seconds since epoch).
    #[serde(default)]
    pub iat: Option<i64>,
    /// Email address, when the provider includes it.
    #[serde(default)]
    pub email: Option<String>,
}

impl OwnerClaims {
    /// The authenticated user id.
    pub fn user_id(&self) -> Uuid {
        self.sub
    }

    /// Expiration as a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
