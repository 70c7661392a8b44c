//! Shared link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::permission::PermissionLevel;

/// Token version of HMAC-signed `<prefix>_<id>_<random>_<checksum>` tokens.
pub const CURRENT_TOKEN_VERSION: i32 = 2;

/// Token version of the retired bare-UUID tokens. Never issued, never matched.
pub const LEGACY_TOKEN_VERSION: i32 = 1;

/// A persisted shared link granting token-bearer access to one calendar.
///
/// Only the random component of the token is stored; the full token is
/// returned once at creation and cannot be rebuilt from this row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SharedLink {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Calendar the link grants access to.
    pub calendar_id: Uuid,
    /// Owner who created the link.
    pub user_id: Option<Uuid>,
    /// Random component of the token; unique lookup key.
    #[serde(skip_serializing)]
    pub token_random: String,
    /// Token schema version.
    pub token_version: i32,
    /// Access level granted.
    pub permissions: PermissionLevel,
    /// Hash of the link password; `None` means unprotected.
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Expiry; `None` means the link never expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
    /// When the link was last modified.
    pub updated_at: DateTime<Utc>,
}

impl SharedLink {
    /// Whether the link is past its expiry at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires| expires <= now)
    }

    /// Whether the link is past its expiry right now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Whether the link requires a password.
    pub fn is_password_protected(&self) -> bool {
        self.password_hash.is_some()
    }

    /// Whether the row uses the current token scheme.
    pub fn is_current_version(&self) -> bool {
        self.token_version == CURRENT_TOKEN_VERSION
    }
}

/// Data required to persist a new shared link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSharedLink {
    /// Calendar being shared.
    pub calendar_id: Uuid,
    /// Owner creating the link.
    pub user_id: Option<Uuid>,
    /// Random component extracted from the freshly generated token.
    pub token_random: String,
    /// Token schema version.
    pub token_version: i32,
    /// Access level.
    pub permissions: PermissionLevel,
    /// Already-hashed password.
    pub password_hash: Option<String>,
    /// Expiry (`None` = never).
    pub expires_at: Option<DateTime<Utc>>,
}

/// Partial update of a shared link.
///
/// Outer `None` leaves a field untouched; `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SharedLinkPatch {
    /// New access level.
    pub permissions: Option<PermissionLevel>,
    /// New password hash, or `Some(None)` to remove protection.
    pub password_hash: Option<Option<String>>,
    /// New expiry, or `Some(None)` to make the link permanent.
    pub expires_at: Option<Option<DateTime<Utc>>>,
}

impl SharedLinkPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.permissions.is_none() && self.password_hash.is_none() && self.expires_at.is_none()
    }

    /// Apply the patch to a link in place, stamping `updated_at`.
    pub fn apply_to(&self, link: &mut SharedLink, now: DateTime<Utc>) {
        if let Some(permissions) = self.permissions {
            link.permissions = permissions;
        }
        if let Some(ref password_hash) = self.password_hash {
            link.password_hash = password_hash.clone();
        }
        if let Some(expires_at) = self.expires_at {
            link.expires_at = expires_at;
        }
        link.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link(expires_at: Option<DateTime<Utc>>) -> SharedLink {
        let now = Utc::now();
        SharedLink {
            id: Uuid::new_v4(),
            calendar_id: Uuid::new_v4(),
            user_id: Some(Uuid::new_v4()),
            token_random: "ab".repeat(32),
            token_version: CURRENT_TOKEN_VERSION,
            permissions: PermissionLevel::View,
            password_hash: None,
            expires_at,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_expiry_boundaries() {
        let now = Utc::now();
        assert!(!link(None).is_expired_at(now));
        assert!(link(Some(now - Duration::seconds(1))).is_expired_at(now));
        assert!(link(Some(now)).is_expired_at(now));
        assert!(!link(Some(now + Duration::hours(1))).is_expired_at(now));
    }

    #[test]
    fn test_patch_clears_and_keeps() {
        let now = Utc::now();
        let mut l = link(Some(now + Duration::days(1)));
        l.password_hash = Some("hash".to_string());

        let patch = SharedLinkPatch {
            permissions: Some(PermissionLevel::Edit),
            password_hash: Some(None),
            expires_at: None,
        };
        patch.apply_to(&mut l, now);

        assert_eq!(l.permissions, PermissionLevel::Edit);
        assert!(l.password_hash.is_none());
        assert!(l.expires_at.is_some());
        assert_eq!(l.updated_at, now);
    }

    #[test]
    fn test_serialization_hides_secrets() {
        let mut l = link(None);
        l.password_hash = Some("deadbeef".to_string());
        let json = serde_json::to_value(&l).unwrap();
        assert!(json.get("password_hash").is_none());
        assert!(json.get("token_random").is_none());
        assert_eq!(json["permissions"], "view");
    }
}
