//! The outcome of resolving a shared-link token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use calshare_core::{AppError, ErrorCode, ErrorKind};

use crate::shared_link::{PermissionLevel, SharedLink};

/// Access granted by a resolved, unexpired, unlocked shared link.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedLinkPermission {
    /// Backing link record.
    pub link_id: Uuid,
    /// Calendar the bearer may access.
    pub calendar_id: Uuid,
    /// Granted level.
    pub level: PermissionLevel,
    /// The token the permission was resolved from.
    #[serde(skip_serializing, default)]
    pub token: String,
    /// Whether the link required a password.
    pub is_password_protected: bool,
    /// Link expiry, if any.
    pub expires_at: Option<DateTime<Utc>>,
}

impl SharedLinkPermission {
    /// Build the permission granted by `link` to the bearer of `token`.
    pub fn from_link(link: &SharedLink, token: impl Into<String>) -> Self {
        Self {
            link_id: link.id,
            calendar_id: link.calendar_id,
            level: link.permissions,
            token: token.into(),
            is_password_protected: link.is_password_protected(),
            expires_at: link.expires_at,
        }
    }
}

impl fmt::Debug for SharedLinkPermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedLinkPermission")
            .field("link_id", &self.link_id)
            .field("calendar_id", &self.calendar_id)
            .field("level", &self.level)
            .field("token", &"[REDACTED]")
            .field("is_password_protected", &self.is_password_protected)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Why a token did not resolve to a permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkFailure {
    /// Structurally or cryptographically invalid token.
    InvalidToken,
    /// No record backs the token (never created or revoked).
    NotFound,
    /// The backing record has expired.
    Expired,
    /// The link is protected and no password was supplied.
    PasswordRequired,
    /// The supplied password does not match.
    PasswordIncorrect,
    /// Resolution failed for an unexpected reason.
    Internal,
}

impl LinkFailure {
    /// Stable error code for this failure.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidToken => ErrorCode::InvalidToken,
            Self::NotFound => ErrorCode::LinkNotFound,
            Self::Expired => ErrorCode::ExpiredLink,
            Self::PasswordRequired => ErrorCode::PasswordRequired,
            Self::PasswordIncorrect => ErrorCode::PasswordIncorrect,
            Self::Internal => ErrorCode::InternalError,
        }
    }

    /// Client-facing message. Password failures share one message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidToken | Self::NotFound => "Invalid or revoked share link",
            Self::Expired => "This share link has expired",
            Self::PasswordRequired | Self::PasswordIncorrect => {
                "This share link requires a valid password"
            }
            Self::Internal => "Unable to validate share link",
        }
    }
}

/// Failure category exposed to clients.
///
/// A bad checksum and a missing record collapse into `Invalid` so the
/// decision body cannot be used to confirm a guessed checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenialReason {
    /// The token does not resolve to a live link.
    Invalid,
    /// The link has expired.
    Expired,
    /// A password is needed.
    PasswordRequired,
    /// The supplied password was rejected.
    PasswordIncorrect,
    /// Resolution failed on the server.
    Unavailable,
}

impl From<LinkFailure> for DenialReason {
    fn from(failure: LinkFailure) -> Self {
        match failure {
            LinkFailure::InvalidToken | LinkFailure::NotFound => Self::Invalid,
            LinkFailure::Expired => Self::Expired,
            LinkFailure::PasswordRequired => Self::PasswordRequired,
            LinkFailure::PasswordIncorrect => Self::PasswordIncorrect,
            LinkFailure::Internal => Self::Unavailable,
        }
    }
}

impl From<LinkFailure> for AppError {
    fn from(failure: LinkFailure) -> Self {
        let kind = match failure {
            LinkFailure::InvalidToken | LinkFailure::NotFound | LinkFailure::Expired => {
                ErrorKind::NotFound
            }
            LinkFailure::PasswordRequired | LinkFailure::PasswordIncorrect => {
                ErrorKind::Authentication
            }
            LinkFailure::Internal => ErrorKind::Internal,
        };
        let code = match failure {
            LinkFailure::NotFound => ErrorCode::InvalidToken,
            other => other.code(),
        };
        AppError::new(kind, failure.message()).with_code(code)
    }
}

/// Request-scoped permission decision for a token bearer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionValidationResult {
    /// Whether access was granted.
    pub is_valid: bool,
    /// Present iff `is_valid`.
    pub permission: Option<SharedLinkPermission>,
    /// Human-readable reason when invalid.
    pub error: Option<String>,
    /// True iff the link is otherwise valid and no password was supplied.
    pub requires_password: bool,
    /// Failure category, used as a hint by clients.
    pub reason: Option<DenialReason>,
    /// Precise failure, kept server-side.
    #[serde(skip)]
    pub failure: Option<LinkFailure>,
}

impl PermissionValidationResult {
    /// A successful decision.
    pub fn granted(permission: SharedLinkPermission) -> Self {
        Self {
            is_valid: true,
            permission: Some(permission),
            error: None,
            requires_password: false,
            reason: None,
            failure: None,
        }
    }

    /// A failed decision.
    pub fn denied(failure: LinkFailure) -> Self {
        Self {
            is_valid: false,
            permission: None,
            error: Some(failure.message().to_string()),
            requires_password: failure == LinkFailure::PasswordRequired,
            reason: Some(failure.into()),
            failure: Some(failure),
        }
    }

    /// The granted level, if any.
    pub fn level(&self) -> Option<PermissionLevel> {
        self.permission.as_ref().map(|p| p.level)
    }
}
