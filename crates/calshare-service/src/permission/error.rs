//! Typed permission errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use calshare_core::error::{AppError, ErrorCode, ErrorKind};
use calshare_entity::permission::Action;

/// Stable codes carried by [`PermissionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionErrorCode {
    /// The token is unusable.
    InvalidToken,
    /// The link has expired.
    ExpiredLink,
    /// The link needs a password.
    PasswordRequired,
    /// The bearer lacks the level the action needs.
    InsufficientPermissions,
    /// The calendar is not reachable with this permission.
    CalendarNotFound,
    /// The store failed.
    DatabaseError,
}

impl PermissionErrorCode {
    /// The matching application-wide code.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidToken => ErrorCode::InvalidToken,
            Self::ExpiredLink => ErrorCode::ExpiredLink,
            Self::PasswordRequired => ErrorCode::PasswordRequired,
            Self::InsufficientPermissions => ErrorCode::InsufficientPermissions,
            Self::CalendarNotFound => ErrorCode::CalendarNotFound,
            Self::DatabaseError => ErrorCode::DatabaseError,
        }
    }

    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidToken | Self::ExpiredLink | Self::CalendarNotFound => ErrorKind::NotFound,
            Self::PasswordRequired => ErrorKind::Authentication,
            Self::InsufficientPermissions => ErrorKind::Authorization,
            Self::DatabaseError => ErrorKind::Database,
        }
    }
}

/// Raised by `PermissionValidator::require_permission`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct PermissionError {
    /// Machine-readable code.
    pub code: PermissionErrorCode,
    /// Human-readable message.
    pub message: String,
    /// The action that was refused, if any.
    pub action: Option<Action>,
    /// Whether the caller was authenticated.
    pub is_authenticated: bool,
}

impl PermissionError {
    /// Denial of `action` for lack of permission.
    pub fn insufficient(action: Action, is_authenticated: bool) -> Self {
        Self {
            code: PermissionErrorCode::InsufficientPermissions,
            message: format!("Insufficient permissions for {action} access"),
            action: Some(action),
            is_authenticated,
        }
    }

    /// The permission does not cover the requested calendar.
    pub fn calendar_not_found(is_authenticated: bool) -> Self {
        Self {
            code: PermissionErrorCode::CalendarNotFound,
            message: "Calendar not found".to_string(),
            action: None,
            is_authenticated,
        }
    }
}

impl From<PermissionError> for AppError {
    fn from(err: PermissionError) -> Self {
        AppError::new(err.code.kind(), err.message).with_code(err.code.error_code())
    }
}
