//! Unified application error types for Calshare.
//!
//! All crates map their internal errors into [`AppError`] for consistent
//! propagation through the ? operator. Every error carries an [`ErrorKind`]
//! (the category, used for HTTP status mapping) and an [`ErrorCode`] (the
//! stable machine-readable code clients branch on).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found (or is no longer reachable).
    NotFound,
    /// The caller is not authenticated, or a link password is missing/wrong.
    Authentication,
    /// The caller is authenticated but lacks the required permission.
    Authorization,
    /// Input validation failed.
    Validation,
    /// A conflict occurred (duplicate entry, unique violation).
    Conflict,
    /// An internal server error occurred.
    Internal,
    /// A database error occurred.
    Database,
    /// A deployment/configuration error occurred. Never user-recoverable.
    Configuration,
    /// A serialization/deserialization error occurred.
    Serialization,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Authentication => write!(f, "AUTHENTICATION"),
            Self::Authorization => write!(f, "AUTHORIZATION"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Conflict => write!(f, "CONFLICT"),
            Self::Internal => write!(f, "INTERNAL"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Serialization => write!(f, "SERIALIZATION"),
        }
    }
}

/// Stable machine-readable error codes.
///
/// These are part of the public contract: clients and route handlers map
/// them to user-facing behavior, so variants are only ever added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Empty or whitespace-padded calendar id at token generation time.
    InvalidCalendarId,
    /// The token secret is not configured.
    MissingSecretKey,
    /// The token secret is shorter than the required minimum.
    WeakSecretKey,
    /// Malformed segment count or non-hex random component.
    InvalidTokenFormat,
    /// Unrecognized token prefix.
    InvalidPrefix,
    /// The encoded calendar id segment fails to decode.
    MalformedCalendarId,
    /// HMAC mismatch (tampered token or wrong secret).
    InvalidChecksum,
    /// The shared link token is not usable.
    InvalidToken,
    /// The shared link has expired.
    ExpiredLink,
    /// The shared link is password protected and no password was given.
    PasswordRequired,
    /// The supplied shared link password is wrong.
    PasswordIncorrect,
    /// Authorization-level denial, distinct from token failures.
    InsufficientPermissions,
    /// The shared link record does not exist (or was revoked).
    LinkNotFound,
    /// The calendar does not exist or is not owned by the caller.
    CalendarNotFound,
    /// The event does not exist in the calendar.
    EventNotFound,
    /// No authenticated identity was presented.
    AuthenticationRequired,
    /// Request input failed validation.
    ValidationError,
    /// Duplicate or conflicting write.
    Conflict,
    /// The data store failed.
    DatabaseError,
    /// Deployment configuration is invalid.
    ConfigurationError,
    /// A payload could not be (de)serialized.
    SerializationError,
    /// Anything else.
    InternalError,
}

impl ErrorCode {
    /// Return the wire representation of the code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidCalendarId => "INVALID_CALENDAR_ID",
            Self::MissingSecretKey => "MISSING_SECRET_KEY",
            Self::WeakSecretKey => "WEAK_SECRET_KEY",
            Self::InvalidTokenFormat => "INVALID_TOKEN_FORMAT",
            Self::InvalidPrefix => "INVALID_PREFIX",
            Self::MalformedCalendarId => "MALFORMED_CALENDAR_ID",
            Self::InvalidChecksum => "INVALID_CHECKSUM",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::ExpiredLink => "EXPIRED_LINK",
            Self::PasswordRequired => "PASSWORD_REQUIRED",
            Self::PasswordIncorrect => "PASSWORD_INCORRECT",
            Self::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            Self::LinkNotFound => "LINK_NOT_FOUND",
            Self::CalendarNotFound => "CALENDAR_NOT_FOUND",
            Self::EventNotFound => "EVENT_NOT_FOUND",
            Self::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::Conflict => "CONFLICT",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::ConfigurationError => "CONFIGURATION_ERROR",
            Self::SerializationError => "SERIALIZATION_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// The code used when an error is built from a kind alone.
    pub fn default_for(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NotFound => Self::LinkNotFound,
            ErrorKind::Authentication => Self::AuthenticationRequired,
            ErrorKind::Authorization => Self::InsufficientPermissions,
            ErrorKind::Validation => Self::ValidationError,
            ErrorKind::Conflict => Self::Conflict,
            ErrorKind::Internal => Self::InternalError,
            ErrorKind::Database => Self::DatabaseError,
            ErrorKind::Configuration => Self::ConfigurationError,
            ErrorKind::Serialization => Self::SerializationError,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The unified application error used throughout Calshare.
#[derive(Debug, Error)]
#[error("{code}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// The stable machine-readable code.
    pub code: ErrorCode,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error with the kind's default code.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            code: ErrorCode::default_for(kind),
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            code: ErrorCode::default_for(kind),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Replace the machine-readable code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = code;
        self
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authorization, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }

    /// Create a database error.
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Database, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Whether this error signals a deployment problem rather than bad input.
    pub fn is_configuration(&self) -> bool {
        self.kind == ErrorKind::Configuration
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            code: self.code,
            message: self.message.clone(),
            source: None,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::with_source(
            ErrorKind::Serialization,
            format!("JSON serialization error: {err}"),
            err,
        )
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::with_source(
            ErrorKind::Configuration,
            format!("Configuration error: {err}"),
            err,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_codes_follow_kind() {
        assert_eq!(
            AppError::authorization("nope").code,
            ErrorCode::InsufficientPermissions
        );
        assert_eq!(
            AppError::authentication("who").code,
            ErrorCode::AuthenticationRequired
        );
        assert_eq!(
            AppError::configuration("bad").code,
            ErrorCode::ConfigurationError
        );
    }

    #[test]
    fn test_with_code_overrides() {
        let err = AppError::not_found("gone").with_code(ErrorCode::ExpiredLink);
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.code.as_str(), "EXPIRED_LINK");
        assert_eq!(err.to_string(), "EXPIRED_LINK: gone");
    }

    #[test]
    fn test_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::InsufficientPermissions).unwrap();
        assert_eq!(json, "\"INSUFFICIENT_PERMISSIONS\"");
        let json = serde_json::to_string(&ErrorCode::MalformedCalendarId).unwrap();
        assert_eq!(json, "\"MALFORMED_CALENDAR_ID\"");
    }
}
