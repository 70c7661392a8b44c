//! Share token errors.

use thiserror::Error;

use calshare_core::error::{AppError, ErrorCode, ErrorKind};

/// Failures raised while generating or validating share tokens.
///
/// Configuration variants indicate a broken deployment and must never be
/// folded into an "invalid link" response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The calendar id cannot be embedded in a token.
    #[error("Invalid calendar id: {0}")]
    InvalidCalendarId(String),

    /// No secret was supplied.
    #[error("Token secret key is not configured")]
    MissingSecretKey,

    /// A required environment variable is unset or empty.
    #[error("Required environment variable {0} is not set")]
    MissingEnvVar(String),

    /// The secret is shorter than the minimum length.
    #[error("Token secret key must be at least 32 characters long (got {0})")]
    WeakSecretKey(usize),

    /// A random component of zero bytes was requested.
    #[error("Random byte count must be a positive integer (got {0})")]
    InvalidByteLength(usize),

    /// The OS random source failed.
    #[error("Failed to generate secure random bytes: {0}")]
    RandomSource(String),

    /// The HMAC primitive could not be keyed.
    #[error("Failed to initialize HMAC: {0}")]
    MacInit(String),

    /// Wrong segment count, or a non-hex random component.
    #[error("Invalid token format: {0}")]
    InvalidFormat(String),

    /// The prefix segment does not match.
    #[error("Invalid token prefix")]
    InvalidPrefix,

    /// The calendar id segment is not base64url-encoded UTF-8.
    #[error("Invalid calendar id encoding")]
    MalformedCalendarId,

    /// The checksum does not match the token contents.
    #[error("Invalid token checksum")]
    InvalidChecksum,
}

impl TokenError {
    /// Stable machine-readable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidCalendarId(_) => ErrorCode::InvalidCalendarId,
            Self::MissingSecretKey | Self::MissingEnvVar(_) => ErrorCode::MissingSecretKey,
            Self::WeakSecretKey(_) => ErrorCode::WeakSecretKey,
            Self::InvalidByteLength(_) => ErrorCode::ConfigurationError,
            Self::RandomSource(_) | Self::MacInit(_) => ErrorCode::InternalError,
            Self::InvalidFormat(_) => ErrorCode::InvalidTokenFormat,
            Self::InvalidPrefix => ErrorCode::InvalidPrefix,
            Self::MalformedCalendarId => ErrorCode::MalformedCalendarId,
            Self::InvalidChecksum => ErrorCode::InvalidChecksum,
        }
    }

    /// Whether the error comes from deployment configuration.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingSecretKey
                | Self::MissingEnvVar(_)
                | Self::WeakSecretKey(_)
                | Self::InvalidByteLength(_)
        )
    }

    fn kind(&self) -> ErrorKind {
        match self {
            _ if self.is_configuration() => ErrorKind::Configuration,
            Self::InvalidCalendarId(_) => ErrorKind::Validation,
            Self::RandomSource(_) | Self::MacInit(_) => ErrorKind::Internal,
            _ => ErrorKind::NotFound,
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        let code = err.code();
        AppError::with_source(err.kind(), err.to_string(), err).with_code(code)
    }
}
