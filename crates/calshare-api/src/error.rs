//! Maps domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use calshare_core::error::{AppError, ErrorCode, ErrorKind};
use calshare_service::PermissionError;

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Always `false`.
    pub success: bool,
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable message.
    pub message: String,
    /// Optional details, such as field validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// An [`AppError`] on its way out of a handler.
#[derive(Debug, Error)]
#[error("{inner}")]
pub struct ApiError {
    inner: AppError,
    details: Option<serde_json::Value>,
}

impl From<AppError> for ApiError {
    fn from(inner: AppError) -> Self {
        Self {
            inner,
            details: None,
        }
    }
}

impl ApiError {
    /// Attach structured details to the response body.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// The wrapped application error.
    pub fn inner(&self) -> &AppError {
        &self.inner
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        status_for(&self.inner)
    }
}

impl From<PermissionError> for ApiError {
    fn from(err: PermissionError) -> Self {
        AppError::from(err).into()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).ok();
        let err: ApiError = AppError::validation("Request validation failed").into();
        match details {
            Some(details) => err.with_details(details),
            None => err,
        }
    }
}

/// Status code for an application error.
///
/// The code wins over the kind where they disagree.
pub fn status_for(err: &AppError) -> StatusCode {
    match err.code {
        ErrorCode::PasswordRequired | ErrorCode::PasswordIncorrect => {
            return StatusCode::UNAUTHORIZED;
        }
        ErrorCode::InsufficientPermissions => return StatusCode::FORBIDDEN,
        ErrorCode::InvalidToken | ErrorCode::ExpiredLink | ErrorCode::LinkNotFound => {
            return StatusCode::NOT_FOUND;
        }
        _ => {}
    }
    match err.kind {
        ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
        ErrorKind::Authorization => StatusCode::FORBIDDEN,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Conflict => StatusCode::CONFLICT,
        ErrorKind::Internal
        | ErrorKind::Database
        | ErrorKind::Configuration
        | ErrorKind::Serialization => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (code, message) = if status.is_server_error() {
            error!(code = %self.inner.code, error = %self.inner, "Request failed");
            (
                ErrorCode::InternalError.as_str(),
                "An internal error occurred".to_string(),
            )
        } else {
            (self.inner.code.as_str(), self.inner.message)
        };

        let body = ApiErrorResponse {
            success: false,
            error: code.to_string(),
            message,
            details: self.details,
        };

        (status, Json(body)).into_response()
    }
}
