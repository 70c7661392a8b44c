//! Convenience result type alias for Calshare.

use crate::error::AppError;

/// A specialized `Result` type for Calshare operations.
pub type AppResult<T> = Result<T, AppError>;
