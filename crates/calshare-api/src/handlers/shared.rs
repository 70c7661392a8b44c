//! Token-bearer handlers: resolving a shared link.

use axum::Json;
use axum::extract::{Path, State};
use validator::Validate;

use calshare_entity::permission::{PermissionValidationResult, SharedLinkPermission};

use crate::dto::{ApiResponse, VerifyPasswordRequest};
use crate::error::ApiError;
use crate::extractors::SharePassword;
use crate::state::AppState;

/// GET /api/shared/{token}
///
/// Always answers with the decision; clients branch on `is_valid` and
/// `requires_password`.
pub async fn resolve_shared_link(
    State(state): State<AppState>,
    Path(token): Path<String>,
    password: SharePassword,
) -> Result<Json<ApiResponse<PermissionValidationResult>>, ApiError> {
    let result = state
        .permission_validator
        .validate_token(&token, password.as_deref())
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/shared/{token}/verify-password
pub async fn verify_password(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(req): Json<VerifyPasswordRequest>,
) -> Result<Json<ApiResponse<SharedLinkPermission>>, ApiError> {
    req.validate()?;
    let permission = state
        .permission_validator
        .resolve(&token, Some(&req.password))
        .await?;
    Ok(Json(ApiResponse::ok(permission)))
}
