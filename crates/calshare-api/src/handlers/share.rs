//! Owner handlers: shared link management.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use calshare_core::error::{AppError, ErrorCode};
use calshare_entity::shared_link::{SharedLink, SharingStats};
use calshare_service::share::{CreateSharedLinkRequest, UpdateSharedLinkRequest, build_share_url};

use crate::dto::{
    ApiResponse, CreateShareLinkRequest, CreatedShareLinkResponse, DeletedResponse,
    UpdateShareLinkRequest,
};
use crate::error::ApiError;
use crate::extractors::OwnerUser;
use crate::state::AppState;

/// POST /api/calendars/{calendar_id}/share
pub async fn create_shared_link(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(calendar_id): Path<Uuid>,
    Json(req): Json<CreateShareLinkRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedShareLinkResponse>>), ApiError> {
    req.validate()?;
    let expires_at = req.expiry(Utc::now())?;

    let created = state
        .share_service
        .create_shared_link(
            &owner,
            CreateSharedLinkRequest {
                calendar_id,
                permissions: req.permissions,
                password: req.password,
                expires_at,
            },
        )
        .await?;

    let share_url = build_share_url(&state.config.server.public_base_url, &created.token);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(CreatedShareLinkResponse {
            token: created.token,
            share_url,
            link: created.record,
        })),
    ))
}

/// GET /api/calendars/{calendar_id}/share
pub async fn list_shared_links(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(calendar_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<SharedLink>>>, ApiError> {
    let links = state
        .share_service
        .list_by_calendar(&owner, calendar_id)
        .await?;
    Ok(Json(ApiResponse::ok(links)))
}

/// GET /api/calendars/{calendar_id}/share/stats
pub async fn sharing_stats(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(calendar_id): Path<Uuid>,
) -> Result<Json<ApiResponse<SharingStats>>, ApiError> {
    let stats = state
        .share_service
        .get_calendar_sharing_stats(calendar_id, owner.user_id)
        .await?;
    Ok(Json(ApiResponse::ok(stats)))
}

/// PATCH /api/shared-links/{id}
pub async fn update_shared_link(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateShareLinkRequest>,
) -> Result<Json<ApiResponse<SharedLink>>, ApiError> {
    req.validate()?;
    let expires_at = req.expiry(Utc::now())?;

    let link = state
        .share_service
        .update_shared_link(
            &owner,
            id,
            UpdateSharedLinkRequest {
                permissions: req.permissions,
                password: req.password,
                expires_at,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(link)))
}

/// DELETE /api/shared-links/{id}
pub async fn delete_shared_link(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    if !state.share_service.delete_shared_link(&owner, id).await? {
        return Err(
            AppError::not_found("Shared link not found")
                .with_code(ErrorCode::LinkNotFound)
                .into(),
        );
    }
    Ok(Json(ApiResponse::ok(DeletedResponse { id, deleted: true })))
}
