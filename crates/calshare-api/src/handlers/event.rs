//! Token-bearer handlers for the events of a shared calendar.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use calshare_entity::event::Event;
use calshare_entity::permission::SharedLinkPermission;
use calshare_service::{ConflictCheck, ConflictReport, PermissionContext};

use crate::dto::{ApiResponse, DeletedResponse, EventRequest, SharedEventsResponse};
use crate::error::ApiError;
use crate::extractors::SharePassword;
use crate::state::AppState;

async fn bearer(
    state: &AppState,
    token: &str,
    password: &SharePassword,
) -> Result<(SharedLinkPermission, PermissionContext), ApiError> {
    let permission = state
        .permission_validator
        .resolve(token, password.as_deref())
        .await?;
    let ctx = state
        .permission_validator
        .permission_context(None, Some(permission.clone()));
    Ok((permission, ctx))
}

/// GET /api/shared/{token}/events
pub async fn list_events(
    State(state): State<AppState>,
    Path(token): Path<String>,
    password: SharePassword,
) -> Result<Json<ApiResponse<SharedEventsResponse>>, ApiError> {
    let (permission, ctx) = bearer(&state, &token, &password).await?;
    let events = state
        .event_service
        .list_events(&ctx, permission.calendar_id)
        .await?;
    Ok(Json(ApiResponse::ok(SharedEventsResponse::new(
        events,
        &permission,
    ))))
}

/// POST /api/shared/{token}/events
pub async fn create_event(
    State(state): State<AppState>,
    Path(token): Path<String>,
    password: SharePassword,
    Json(req): Json<EventRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Event>>), ApiError> {
    req.validate()?;
    let (permission, ctx) = bearer(&state, &token, &password).await?;
    let event = state
        .event_service
        .create_event(&ctx, permission.calendar_id, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(event))))
}

/// PUT /api/shared/{token}/events/{event_id}
pub async fn update_event(
    State(state): State<AppState>,
    Path((token, event_id)): Path<(String, Uuid)>,
    password: SharePassword,
    Json(req): Json<EventRequest>,
) -> Result<Json<ApiResponse<Event>>, ApiError> {
    req.validate()?;
    let (permission, ctx) = bearer(&state, &token, &password).await?;
    let event = state
        .event_service
        .update_event(&ctx, permission.calendar_id, event_id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// DELETE /api/shared/{token}/events/{event_id}
pub async fn delete_event(
    State(state): State<AppState>,
    Path((token, event_id)): Path<(String, Uuid)>,
    password: SharePassword,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    let (permission, ctx) = bearer(&state, &token, &password).await?;
    state
        .event_service
        .delete_event(&ctx, permission.calendar_id, event_id)
        .await?;
    Ok(Json(ApiResponse::ok(DeletedResponse {
        id: event_id,
        deleted: true,
    })))
}

/// POST /api/shared/{token}/events/conflicts
pub async fn check_conflicts(
    State(state): State<AppState>,
    Path(token): Path<String>,
    password: SharePassword,
    Json(check): Json<ConflictCheck>,
) -> Result<Json<ApiResponse<ConflictReport>>, ApiError> {
    let (permission, ctx) = bearer(&state, &token, &password).await?;
    let report = state
        .event_service
        .check_conflicts(&ctx, permission.calendar_id, check)
        .await?;
    Ok(Json(ApiResponse::ok(report)))
}
