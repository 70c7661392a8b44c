//! Owner handlers: calendars and their events.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;
use validator::Validate;

use calshare_entity::calendar::Calendar;
use calshare_entity::event::Event;
use calshare_service::{ConflictCheck, ConflictReport, PermissionContext};

use crate::dto::{
    ApiResponse, CreateCalendarRequest, DeletedResponse, EventRequest, UpdateCalendarRequest,
};
use crate::error::ApiError;
use crate::extractors::OwnerUser;
use crate::state::AppState;

fn owner_context(state: &AppState, owner: &OwnerUser) -> PermissionContext {
    state
        .permission_validator
        .permission_context(Some(owner.user_id), None)
}

/// GET /api/calendars
pub async fn list_calendars(
    State(state): State<AppState>,
    owner: OwnerUser,
) -> Result<Json<ApiResponse<Vec<Calendar>>>, ApiError> {
    let calendars = state.calendar_service.list_calendars(&owner).await?;
    Ok(Json(ApiResponse::ok(calendars)))
}

/// POST /api/calendars
pub async fn create_calendar(
    State(state): State<AppState>,
    owner: OwnerUser,
    Json(req): Json<CreateCalendarRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Calendar>>), ApiError> {
    req.validate()?;
    let calendar = state
        .calendar_service
        .create_calendar(&owner, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(calendar))))
}

/// GET /api/calendars/{calendar_id}
pub async fn get_calendar(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(calendar_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Calendar>>, ApiError> {
    let calendar = state
        .calendar_service
        .get_calendar(&owner, calendar_id)
        .await?;
    Ok(Json(ApiResponse::ok(calendar)))
}

/// PATCH /api/calendars/{calendar_id}
pub async fn update_calendar(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(calendar_id): Path<Uuid>,
    Json(req): Json<UpdateCalendarRequest>,
) -> Result<Json<ApiResponse<Calendar>>, ApiError> {
    req.validate()?;
    let calendar = state
        .calendar_service
        .update_calendar(&owner, calendar_id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(calendar)))
}

/// DELETE /api/calendars/{calendar_id}
pub async fn delete_calendar(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(calendar_id): Path<Uuid>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    state
        .calendar_service
        .delete_calendar(&owner, calendar_id)
        .await?;
    Ok(Json(ApiResponse::ok(DeletedResponse {
        id: calendar_id,
        deleted: true,
    })))
}

/// GET /api/calendars/{calendar_id}/events
pub async fn list_events(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(calendar_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Event>>>, ApiError> {
    let ctx = owner_context(&state, &owner);
    let events = state.event_service.list_events(&ctx, calendar_id).await?;
    Ok(Json(ApiResponse::ok(events)))
}

/// POST /api/calendars/{calendar_id}/events
pub async fn create_event(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(calendar_id): Path<Uuid>,
    Json(req): Json<EventRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Event>>), ApiError> {
    req.validate()?;
    let ctx = owner_context(&state, &owner);
    let event = state
        .event_service
        .create_event(&ctx, calendar_id, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(event))))
}

/// PUT /api/calendars/{calendar_id}/events/{event_id}
pub async fn update_event(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path((calendar_id, event_id)): Path<(Uuid, Uuid)>,
    Json(req): Json<EventRequest>,
) -> Result<Json<ApiResponse<Event>>, ApiError> {
    req.validate()?;
    let ctx = owner_context(&state, &owner);
    let event = state
        .event_service
        .update_event(&ctx, calendar_id, event_id, req.into())
        .await?;
    Ok(Json(ApiResponse::ok(event)))
}

/// DELETE /api/calendars/{calendar_id}/events/{event_id}
pub async fn delete_event(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path((calendar_id, event_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ApiResponse<DeletedResponse>>, ApiError> {
    let ctx = owner_context(&state, &owner);
    state
        .event_service
        .delete_event(&ctx, calendar_id, event_id)
        .await?;
    Ok(Json(ApiResponse::ok(DeletedResponse {
        id: event_id,
        deleted: true,
    })))
}

/// POST /api/calendars/{calendar_id}/events/conflicts
pub async fn check_conflicts(
    State(state): State<AppState>,
    owner: OwnerUser,
    Path(calendar_id): Path<Uuid>,
    Json(check): Json<ConflictCheck>,
) -> Result<Json<ApiResponse<ConflictReport>>, ApiError> {
    let ctx = owner_context(&state, &owner);
    let report = state
        .event_service
        .check_conflicts(&ctx, calendar_id, check)
        .await?;
    Ok(Json(ApiResponse::ok(report)))
}
