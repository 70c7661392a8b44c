//! Route definitions for the Calshare HTTP API.
//!
//! All routes are mounted under `/api`.

use axum::{
    Router,
    routing::{get, patch, post, put},
};

use crate::handlers;
use crate::state::AppState;

/// Build the API router with every route, threading `state` through.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(owner_routes())
        .merge(shared_routes())
        .merge(health_routes());

    Router::new().nest("/api", api_routes).with_state(state)
}

/// Calendar owner endpoints (bearer JWT)
fn owner_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/calendars",
            get(handlers::calendar::list_calendars).post(handlers::calendar::create_calendar),
        )
        .route(
            "/calendars/{calendar_id}",
            get(handlers::calendar::get_calendar)
                .patch(handlers::calendar::update_calendar)
                .delete(handlers::calendar::delete_calendar),
        )
        .route(
            "/calendars/{calendar_id}/events",
            get(handlers::calendar::list_events).post(handlers::calendar::create_event),
        )
        .route(
            "/calendars/{calendar_id}/events/{event_id}",
            put(handlers::calendar::update_event).delete(handlers::calendar::delete_event),
        )
        .route(
            "/calendars/{calendar_id}/share",
            post(handlers::share::create_shared_link).get(handlers::share::list_shared_links),
        )
        .route(
            "/calendars/{calendar_id}/share/stats",
            get(handlers::share::sharing_stats),
        )
        .route(
            "/calendars/{calendar_id}/events/conflicts",
            post(handlers::calendar::check_conflicts),
        )
        .route(
            "/shared-links/{id}",
            patch(handlers::share::update_shared_link).delete(handlers::share::delete_shared_link),
        )
}

/// Shared calendar endpoints (share token in the path)
fn shared_routes() -> Router<AppState> {
    Router::new()
        .route("/shared/{token}", get(handlers::shared::resolve_shared_link))
        .route(
            "/shared/{token}/verify-password",
            post(handlers::shared::verify_password),
        )
        .route(
            "/shared/{token}/events",
            get(handlers::event::list_events).post(handlers::event::create_event),
        )
        .route(
            "/shared/{token}/events/conflicts",
            post(handlers::event::check_conflicts),
        )
        .route(
            "/shared/{token}/events/{event_id}",
            put(handlers::event::update_event).delete(handlers::event::delete_event),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
