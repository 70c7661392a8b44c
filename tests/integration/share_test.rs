//! Shared link lifecycle through the owner routes.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{Auth, TestApp};

#[tokio::test]
async fn test_create_returns_token_and_url() {
    let app = TestApp::new();
    let owner = app.owner();
    let calendar_id = app.calendar(&owner);

    let response = app
        .request(
            "POST",
            &format!("/api/calendars/{calendar_id}/share"),
            Some(json!({ "permissions": "edit", "password": "secret123" })),
            Auth::Owner(&owner.jwt),
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let data = &response.body["data"];
    let token = data["token"].as_str().unwrap();
    assert!(token.starts_with("cal_"));
    assert_eq!(token.split('_').count(), 4);
    assert_eq!(
        data["share_url"],
        format!("https://cal.example.com/shared/calendar/{token}")
    );
    assert_eq!(data["link"]["permissions"], "edit");
    assert!(data["link"].get("password_hash").is_none());
    assert!(data["link"].get("token_random").is_none());
    assert_eq!(app.links.len(), 1);
}

#[tokio::test]
async fn test_owner_routes_require_session() {
    let app = TestApp::new();
    let owner = app.owner();
    let calendar_id = app.calendar(&owner);

    let response = app
        .request(
            "POST",
            &format!("/api/calendars/{calendar_id}/share"),
            Some(json!({})),
            Auth::None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);

    let response = app
        .request(
            "GET",
            &format!("/api/calendars/{calendar_id}/share"),
            None,
            Auth::Owner("not-a-jwt"),
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_cannot_share_foreign_calendar() {
    let app = TestApp::new();
    let owner = app.owner();
    let intruder = app.owner();
    let calendar_id = app.calendar(&owner);

    let response = app
        .request(
            "POST",
            &format!("/api/calendars/{calendar_id}/share"),
            Some(json!({})),
            Auth::Owner(&intruder.jwt),
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "CALENDAR_NOT_FOUND");
    assert!(app.links.is_empty());
}

#[tokio::test]
async fn test_list_update_stats_and_delete() {
    let app = TestApp::new();
    let owner = app.owner();
    let calendar_id = app.calendar(&owner);

    app.share(&owner, calendar_id, json!({})).await;
    app.share(&owner, calendar_id, json!({ "password": "pw", "expires_in_days": -1 }))
        .await;

    let listed = app
        .request(
            "GET",
            &format!("/api/calendars/{calendar_id}/share"),
            None,
            Auth::Owner(&owner.jwt),
        )
        .await;
    assert_eq!(listed.status, StatusCode::OK);
    let links = listed.body["data"].as_array().unwrap();
    assert_eq!(links.len(), 2);

    let stats = app
        .request(
            "GET",
            &format!("/api/calendars/{calendar_id}/share/stats"),
            None,
            Auth::Owner(&owner.jwt),
        )
        .await;
    assert_eq!(stats.body["data"]["total_links"], 2);
    assert_eq!(stats.body["data"]["expired_links"], 1);
    assert_eq!(stats.body["data"]["password_protected_links"], 1);

    let link_id = links[0]["id"].as_str().unwrap().to_string();

    let updated = app
        .request(
            "PATCH",
            &format!("/api/shared-links/{link_id}"),
            Some(json!({ "permissions": "edit", "expires_at": null })),
            Auth::Owner(&owner.jwt),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["permissions"], "edit");
    assert!(updated.body["data"]["expires_at"].is_null());

    let stranger = app.owner();
    let hijack = app
        .request(
            "DELETE",
            &format!("/api/shared-links/{link_id}"),
            None,
            Auth::Owner(&stranger.jwt),
        )
        .await;
    assert_eq!(hijack.status, StatusCode::NOT_FOUND);
    assert_eq!(hijack.error_code(), "LINK_NOT_FOUND");

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/shared-links/{link_id}"),
            None,
            Auth::Owner(&owner.jwt),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(app.links.len(), 1);
}

#[tokio::test]
async fn test_create_rejects_conflicting_expiry_inputs() {
    let app = TestApp::new();
    let owner = app.owner();
    let calendar_id = app.calendar(&owner);

    let response = app
        .request(
            "POST",
            &format!("/api/calendars/{calendar_id}/share"),
            Some(json!({ "expires_at": "2030-01-01T00:00:00Z", "expires_in_days": 3 })),
            Auth::Owner(&owner.jwt),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, Auth::None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
}
