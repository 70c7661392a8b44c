//! Shared-calendar events gated by link permission.

use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{Auth, TestApp};

fn event(title: &str, start: &str, end: &str) -> Value {
    json!({
        "title": title,
        "start_time": format!("2026-04-01T{start}:00Z"),
        "end_time": format!("2026-04-01T{end}:00Z"),
    })
}

#[tokio::test]
async fn test_edit_link_manages_events() {
    let app = TestApp::new();
    let owner = app.owner();
    let calendar_id = app.calendar(&owner);
    let token = app
        .share(&owner, calendar_id, json!({ "permissions": "edit" }))
        .await;
    let events_path = format!("/api/shared/{token}/events");

    let created = app
        .request("POST", &events_path, Some(event("Retro", "10:00", "11:00")), Auth::None)
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    assert_eq!(created.body["data"]["color"], "#3b82f6");
    let event_id = created.body["data"]["id"].as_str().unwrap().to_string();

    let listed = app.request("GET", &events_path, None, Auth::None).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"]["permissions"], "edit");
    assert_eq!(listed.body["data"]["calendar_id"], calendar_id.to_string());
    assert_eq!(listed.body["data"]["events"].as_array().unwrap().len(), 1);

    let updated = app
        .request(
            "PUT",
            &format!("{events_path}/{event_id}"),
            Some(event("Retro (moved)", "14:00", "15:00")),
            Auth::None,
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["data"]["title"], "Retro (moved)");

    let deleted = app
        .request("DELETE", &format!("{events_path}/{event_id}"), None, Auth::None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let missing = app
        .request("DELETE", &format!("{events_path}/{event_id}"), None, Auth::None)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.error_code(), "EVENT_NOT_FOUND");
}

#[tokio::test]
async fn test_view_link_cannot_write() {
    let app = TestApp::new();
    let owner = app.owner();
    let calendar_id = app.calendar(&owner);
    let token = app.share(&owner, calendar_id, json!({})).await;
    let events_path = format!("/api/shared/{token}/events");

    let listed = app.request("GET", &events_path, None, Auth::None).await;
    assert_eq!(listed.status, StatusCode::OK);

    let created = app
        .request("POST", &events_path, Some(event("Nope", "10:00", "11:00")), Auth::None)
        .await;
    assert_eq!(created.status, StatusCode::FORBIDDEN);
    assert_eq!(created.error_code(), "INSUFFICIENT_PERMISSIONS");
}

#[tokio::test]
async fn test_protected_link_needs_password_header() {
    let app = TestApp::new();
    let owner = app.owner();
    let calendar_id = app.calendar(&owner);
    let token = app
        .share(
            &owner,
            calendar_id,
            json!({ "permissions": "edit", "password": "secret123" }),
        )
        .await;
    let events_path = format!("/api/shared/{token}/events");

    let without = app.request("GET", &events_path, None, Auth::None).await;
    assert_eq!(without.status, StatusCode::UNAUTHORIZED);
    assert_eq!(without.error_code(), "PASSWORD_REQUIRED");

    let with = app
        .request("GET", &events_path, None, Auth::Password("secret123"))
        .await;
    assert_eq!(with.status, StatusCode::OK);
    assert_eq!(with.body["data"]["is_password_protected"], true);
}

#[tokio::test]
async fn test_invalid_token_is_not_found() {
    let app = TestApp::new();
    let response = app
        .request("GET", "/api/shared/cal_bogus/events", None, Auth::None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.error_code(), "INVALID_TOKEN");
}

#[tokio::test]
async fn test_event_validation() {
    let app = TestApp::new();
    let owner = app.owner();
    let calendar_id = app.calendar(&owner);
    let token = app
        .share(&owner, calendar_id, json!({ "permissions": "edit" }))
        .await;
    let events_path = format!("/api/shared/{token}/events");

    let mut bad_color = event("Colorful", "10:00", "11:00");
    bad_color["color"] = json!("blue");
    let inverted = event("Backwards", "11:00", "10:00");
    let long_title = event(&"x".repeat(201), "10:00", "11:00");

    for body in [bad_color, inverted, long_title] {
        let response = app
            .request("POST", &events_path, Some(body), Auth::None)
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{}", response.body);
        assert_eq!(response.error_code(), "VALIDATION_ERROR");
    }
}

#[tokio::test]
async fn test_conflict_boundaries() {
    let app = TestApp::new();
    let owner = app.owner();
    let calendar_id = app.calendar(&owner);
    let token = app
        .share(&owner, calendar_id, json!({ "permissions": "edit" }))
        .await;

    let created = app
        .request(
            "POST",
            &format!("/api/shared/{token}/events"),
            Some(event("Anchor", "10:00", "11:00")),
            Auth::None,
        )
        .await;
    let anchor_id = created.body["data"]["id"].as_str().unwrap().to_string();

    let conflicts = format!("/api/shared/{token}/events/conflicts");
    let check = |start: &str, end: &str| {
        json!({
            "start_time": format!("2026-04-01T{start}:00Z"),
            "end_time": format!("2026-04-01T{end}:00Z"),
        })
    };

    let touching = app
        .request("POST", &conflicts, Some(check("11:00", "12:00")), Auth::None)
        .await;
    assert_eq!(touching.status, StatusCode::OK);
    assert_eq!(touching.body["data"]["has_conflict"], false);

    let overlapping = app
        .request("POST", &conflicts, Some(check("10:59", "11:30")), Auth::None)
        .await;
    assert_eq!(overlapping.body["data"]["has_conflict"], true);
    assert_eq!(overlapping.body["data"]["count"], 1);

    let mut editing = check("10:00", "11:00");
    editing["exclude_event_id"] = json!(anchor_id);
    let own = app
        .request("POST", &conflicts, Some(editing), Auth::None)
        .await;
    assert_eq!(own.body["data"]["has_conflict"], false);

    let owner_check = app
        .request(
            "POST",
            &format!("/api/calendars/{calendar_id}/events/conflicts"),
            Some(check("10:30", "10:45")),
            Auth::Owner(&owner.jwt),
        )
        .await;
    assert_eq!(owner_check.status, StatusCode::OK);
    assert_eq!(owner_check.body["data"]["count"], 1);
}
