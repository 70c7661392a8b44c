//! Owner calendar and event management.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{Auth, TestApp};

#[tokio::test]
async fn test_owner_calendar_lifecycle() {
    let app = TestApp::new();
    let owner = app.owner();
    let auth = Auth::Owner(&owner.jwt);

    let created = app
        .request(
            "POST",
            "/api/calendars",
            Some(json!({ "name": "  Platform  ", "description": "On-call" })),
            auth,
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    assert_eq!(created.body["data"]["name"], "Platform");
    assert_eq!(created.body["data"]["user_id"], owner.user_id.to_string());
    let calendar_id = created.body["data"]["id"].as_str().unwrap().to_string();
    let calendar_path = format!("/api/calendars/{calendar_id}");

    let listed = app.request("GET", "/api/calendars", None, auth).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 1);

    let patched = app
        .request(
            "PATCH",
            &calendar_path,
            Some(json!({ "name": "Platform team", "description": null })),
            auth,
        )
        .await;
    assert_eq!(patched.status, StatusCode::OK, "{}", patched.body);
    assert_eq!(patched.body["data"]["name"], "Platform team");
    assert!(patched.body["data"]["description"].is_null());

    let fetched = app.request("GET", &calendar_path, None, auth).await;
    assert_eq!(fetched.body["data"]["name"], "Platform team");

    let deleted = app.request("DELETE", &calendar_path, None, auth).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["data"]["deleted"], true);

    let gone = app.request("GET", &calendar_path, None, auth).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.error_code(), "CALENDAR_NOT_FOUND");
}

#[tokio::test]
async fn test_owner_events_are_visible_through_links() {
    let app = TestApp::new();
    let owner = app.owner();
    let auth = Auth::Owner(&owner.jwt);
    let calendar_id = app.calendar(&owner);
    let events_path = format!("/api/calendars/{calendar_id}/events");

    let created = app
        .request(
            "POST",
            &events_path,
            Some(json!({
                "title": "Planning",
                "start_time": "2026-05-04T09:00:00Z",
                "end_time": "2026-05-04T10:00:00Z",
                "color": "#10b981"
            })),
            auth,
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{}", created.body);
    let event_id = created.body["data"]["id"].as_str().unwrap().to_string();

    let token = app
        .share(&owner, calendar_id, json!({ "permissions": "view" }))
        .await;
    let shared = app
        .request("GET", &format!("/api/shared/{token}/events"), None, Auth::None)
        .await;
    assert_eq!(shared.status, StatusCode::OK);
    assert_eq!(shared.body["data"]["events"][0]["id"], event_id);

    let updated = app
        .request(
            "PUT",
            &format!("{events_path}/{event_id}"),
            Some(json!({
                "title": "Planning (long)",
                "start_time": "2026-05-04T09:00:00Z",
                "end_time": "2026-05-04T12:00:00Z"
            })),
            auth,
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK, "{}", updated.body);
    assert_eq!(updated.body["data"]["title"], "Planning (long)");

    let listed = app.request("GET", &events_path, None, auth).await;
    assert_eq!(listed.body["data"].as_array().unwrap().len(), 1);

    let removed = app
        .request("DELETE", &format!("{events_path}/{event_id}"), None, auth)
        .await;
    assert_eq!(removed.status, StatusCode::OK);
    let listed = app.request("GET", &events_path, None, auth).await;
    assert!(listed.body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_deleting_a_calendar_revokes_its_links() {
    let app = TestApp::new();
    let owner = app.owner();
    let calendar_id = app.calendar(&owner);
    let token = app.share(&owner, calendar_id, json!({})).await;

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/calendars/{calendar_id}"),
            None,
            Auth::Owner(&owner.jwt),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(app.links.is_empty());

    let resolved = app
        .request("GET", &format!("/api/shared/{token}"), None, Auth::None)
        .await;
    assert_eq!(resolved.body["data"]["is_valid"], false);
    assert_eq!(resolved.body["data"]["reason"], "invalid");
}

#[tokio::test]
async fn test_calendars_are_private_to_their_owner() {
    let app = TestApp::new();
    let owner = app.owner();
    let stranger = app.owner();
    let calendar_id = app.calendar(&owner);
    let auth = Auth::Owner(&stranger.jwt);

    let listed = app.request("GET", "/api/calendars", None, auth).await;
    assert!(listed.body["data"].as_array().unwrap().is_empty());

    for (method, path) in [
        ("GET", format!("/api/calendars/{calendar_id}")),
        ("DELETE", format!("/api/calendars/{calendar_id}")),
        ("GET", format!("/api/calendars/{calendar_id}/events")),
    ] {
        let response = app.request(method, &path, None, auth).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{method} {path}");
        assert_eq!(response.error_code(), "CALENDAR_NOT_FOUND", "{method} {path}");
    }

    let anonymous = app.request("GET", "/api/calendars", None, Auth::None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let blank = app
        .request(
            "POST",
            "/api/calendars",
            Some(json!({ "name": "" })),
            Auth::Owner(&owner.jwt),
        )
        .await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.error_code(), "VALIDATION_ERROR");
}
