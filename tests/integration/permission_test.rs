//! Resolving share tokens end to end.

use axum::http::StatusCode;
use serde_json::json;

use crate::helpers::{Auth, TestApp};

#[tokio::test]
async fn test_view_link_resolves() {
    let app = TestApp::new();
    let owner = app.owner();
    let calendar_id = app.calendar(&owner);
    let token = app.share(&owner, calendar_id, json!({ "permissions": "view" })).await;

    let response = app
        .request("GET", &format!("/api/shared/{token}"), None, Auth::None)
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let decision = &response.body["data"];
    assert_eq!(decision["is_valid"], true);
    assert_eq!(decision["requires_password"], false);
    assert_eq!(decision["permission"]["level"], "view");
    assert_eq!(decision["permission"]["calendar_id"], calendar_id.to_string());
    assert!(decision["permission"].get("token").is_none());
}

#[tokio::test]
async fn test_password_gate() {
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
    let path = format!("/api/shared/{token}");

    let missing = app.request("GET", &path, None, Auth::None).await;
    assert_eq!(missing.body["data"]["is_valid"], false);
    assert_eq!(missing.body["data"]["requires_password"], true);
    assert_eq!(missing.body["data"]["reason"], "password_required");

    let wrong = app.request("GET", &path, None, Auth::Password("wrong")).await;
    assert_eq!(wrong.body["data"]["is_valid"], false);
    assert_eq!(wrong.body["data"]["requires_password"], false);
    assert_eq!(wrong.body["data"]["error"], missing.body["data"]["error"]);

    let right = app
        .request("GET", &path, None, Auth::Password("secret123"))
        .await;
    assert_eq!(right.body["data"]["is_valid"], true);
    assert_eq!(right.body["data"]["permission"]["level"], "edit");
    assert_eq!(right.body["data"]["permission"]["is_password_protected"], true);
}

#[tokio::test]
async fn test_verify_password_route() {
    let app = TestApp::new();
    let owner = app.owner();
    let calendar_id = app.calendar(&owner);
    let token = app
        .share(&owner, calendar_id, json!({ "password": "secret123" }))
        .await;
    let path = format!("/api/shared/{token}/verify-password");

    let wrong = app
        .request("POST", &path, Some(json!({ "password": "nope" })), Auth::None)
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.error_code(), "PASSWORD_INCORRECT");

    let empty = app
        .request("POST", &path, Some(json!({ "password": "" })), Auth::None)
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);

    let right = app
        .request(
            "POST",
            &path,
            Some(json!({ "password": "secret123" })),
            Auth::None,
        )
        .await;
    assert_eq!(right.status, StatusCode::OK);
    assert_eq!(right.body["data"]["level"], "view");
}

#[tokio::test]
async fn test_expired_link_never_asks_for_password() {
    let app = TestApp::new();
    let owner = app.owner();
    let calendar_id = app.calendar(&owner);
    let token = app
        .share(
            &owner,
            calendar_id,
            json!({ "password": "secret123", "expires_in_days": -1 }),
        )
        .await;
    let path = format!("/api/shared/{token}");

    for auth in [Auth::None, Auth::Password("secret123"), Auth::Password("x")] {
        let response = app.request("GET", &path, None, auth).await;
        assert_eq!(response.body["data"]["is_valid"], false);
        assert_eq!(response.body["data"]["requires_password"], false);
        assert_eq!(response.body["data"]["reason"], "expired");
    }
}

#[tokio::test]
async fn test_deleted_link_stops_resolving() {
    let app = TestApp::new();
    let owner = app.owner();
    let calendar_id = app.calendar(&owner);
    let token = app.share(&owner, calendar_id, json!({})).await;
    let path = format!("/api/shared/{token}");

    let before = app.request("GET", &path, None, Auth::None).await;
    assert_eq!(before.body["data"]["is_valid"], true);
    let link_id = before.body["data"]["permission"]["link_id"]
        .as_str()
        .unwrap()
        .to_string();

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/shared-links/{link_id}"),
            None,
            Auth::Owner(&owner.jwt),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let after = app.request("GET", &path, None, Auth::None).await;
    assert_eq!(after.body["data"]["is_valid"], false);
    assert_eq!(after.body["data"]["reason"], "invalid");

    let mut forged = token.clone();
    let last = forged.pop().unwrap();
    forged.push(if last == '0' { '1' } else { '0' });
    let forged = app
        .request("GET", &format!("/api/shared/{forged}"), None, Auth::None)
        .await;
    assert_eq!(forged.status, after.status);
    assert_eq!(forged.body, after.body);
}

#[tokio::test]
async fn test_tampered_and_foreign_tokens_are_invalid() {
    let app = TestApp::new();
    let owner = app.owner();
    let calendar_id = app.calendar(&owner);
    let token = app.share(&owner, calendar_id, json!({})).await;

    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == '0' { '1' } else { '0' });

    for bad in [
        tampered.as_str(),
        "cal_abc",
        "xyz_YWJj_00_00",
        "not-a-token",
    ] {
        let response = app
            .request("GET", &format!("/api/shared/{bad}"), None, Auth::None)
            .await;
        assert_eq!(response.status, StatusCode::OK, "{bad}");
        assert_eq!(response.body["data"]["is_valid"], false, "{bad}");
        assert_eq!(response.body["data"]["reason"], "invalid", "{bad}");
    }
}
