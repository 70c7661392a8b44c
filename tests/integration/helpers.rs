//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

use calshare_api::state::Stores;
use calshare_api::{AppState, build_app};
use calshare_auth::{OwnerClaims, TokenSecret};
use calshare_core::config::AppConfig;
use calshare_database::memory::{MemoryCalendarStore, MemoryEventStore, MemorySharedLinkStore};

pub const TEST_TOKEN_SECRET: &str = "integration-test-token-secret-0123456789";
const TEST_JWT_SECRET: &str = "integration-test-jwt-secret";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Calendar store, for seeding calendars
    pub calendars: Arc<MemoryCalendarStore>,
    /// Shared link store, for inspecting rows
    pub links: Arc<MemorySharedLinkStore>,
}

/// A calendar owner with a signed session token.
pub struct Owner {
    pub user_id: Uuid,
    pub jwt: String,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let config: AppConfig = serde_json::from_value(json!({
            "server": { "public_base_url": "https://cal.example.com/" },
            "database": { "url": "postgres://unused/calshare" },
            "auth": { "jwt_secret": TEST_JWT_SECRET },
            "logging": { "format": "pretty" }
        }))
        .expect("Failed to build test config");

        let calendars = Arc::new(MemoryCalendarStore::new());
        let links = Arc::new(MemorySharedLinkStore::new());
        let stores = Stores {
            links: links.clone(),
            events: Arc::new(MemoryEventStore::new()),
            calendars: calendars.clone(),
        };
        let secret = TokenSecret::new(TEST_TOKEN_SECRET).expect("Failed to build secret");
        let state = AppState::new(config, secret, stores, None);

        Self {
            router: build_app(state),
            calendars,
            links,
        }
    }

    /// A fresh owner with a valid session token
    pub fn owner(&self) -> Owner {
        let user_id = Uuid::new_v4();
        let claims = OwnerClaims {
            sub: user_id,
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
            iat: Some(Utc::now().timestamp()),
            email: None,
        };
        let jwt = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
        )
        .expect("Failed to sign test JWT");
        Owner { user_id, jwt }
    }

    /// A calendar owned by `owner`
    pub fn calendar(&self, owner: &Owner) -> Uuid {
        self.calendars.create(owner.user_id, "Team calendar").id
    }

    /// Create a shared link and return its token
    pub async fn share(&self, owner: &Owner, calendar_id: Uuid, body: Value) -> String {
        let response = self
            .request(
                "POST",
                &format!("/api/calendars/{calendar_id}/share"),
                Some(body),
                Auth::Owner(&owner.jwt),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        response.body["data"]["token"]
            .as_str()
            .expect("token in response")
            .to_string()
    }

    /// Send a request through the router
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        auth: Auth<'_>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        match auth {
            Auth::None => {}
            Auth::Owner(jwt) => req = req.header("Authorization", format!("Bearer {jwt}")),
            Auth::Password(password) => req = req.header("X-Share-Password", password),
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Credentials attached to a test request
#[derive(Debug, Clone, Copy)]
pub enum Auth<'a> {
    None,
    Owner(&'a str),
    Password(&'a str),
}

/// Status and parsed JSON body of a response
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestResponse {
    /// The `error` code of an error body
    pub fn error_code(&self) -> &str {
        self.body["error"].as_str().unwrap_or_default()
    }
}
