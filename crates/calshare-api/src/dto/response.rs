//! Response DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use calshare_entity::event::Event;
use calshare_entity::permission::SharedLinkPermission;
use calshare_entity::shared_link::{PermissionLevel, SharedLink};

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A freshly created shared link. The token is shown only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedShareLinkResponse {
    pub token: String,
    pub share_url: String,
    pub link: SharedLink,
}

/// Events of a shared calendar together with the bearer's access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedEventsResponse {
    pub events: Vec<Event>,
    pub calendar_id: Uuid,
    pub permissions: PermissionLevel,
    pub is_password_protected: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SharedEventsResponse {
    /// Pair a calendar's events with the permission that fetched them.
    pub fn new(events: Vec<Event>, permission: &SharedLinkPermission) -> Self {
        Self {
            events,
            calendar_id: permission.calendar_id,
            permissions: permission.level,
            is_password_protected: permission.is_password_protected,
            expires_at: permission.expires_at,
        }
    }
}

/// Acknowledges a deletion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub id: Uuid,
    pub deleted: bool,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Database status, when one is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}
