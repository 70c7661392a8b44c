//! Event entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A scheduled event inside a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Event {
    /// Unique event identifier.
    pub id: Uuid,
    /// Calendar the event belongs to.
    pub calendar_id: Uuid,
    /// Event title.
    pub title: String,
    /// Longer description.
    pub description: Option<String>,
    /// Free-form location.
    pub location: Option<String>,
    /// Inclusive start.
    pub start_time: DateTime<Utc>,
    /// Exclusive end.
    pub end_time: DateTime<Utc>,
    /// Whether the event spans whole days.
    pub all_day: bool,
    /// `#RRGGBB` display color.
    pub color: Option<String>,
    /// When the event was created.
    pub created_at: DateTime<Utc>,
    /// When the event was last modified.
    pub updated_at: DateTime<Utc>,
}

/// The writable fields of an event, used for both insert and full update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventData {
    /// Event title.
    pub title: String,
    /// Longer description.
    pub description: Option<String>,
    /// Free-form location.
    pub location: Option<String>,
    /// Inclusive start.
    pub start_time: DateTime<Utc>,
    /// Exclusive end.
    pub end_time: DateTime<Utc>,
    /// Whether the event spans whole days.
    pub all_day: bool,
    /// `#RRGGBB` display color.
    pub color: Option<String>,
}

impl Event {
    /// Default color applied when an event is created without one.
    pub const DEFAULT_COLOR: &'static str = "#3b82f6";
}
