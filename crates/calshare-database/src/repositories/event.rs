//! Event repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use calshare_core::result::AppResult;
use calshare_entity::event::{Event, EventData};

use super::db_error;
use crate::store::EventStore;

const EVENT_COLUMNS: &str = "id, calendar_id, title, description, location, start_time, \
                             end_time, all_day, color, created_at, updated_at";

/// Calendar-scoped event persistence.
#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn list_by_calendar(&self, calendar_id: Uuid) -> AppResult<Vec<Event>> {
        sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE calendar_id = $1 ORDER BY start_time"
        ))
        .bind(calendar_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list events", e))
    }

    async fn list_in_range(
        &self,
        calendar_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Event>> {
        sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events \
             WHERE calendar_id = $1 AND start_time < $3 AND end_time > $2 \
             ORDER BY start_time"
        ))
        .bind(calendar_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list events in range", e))
    }

    async fn find(&self, calendar_id: Uuid, event_id: Uuid) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1 AND calendar_id = $2"
        ))
        .bind(event_id)
        .bind(calendar_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find event", e))
    }

    async fn insert(&self, calendar_id: Uuid, data: &EventData) -> AppResult<Event> {
        sqlx::query_as::<_, Event>(&format!(
            "INSERT INTO events (calendar_id, title, description, location, start_time, \
             end_time, all_day, color) VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {EVENT_COLUMNS}"
        ))
        .bind(calendar_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.location)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(data.all_day)
        .bind(&data.color)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create event", e))
    }

    async fn update(
        &self,
        calendar_id: Uuid,
        event_id: Uuid,
        data: &EventData,
    ) -> AppResult<Option<Event>> {
        sqlx::query_as::<_, Event>(&format!(
            "UPDATE events SET title = $3, description = $4, location = $5, start_time = $6, \
             end_time = $7, all_day = $8, color = $9, updated_at = NOW() \
             WHERE id = $1 AND calendar_id = $2 RETURNING {EVENT_COLUMNS}"
        ))
        .bind(event_id)
        .bind(calendar_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(&data.location)
        .bind(data.start_time)
        .bind(data.end_time)
        .bind(data.all_day)
        .bind(&data.color)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update event", e))
    }

    async fn delete(&self, calendar_id: Uuid, event_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1 AND calendar_id = $2")
            .bind(event_id)
            .bind(calendar_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete event", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_calendar(&self, calendar_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM events WHERE calendar_id = $1")
            .bind(calendar_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete calendar events", e))?;
        Ok(result.rows_affected())
    }
}
