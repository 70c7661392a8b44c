//! Calendar repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use calshare_core::result::AppResult;
use calshare_entity::calendar::{Calendar, CalendarPatch, NewCalendar};

use super::db_error;
use crate::store::CalendarStore;

const CALENDAR_COLUMNS: &str = "id, user_id, name, description, created_at";

/// Owner-scoped calendar persistence.
#[derive(Debug, Clone)]
pub struct CalendarRepository {
    pool: PgPool,
}

impl CalendarRepository {
    /// Create a new calendar repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CalendarStore for CalendarRepository {
    async fn insert(&self, user_id: Uuid, calendar: &NewCalendar) -> AppResult<Calendar> {
        sqlx::query_as::<_, Calendar>(&format!(
            "INSERT INTO calendars (user_id, name, description) VALUES ($1, $2, $3) \
             RETURNING {CALENDAR_COLUMNS}"
        ))
        .bind(user_id)
        .bind(&calendar.name)
        .bind(&calendar.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create calendar", e))
    }

    async fn find_owned(&self, calendar_id: Uuid, user_id: Uuid) -> AppResult<Option<Calendar>> {
        sqlx::query_as::<_, Calendar>(&format!(
            "SELECT {CALENDAR_COLUMNS} FROM calendars WHERE id = $1 AND user_id = $2"
        ))
        .bind(calendar_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find calendar", e))
    }

    async fn list_owned(&self, user_id: Uuid) -> AppResult<Vec<Calendar>> {
        sqlx::query_as::<_, Calendar>(&format!(
            "SELECT {CALENDAR_COLUMNS} FROM calendars WHERE user_id = $1 ORDER BY created_at"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list calendars", e))
    }

    async fn update_owned(
        &self,
        calendar_id: Uuid,
        user_id: Uuid,
        patch: &CalendarPatch,
    ) -> AppResult<Option<Calendar>> {
        sqlx::query_as::<_, Calendar>(&format!(
            "UPDATE calendars SET \
                 name = COALESCE($3, name), \
                 description = CASE WHEN $4 THEN $5 ELSE description END \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {CALENDAR_COLUMNS}"
        ))
        .bind(calendar_id)
        .bind(user_id)
        .bind(&patch.name)
        .bind(patch.description.is_some())
        .bind(patch.description.clone().flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update calendar", e))
    }

    async fn delete_owned(&self, calendar_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM calendars WHERE id = $1 AND user_id = $2")
            .bind(calendar_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete calendar", e))?;
        Ok(result.rows_affected() > 0)
    }
}
