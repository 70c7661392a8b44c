//! Shared link repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use calshare_core::result::AppResult;
use calshare_entity::shared_link::{NewSharedLink, SharedLink, SharedLinkPatch};

use super::db_error;
use crate::store::SharedLinkStore;

const LINK_COLUMNS: &str = "id, calendar_id, user_id, token_random, token_version, permissions, \
                            password_hash, expires_at, created_at, updated_at";

/// Repository for shared link records.
#[derive(Debug, Clone)]
pub struct SharedLinkRepository {
    pool: PgPool,
}

impl SharedLinkRepository {
    /// Create a new shared link repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SharedLinkStore for SharedLinkRepository {
    async fn insert(&self, link: NewSharedLink) -> AppResult<SharedLink> {
        sqlx::query_as::<_, SharedLink>(&format!(
            "INSERT INTO shared_links (calendar_id, user_id, token_random, token_version, \
             permissions, password_hash, expires_at) VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {LINK_COLUMNS}"
        ))
        .bind(link.calendar_id)
        .bind(link.user_id)
        .bind(&link.token_random)
        .bind(link.token_version)
        .bind(link.permissions)
        .bind(&link.password_hash)
        .bind(link.expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create shared link", e))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SharedLink>> {
        sqlx::query_as::<_, SharedLink>(&format!(
            "SELECT {LINK_COLUMNS} FROM shared_links WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find shared link", e))
    }

    async fn find_by_token_random(
        &self,
        token_random: &str,
        token_version: i32,
    ) -> AppResult<Option<SharedLink>> {
        sqlx::query_as::<_, SharedLink>(&format!(
            "SELECT {LINK_COLUMNS} FROM shared_links \
             WHERE token_random = $1 AND token_version = $2"
        ))
        .bind(token_random)
        .bind(token_version)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find shared link by token", e))
    }

    async fn list_by_calendar(
        &self,
        calendar_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Vec<SharedLink>> {
        sqlx::query_as::<_, SharedLink>(&format!(
            "SELECT {LINK_COLUMNS} FROM shared_links \
             WHERE calendar_id = $1 AND user_id = $2 ORDER BY created_at DESC"
        ))
        .bind(calendar_id)
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list shared links", e))
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        patch: &SharedLinkPatch,
    ) -> AppResult<Option<SharedLink>> {
        // Flags distinguish "leave untouched" from "set to NULL".
        sqlx::query_as::<_, SharedLink>(&format!(
            "UPDATE shared_links SET \
               permissions = COALESCE($3, permissions), \
               password_hash = CASE WHEN $4 THEN $5 ELSE password_hash END, \
               expires_at = CASE WHEN $6 THEN $7 ELSE expires_at END, \
               updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 RETURNING {LINK_COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .bind(patch.permissions)
        .bind(patch.password_hash.is_some())
        .bind(patch.password_hash.clone().flatten())
        .bind(patch.expires_at.is_some())
        .bind(patch.expires_at.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update shared link", e))
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM shared_links WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete shared link", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM shared_links WHERE expires_at IS NOT NULL AND expires_at <= $1",
        )
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to delete expired shared links", e))?;
        debug!(removed = result.rows_affected(), "Expired shared links deleted");
        Ok(result.rows_affected())
    }

    async fn delete_by_calendar(&self, calendar_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM shared_links WHERE calendar_id = $1")
            .bind(calendar_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete calendar shared links", e))?;
        Ok(result.rows_affected())
    }
}
