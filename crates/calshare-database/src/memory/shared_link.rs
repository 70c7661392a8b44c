//! In-memory shared link store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;
use uuid::Uuid;

use calshare_core::error::AppError;
use calshare_core::result::AppResult;
use calshare_entity::shared_link::{NewSharedLink, SharedLink, SharedLinkPatch};

use crate::store::SharedLinkStore;

/// Shared links keyed by id, with a unique index on the token random component.
#[derive(Debug, Clone, Default)]
pub struct MemorySharedLinkStore {
    links: Arc<DashMap<Uuid, SharedLink>>,
    by_random: Arc<DashMap<String, Uuid>>,
}

impl MemorySharedLinkStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the store holds no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    fn remove(&self, id: &Uuid) -> bool {
        match self.links.remove(id) {
            Some((_, link)) => {
                self.by_random.remove(&link.token_random);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl SharedLinkStore for MemorySharedLinkStore {
    async fn insert(&self, link: NewSharedLink) -> AppResult<SharedLink> {
        let now = Utc::now();
        let record = SharedLink {
            id: Uuid::new_v4(),
            calendar_id: link.calendar_id,
            user_id: link.user_id,
            token_random: link.token_random,
            token_version: link.token_version,
            permissions: link.permissions,
            password_hash: link.password_hash,
            expires_at: link.expires_at,
            created_at: now,
            updated_at: now,
        };

        match self.by_random.entry(record.token_random.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict("Shared link token already exists"));
            }
            Entry::Vacant(slot) => {
                slot.insert(record.id);
            }
        }
        self.links.insert(record.id, record.clone());
        Ok(record)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SharedLink>> {
        Ok(self.links.get(&id).map(|l| l.clone()))
    }

    async fn find_by_token_random(
        &self,
        token_random: &str,
        token_version: i32,
    ) -> AppResult<Option<SharedLink>> {
        let Some(id) = self.by_random.get(token_random).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self
            .links
            .get(&id)
            .filter(|l| l.token_version == token_version)
            .map(|l| l.clone()))
    }

    async fn list_by_calendar(
        &self,
        calendar_id: Uuid,
        user_id: Uuid,
    ) -> AppResult<Vec<SharedLink>> {
        let mut links: Vec<SharedLink> = self
            .links
            .iter()
            .filter(|l| l.calendar_id == calendar_id && l.user_id == Some(user_id))
            .map(|l| l.clone())
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(links)
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        patch: &SharedLinkPatch,
    ) -> AppResult<Option<SharedLink>> {
        let Some(mut link) = self.links.get_mut(&id) else {
            return Ok(None);
        };
        if link.user_id != Some(user_id) {
            return Ok(None);
        }
        patch.apply_to(&mut link, Utc::now());
        Ok(Some(link.clone()))
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let owned = self
            .links
            .get(&id)
            .is_some_and(|l| l.user_id == Some(user_id));
        Ok(owned && self.remove(&id))
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let expired: Vec<Uuid> = self
            .links
            .iter()
            .filter(|l| l.is_expired_at(now))
            .map(|l| l.id)
            .collect();

        let removed = expired.iter().filter(|id| self.remove(id)).count() as u64;
        debug!(removed, "Expired shared links deleted");
        Ok(removed)
    }

    async fn delete_by_calendar(&self, calendar_id: Uuid) -> AppResult<u64> {
        let ids: Vec<Uuid> = self
            .links
            .iter()
            .filter(|l| l.calendar_id == calendar_id)
            .map(|l| l.id)
            .collect();
        Ok(ids.iter().filter(|id| self.remove(id)).count() as u64)
    }
}
