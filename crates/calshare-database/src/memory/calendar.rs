//! In-memory calendar store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use calshare_core::result::AppResult;
use calshare_entity::calendar::{Calendar, CalendarPatch, NewCalendar};

use crate::store::CalendarStore;

/// Calendars keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryCalendarStore {
    calendars: Arc<DashMap<Uuid, Calendar>>,
}

impl MemoryCalendarStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a calendar for `user_id` and return it.
    pub fn create(&self, user_id: Uuid, name: impl Into<String>) -> Calendar {
        self.store(
            user_id,
            NewCalendar {
                name: name.into(),
                description: None,
            },
        )
    }

    fn store(&self, user_id: Uuid, calendar: NewCalendar) -> Calendar {
        let calendar = Calendar {
            id: Uuid::new_v4(),
            user_id,
            name: calendar.name,
            description: calendar.description,
            created_at: Utc::now(),
        };
        self.calendars.insert(calendar.id, calendar.clone());
        calendar
    }
}

#[async_trait]
impl CalendarStore for MemoryCalendarStore {
    async fn insert(&self, user_id: Uuid, calendar: &NewCalendar) -> AppResult<Calendar> {
        Ok(self.store(user_id, calendar.clone()))
    }

    async fn find_owned(&self, calendar_id: Uuid, user_id: Uuid) -> AppResult<Option<Calendar>> {
        Ok(self
            .calendars
            .get(&calendar_id)
            .filter(|c| c.user_id == user_id)
            .map(|c| c.clone()))
    }

    async fn list_owned(&self, user_id: Uuid) -> AppResult<Vec<Calendar>> {
        let mut calendars: Vec<Calendar> = self
            .calendars
            .iter()
            .filter(|c| c.user_id == user_id)
            .map(|c| c.clone())
            .collect();
        calendars.sort_by_key(|c| c.created_at);
        Ok(calendars)
    }

    async fn update_owned(
        &self,
        calendar_id: Uuid,
        user_id: Uuid,
        patch: &CalendarPatch,
    ) -> AppResult<Option<Calendar>> {
        let Some(mut calendar) = self.calendars.get_mut(&calendar_id) else {
            return Ok(None);
        };
        if calendar.user_id != user_id {
            return Ok(None);
        }
        patch.apply_to(&mut calendar);
        Ok(Some(calendar.clone()))
    }

    async fn delete_owned(&self, calendar_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        Ok(self
            .calendars
            .remove_if(&calendar_id, |_, c| c.user_id == user_id)
            .is_some())
    }
}
