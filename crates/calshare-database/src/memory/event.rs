//! In-memory event store.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use calshare_core::result::AppResult;
use calshare_entity::event::{Event, EventData};

use crate::store::EventStore;

/// Events keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryEventStore {
    events: Arc<DashMap<Uuid, Event>>,
}

impl MemoryEventStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut events: Vec<Event>) -> Vec<Event> {
        events.sort_by_key(|e| e.start_time);
        events
    }
}

#[async_trait]
impl EventStore for MemoryEventStore {
    async fn list_by_calendar(&self, calendar_id: Uuid) -> AppResult<Vec<Event>> {
        Ok(Self::sorted(
            self.events
                .iter()
                .filter(|e| e.calendar_id == calendar_id)
                .map(|e| e.clone())
                .collect(),
        ))
    }

    async fn list_in_range(
        &self,
        calendar_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Event>> {
        Ok(Self::sorted(
            self.events
                .iter()
                .filter(|e| {
                    e.calendar_id == calendar_id && e.start_time < end && e.end_time > start
                })
                .map(|e| e.clone())
                .collect(),
        ))
    }

    async fn find(&self, calendar_id: Uuid, event_id: Uuid) -> AppResult<Option<Event>> {
        Ok(self
            .events
            .get(&event_id)
            .filter(|e| e.calendar_id == calendar_id)
            .map(|e| e.clone()))
    }

    async fn insert(&self, calendar_id: Uuid, data: &EventData) -> AppResult<Event> {
        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            calendar_id,
            title: data.title.clone(),
            description: data.description.clone(),
            location: data.location.clone(),
            start_time: data.start_time,
            end_time: data.end_time,
            all_day: data.all_day,
            color: data.color.clone(),
            created_at: now,
            updated_at: now,
        };
        self.events.insert(event.id, event.clone());
        Ok(event)
    }

    async fn update(
        &self,
        calendar_id: Uuid,
        event_id: Uuid,
        data: &EventData,
    ) -> AppResult<Option<Event>> {
        let Some(mut event) = self.events.get_mut(&event_id) else {
            return Ok(None);
        };
        if event.calendar_id != calendar_id {
            return Ok(None);
        }
        event.title = data.title.clone();
        event.description = data.description.clone();
        event.location = data.location.clone();
        event.start_time = data.start_time;
        event.end_time = data.end_time;
        event.all_day = data.all_day;
        event.color = data.color.clone();
        event.updated_at = Utc::now();
        Ok(Some(event.clone()))
    }

    async fn delete(&self, calendar_id: Uuid, event_id: Uuid) -> AppResult<bool> {
        Ok(self
            .events
            .remove_if(&event_id, |_, e| e.calendar_id == calendar_id)
            .is_some())
    }

    async fn delete_by_calendar(&self, calendar_id: Uuid) -> AppResult<u64> {
        let mut removed = 0;
        self.events.retain(|_, e| {
            let keep = e.calendar_id != calendar_id;
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }
}
