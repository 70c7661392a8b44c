//! Store traits consumed by the service layer.
//!
//! Every trait is object safe so services hold `Arc<dyn ...Store>` and can
//! run against PostgreSQL or the in-memory backend interchangeably.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use calshare_core::result::AppResult;
use calshare_entity::calendar::{Calendar, CalendarPatch, NewCalendar};
use calshare_entity::event::{Event, EventData};
use calshare_entity::shared_link::{NewSharedLink, SharedLink, SharedLinkPatch};

/// Persistence for shared link records.
#[async_trait]
pub trait SharedLinkStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a new link and return the stored row.
    async fn insert(&self, link: NewSharedLink) -> AppResult<SharedLink>;

    /// Find a link by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SharedLink>>;

    /// Find a link by token random component and token version.
    async fn find_by_token_random(
        &self,
        token_random: &str,
        token_version: i32,
    ) -> AppResult<Option<SharedLink>>;

    /// All links one owner created for one calendar, newest first.
    async fn list_by_calendar(&self, calendar_id: Uuid, user_id: Uuid)
    -> AppResult<Vec<SharedLink>>;

    /// Apply a partial update to a link owned by `user_id`.
    ///
    /// Returns `None` when no such link exists for that owner.
    async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        patch: &SharedLinkPatch,
    ) -> AppResult<Option<SharedLink>>;

    /// Delete a link owned by `user_id`. Returns whether a row was removed.
    async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<bool>;

    /// Delete every link with `expires_at <= now`. Returns the count removed.
    async fn delete_expired(&self, now: DateTime<Utc>) -> AppResult<u64>;

    /// Delete every link issued for a calendar. Returns the count removed.
    async fn delete_by_calendar(&self, calendar_id: Uuid) -> AppResult<u64>;
}

/// Persistence for calendar events.
#[async_trait]
pub trait EventStore: Send + Sync + std::fmt::Debug + 'static {
    /// All events of a calendar ordered by start time.
    async fn list_by_calendar(&self, calendar_id: Uuid) -> AppResult<Vec<Event>>;

    /// Events of a calendar that intersect `[start, end)`.
    async fn list_in_range(
        &self,
        calendar_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<Vec<Event>>;

    /// Find one event inside a calendar.
    async fn find(&self, calendar_id: Uuid, event_id: Uuid) -> AppResult<Option<Event>>;

    /// Insert a new event.
    async fn insert(&self, calendar_id: Uuid, data: &EventData) -> AppResult<Event>;

    /// Replace the writable fields of an event inside a calendar.
    async fn update(
        &self,
        calendar_id: Uuid,
        event_id: Uuid,
        data: &EventData,
    ) -> AppResult<Option<Event>>;

    /// Delete an event inside a calendar. Returns whether a row was removed.
    async fn delete(&self, calendar_id: Uuid, event_id: Uuid) -> AppResult<bool>;

    /// Delete every event of a calendar. Returns the count removed.
    async fn delete_by_calendar(&self, calendar_id: Uuid) -> AppResult<u64>;
}

/// Calendars, always scoped by owner.
#[async_trait]
pub trait CalendarStore: Send + Sync + std::fmt::Debug + 'static {
    /// Persist a new calendar for `user_id`.
    async fn insert(&self, user_id: Uuid, calendar: &NewCalendar) -> AppResult<Calendar>;

    /// Find a calendar owned by `user_id`.
    async fn find_owned(&self, calendar_id: Uuid, user_id: Uuid) -> AppResult<Option<Calendar>>;

    /// Every calendar of one owner, oldest first.
    async fn list_owned(&self, user_id: Uuid) -> AppResult<Vec<Calendar>>;

    /// Apply a partial update to a calendar owned by `user_id`.
    async fn update_owned(
        &self,
        calendar_id: Uuid,
        user_id: Uuid,
        patch: &CalendarPatch,
    ) -> AppResult<Option<Calendar>>;

    /// Delete a calendar owned by `user_id`. Returns whether a row was removed.
    async fn delete_owned(&self, calendar_id: Uuid, user_id: Uuid) -> AppResult<bool>;
}
