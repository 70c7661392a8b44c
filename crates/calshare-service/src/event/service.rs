//! Event operations gated by the caller's permission context.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use calshare_core::error::{AppError, ErrorCode};
use calshare_database::store::{CalendarStore, EventStore};
use calshare_entity::event::{Event, EventData};
use calshare_entity::permission::Action;

use super::conflict::{ConflictReport, EventSpan, detect_conflicts};
use crate::permission::{PermissionContext, PermissionError, PermissionValidator};

/// Writable event fields as received from a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventInput {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[serde(default)]
    pub all_day: bool,
    #[serde(default)]
    pub color: Option<String>,
}

impl EventInput {
    fn into_data(self) -> Result<EventData, AppError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(AppError::validation("Event title must not be empty"));
        }
        if self.end_time <= self.start_time {
            return Err(AppError::validation("Event end must be after its start"));
        }
        Ok(EventData {
            title: title.to_string(),
            description: self.description,
            location: self.location,
            start_time: self.start_time,
            end_time: self.end_time,
            all_day: self.all_day,
            color: self.color,
        })
    }
}

/// A candidate interval to check against a calendar's events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheck {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// The event being edited, never counted against itself.
    #[serde(default)]
    pub exclude_event_id: Option<Uuid>,
}

/// Calendar events for owners and link bearers.
///
/// Owners act on calendars they own. Bearers act only on the calendar
/// their link was issued for, at the link's level.
#[derive(Debug, Clone)]
pub struct EventService {
    events: Arc<dyn EventStore>,
    calendars: Arc<dyn CalendarStore>,
    validator: Arc<PermissionValidator>,
}

impl EventService {
    /// Creates a new event service.
    pub fn new(
        events: Arc<dyn EventStore>,
        calendars: Arc<dyn CalendarStore>,
        validator: Arc<PermissionValidator>,
    ) -> Self {
        Self {
            events,
            calendars,
            validator,
        }
    }

    /// All events of a calendar, ordered by start.
    pub async fn list_events(
        &self,
        ctx: &PermissionContext,
        calendar_id: Uuid,
    ) -> Result<Vec<Event>, AppError> {
        self.authorize(ctx, calendar_id, Action::View).await?;
        self.events.list_by_calendar(calendar_id).await
    }

    /// Add an event. Requires edit access.
    pub async fn create_event(
        &self,
        ctx: &PermissionContext,
        calendar_id: Uuid,
        input: EventInput,
    ) -> Result<Event, AppError> {
        self.authorize(ctx, calendar_id, Action::Edit).await?;

        let mut data = input.into_data()?;
        if data.color.is_none() {
            data.color = Some(Event::DEFAULT_COLOR.to_string());
        }

        let event = self.events.insert(calendar_id, &data).await?;
        info!(
            calendar_id = %calendar_id,
            event_id = %event.id,
            via_link = !ctx.is_authenticated,
            "Event created"
        );
        Ok(event)
    }

    /// Replace an event's fields. Requires edit access.
    pub async fn update_event(
        &self,
        ctx: &PermissionContext,
        calendar_id: Uuid,
        event_id: Uuid,
        input: EventInput,
    ) -> Result<Event, AppError> {
        self.authorize(ctx, calendar_id, Action::Edit).await?;

        let data = input.into_data()?;
        let event = self
            .events
            .update(calendar_id, event_id, &data)
            .await?
            .ok_or_else(event_not_found)?;

        info!(
            calendar_id = %calendar_id,
            event_id = %event_id,
            via_link = !ctx.is_authenticated,
            "Event updated"
        );
        Ok(event)
    }

    /// Remove an event. Requires edit access.
    pub async fn delete_event(
        &self,
        ctx: &PermissionContext,
        calendar_id: Uuid,
        event_id: Uuid,
    ) -> Result<(), AppError> {
        self.authorize(ctx, calendar_id, Action::Edit).await?;

        if !self.events.delete(calendar_id, event_id).await? {
            return Err(event_not_found());
        }
        info!(
            calendar_id = %calendar_id,
            event_id = %event_id,
            via_link = !ctx.is_authenticated,
            "Event deleted"
        );
        Ok(())
    }

    /// Count existing events overlapping a candidate interval.
    ///
    /// Advisory: the result never blocks a save.
    pub async fn check_conflicts(
        &self,
        ctx: &PermissionContext,
        calendar_id: Uuid,
        check: ConflictCheck,
    ) -> Result<ConflictReport, AppError> {
        self.authorize(ctx, calendar_id, Action::View).await?;

        if check.end_time <= check.start_time {
            return Err(AppError::validation("Event end must be after its start"));
        }

        let existing: Vec<EventSpan> = self
            .events
            .list_in_range(calendar_id, check.start_time, check.end_time)
            .await?
            .iter()
            .map(EventSpan::from)
            .collect();

        let exclude = check.exclude_event_id.map(|id| id.to_string());
        let report = detect_conflicts(
            check.start_time,
            check.end_time,
            exclude.as_deref(),
            &existing,
        );
        debug!(
            calendar_id = %calendar_id,
            count = report.count,
            "Conflict check completed"
        );
        Ok(report)
    }

    async fn authorize(
        &self,
        ctx: &PermissionContext,
        calendar_id: Uuid,
        action: Action,
    ) -> Result<(), AppError> {
        if let Some(user_id) = ctx.user_id.filter(|_| ctx.is_authenticated) {
            return self
                .calendars
                .find_owned(calendar_id, user_id)
                .await?
                .map(|_| ())
                .ok_or_else(|| {
                    AppError::not_found("Calendar not found").with_code(ErrorCode::CalendarNotFound)
                });
        }

        let permission = ctx.shared_link.as_ref();
        if permission.is_some_and(|link| link.calendar_id != calendar_id) {
            return Err(PermissionError::calendar_not_found(false).into());
        }
        self.validator
            .require_permission(action, permission, false)
            .map_err(AppError::from)
    }
}

fn event_not_found() -> AppError {
    AppError::not_found("Event not found").with_code(ErrorCode::EventNotFound)
}
