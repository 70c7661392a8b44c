//! Owner-scoped calendar CRUD.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use calshare_core::error::{AppError, ErrorCode};
use calshare_database::store::{CalendarStore, EventStore, SharedLinkStore};
use calshare_entity::calendar::{Calendar, CalendarPatch, NewCalendar};

use crate::context::OwnerContext;

/// Request to create a calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update of a calendar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CalendarUpdate {
    pub name: Option<String>,
    /// `None` keeps the description, `Some(None)` removes it.
    pub description: Option<Option<String>>,
}

/// Manages the calendars an owner holds.
#[derive(Debug, Clone)]
pub struct CalendarService {
    calendars: Arc<dyn CalendarStore>,
    events: Arc<dyn EventStore>,
    links: Arc<dyn SharedLinkStore>,
}

impl CalendarService {
    /// Creates a new calendar service.
    pub fn new(
        calendars: Arc<dyn CalendarStore>,
        events: Arc<dyn EventStore>,
        links: Arc<dyn SharedLinkStore>,
    ) -> Self {
        Self {
            calendars,
            events,
            links,
        }
    }

    /// All calendars of the caller.
    pub async fn list_calendars(&self, ctx: &OwnerContext) -> Result<Vec<Calendar>, AppError> {
        self.calendars.list_owned(ctx.user_id).await
    }

    /// One calendar of the caller.
    pub async fn get_calendar(
        &self,
        ctx: &OwnerContext,
        calendar_id: Uuid,
    ) -> Result<Calendar, AppError> {
        self.calendars
            .find_owned(calendar_id, ctx.user_id)
            .await?
            .ok_or_else(calendar_not_found)
    }

    /// Create a calendar owned by the caller.
    pub async fn create_calendar(
        &self,
        ctx: &OwnerContext,
        input: CalendarInput,
    ) -> Result<Calendar, AppError> {
        let calendar = self
            .calendars
            .insert(
                ctx.user_id,
                &NewCalendar {
                    name: required_name(&input.name)?,
                    description: input.description,
                },
            )
            .await?;

        info!(
            user_id = %ctx.user_id,
            calendar_id = %calendar.id,
            "Calendar created"
        );
        Ok(calendar)
    }

    /// Rename or re-describe a calendar of the caller.
    pub async fn update_calendar(
        &self,
        ctx: &OwnerContext,
        calendar_id: Uuid,
        update: CalendarUpdate,
    ) -> Result<Calendar, AppError> {
        let patch = CalendarPatch {
            name: update.name.as_deref().map(required_name).transpose()?,
            description: update.description,
        };
        self.calendars
            .update_owned(calendar_id, ctx.user_id, &patch)
            .await?
            .ok_or_else(calendar_not_found)
    }

    /// Delete a calendar of the caller with its events and shared links.
    pub async fn delete_calendar(
        &self,
        ctx: &OwnerContext,
        calendar_id: Uuid,
    ) -> Result<(), AppError> {
        if !self.calendars.delete_owned(calendar_id, ctx.user_id).await? {
            return Err(calendar_not_found());
        }
        let events = self.events.delete_by_calendar(calendar_id).await?;
        let links = self.links.delete_by_calendar(calendar_id).await?;

        info!(
            user_id = %ctx.user_id,
            calendar_id = %calendar_id,
            events,
            links,
            "Calendar deleted"
        );
        Ok(())
    }
}

fn required_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Calendar name must not be empty"));
    }
    Ok(name.to_string())
}

fn calendar_not_found() -> AppError {
    AppError::not_found("Calendar not found").with_code(ErrorCode::CalendarNotFound)
}
