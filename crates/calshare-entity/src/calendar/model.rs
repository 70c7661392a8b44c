//! Calendar entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A calendar owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Calendar {
    /// Unique calendar identifier.
    pub id: Uuid,
    /// Owning user.
    pub user_id: Uuid,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// When the calendar was created.
    pub created_at: DateTime<Utc>,
}

/// Data required to persist a new calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCalendar {
    pub name: String,
    pub description: Option<String>,
}

/// Partial update of a calendar. `Some(None)` clears the description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl CalendarPatch {
    /// Apply the patch to a calendar in place.
    pub fn apply_to(&self, calendar: &mut Calendar) {
        if let Some(ref name) = self.name {
            calendar.name = name.clone();
        }
        if let Some(ref description) = self.description {
            calendar.description = description.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_keeps_untouched_fields() {
        let mut calendar = Calendar {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Team".to_string(),
            description: Some("Standups".to_string()),
            created_at: Utc::now(),
        };

        CalendarPatch {
            name: Some("Ops".to_string()),
            description: None,
        }
        .apply_to(&mut calendar);
        assert_eq!(calendar.name, "Ops");
        assert_eq!(calendar.description.as_deref(), Some("Standups"));

        CalendarPatch {
            name: None,
            description: Some(None),
        }
        .apply_to(&mut calendar);
        assert_eq!(calendar.name, "Ops");
        assert!(calendar.description.is_none());
    }
}
