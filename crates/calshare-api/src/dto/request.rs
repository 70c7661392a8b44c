//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use calshare_core::error::AppError;
use calshare_entity::shared_link::PermissionLevel;
use calshare_service::{CalendarInput, CalendarUpdate, EventInput};
use calshare_service::share::expires_at_from_days;

/// Create shared link request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateShareLinkRequest {
    /// Access level; defaults to view.
    #[serde(default)]
    pub permissions: PermissionLevel,
    /// Optional password. Empty means none.
    #[validate(length(max = 128))]
    pub password: Option<String>,
    /// Absolute expiry.
    pub expires_at: Option<DateTime<Utc>>,
    /// Expiry relative to now, in days. Negative yields an expired link.
    #[validate(range(min = -3650, max = 3650))]
    pub expires_in_days: Option<i64>,
}

impl CreateShareLinkRequest {
    /// The effective expiry as of `now`.
    pub fn expiry(&self, now: DateTime<Utc>) -> Result<Option<DateTime<Utc>>, AppError> {
        resolve_expiry(self.expires_at, self.expires_in_days, now)
    }
}

/// Partial shared link update.
///
/// A field that is absent stays unchanged. `expires_at: null` removes the
/// expiry and an empty `password` removes protection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateShareLinkRequest {
    pub permissions: Option<PermissionLevel>,
    #[validate(length(max = 128))]
    pub password: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub expires_at: Option<Option<DateTime<Utc>>>,
    #[validate(range(min = -3650, max = 3650))]
    pub expires_in_days: Option<i64>,
}

impl UpdateShareLinkRequest {
    /// The expiry patch as of `now`.
    pub fn expiry(&self, now: DateTime<Utc>) -> Result<Option<Option<DateTime<Utc>>>, AppError> {
        match (self.expires_at, self.expires_in_days) {
            (Some(_), Some(_)) => Err(both_expiries()),
            (None, Some(days)) => Ok(Some(Some(expires_at_from_days(now, days)))),
            (expires_at, None) => Ok(expires_at),
        }
    }
}

/// Password submitted to unlock a protected link.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyPasswordRequest {
    #[validate(length(min = 1, max = 128, message = "Password is required"))]
    pub password: String,
}

/// Create calendar request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCalendarRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

impl From<CreateCalendarRequest> for CalendarInput {
    fn from(req: CreateCalendarRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

/// Partial calendar update. `description: null` removes the description.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCalendarRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[validate(length(max = 2000))]
    pub description: Option<Option<String>>,
}

impl From<UpdateCalendarRequest> for CalendarUpdate {
    fn from(req: UpdateCalendarRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

/// Event create/update body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EventRequest {
    /// Event title.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Longer description.
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    /// Free-form location.
    #[validate(length(max = 200))]
    pub location: Option<String>,
    /// Inclusive start.
    pub start_time: DateTime<Utc>,
    /// Exclusive end.
    pub end_time: DateTime<Utc>,
    /// Whole-day event.
    #[serde(default)]
    pub all_day: bool,
    /// `#RRGGBB` color.
    #[validate(custom(function = "validate_color"))]
    pub color: Option<String>,
}

impl From<EventRequest> for EventInput {
    fn from(req: EventRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            location: req.location,
            start_time: req.start_time,
            end_time: req.end_time,
            all_day: req.all_day,
            color: req.color,
        }
    }
}

fn validate_color(color: &str) -> Result<(), ValidationError> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("color").with_message("Color must be #RRGGBB".into()))
    }
}

fn resolve_expiry(
    expires_at: Option<DateTime<Utc>>,
    expires_in_days: Option<i64>,
    now: DateTime<Utc>,
) -> Result<Option<DateTime<Utc>>, AppError> {
    match (expires_at, expires_in_days) {
        (Some(_), Some(_)) => Err(both_expiries()),
        (None, Some(days)) => Ok(Some(expires_at_from_days(now, days))),
        (at, None) => Ok(at),
    }
}

fn both_expiries() -> AppError {
    AppError::validation("Specify either expires_at or expires_in_days, not both")
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn event(color: Option<&str>, title: &str) -> EventRequest {
        EventRequest {
            title: title.to_string(),
            description: None,
            location: None,
            start_time: Utc.with_ymd_and_hms(2026, 1, 1, 9, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2026, 1, 1, 10, 0, 0).unwrap(),
            all_day: false,
            color: color.map(String::from),
        }
    }

    #[test]
    fn test_event_color_validation() {
        assert!(event(Some("#1a2B3c"), "ok").validate().is_ok());
        assert!(event(None, "ok").validate().is_ok());
        for bad in ["1a2b3c", "#1a2b3", "#1a2b3cd", "#gggggg", "red"] {
            assert!(event(Some(bad), "ok").validate().is_err(), "{bad}");
        }
    }

    #[test]
    fn test_event_title_bounds() {
        assert!(event(None, "").validate().is_err());
        assert!(event(None, &"a".repeat(200)).validate().is_ok());
        assert!(event(None, &"a".repeat(201)).validate().is_err());
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let absent: UpdateShareLinkRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.expires_at, None);

        let cleared: UpdateShareLinkRequest =
            serde_json::from_str(r#"{"expires_at": null}"#).unwrap();
        assert_eq!(cleared.expires_at, Some(None));

        let set: UpdateShareLinkRequest =
            serde_json::from_str(r#"{"expires_at": "2030-01-01T00:00:00Z"}"#).unwrap();
        assert!(matches!(set.expires_at, Some(Some(_))));
    }

    #[test]
    fn test_calendar_update_bounds() {
        let cleared: UpdateCalendarRequest =
            serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));
        assert!(cleared.validate().is_ok());

        let long = UpdateCalendarRequest {
            description: Some(Some("d".repeat(2001))),
            ..Default::default()
        };
        assert!(long.validate().is_err());

        let blank: CreateCalendarRequest = serde_json::from_str(r#"{"name": ""}"#).unwrap();
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_expiry_resolution() {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let req = CreateShareLinkRequest {
            expires_in_days: Some(-1),
            ..Default::default()
        };
        assert_eq!(
            req.expiry(now).unwrap(),
            Some(Utc.with_ymd_and_hms(2026, 5, 31, 0, 0, 0).unwrap())
        );

        let both = CreateShareLinkRequest {
            expires_at: Some(now),
            expires_in_days: Some(3),
            ..Default::default()
        };
        assert!(both.expiry(now).is_err());

        assert_eq!(CreateShareLinkRequest::default().expiry(now).unwrap(), None);
    }
}
