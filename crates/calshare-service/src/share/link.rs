//! Share URL and expiry helpers.

use chrono::{DateTime, Duration, Utc};

/// Path segment shared calendars are served under.
pub const SHARED_CALENDAR_PATH: &str = "shared/calendar";

/// Build the public URL for a token: `<base>/shared/calendar/<token>`.
pub fn build_share_url(base_url: &str, token: &str) -> String {
    format!(
        "{}/{SHARED_CALENDAR_PATH}/{token}",
        base_url.trim_end_matches('/')
    )
}

/// Expiry `days` days after `now`. Negative values yield a past instant.
pub fn expires_at_from_days(now: DateTime<Utc>, days: i64) -> DateTime<Utc> {
    now + Duration::days(days)
}
