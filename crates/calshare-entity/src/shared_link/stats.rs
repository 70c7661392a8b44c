//! Per-calendar sharing statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::model::SharedLink;

/// Aggregated counts over one owner's links for one calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharingStats {
    /// All links.
    pub total_links: u64,
    /// Links that have not expired.
    pub active_links: u64,
    /// Links past their expiry.
    pub expired_links: u64,
    /// Links that require a password.
    pub password_protected_links: u64,
}

impl SharingStats {
    /// Fold a set of links into stats as of `now`.
    pub fn from_links<'a>(
        links: impl IntoIterator<Item = &'a SharedLink>,
        now: DateTime<Utc>,
    ) -> Self {
        links.into_iter().fold(Self::default(), |mut acc, link| {
            acc.total_links += 1;
            if link.is_expired_at(now) {
                acc.expired_links += 1;
            } else {
                acc.active_links += 1;
            }
            if link.is_password_protected() {
                acc.password_protected_links += 1;
            }
            acc
        })
    }
}
