//! Advisory overlap detection between a candidate interval and existing events.
//!
//! Intervals are half-open: `[start, end)`. Touching endpoints do not overlap.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use calshare_entity::event::Event;

/// An existing event reduced to what conflict detection needs.
///
/// Missing bounds mark an event whose dates could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSpan {
    /// Event identifier.
    pub id: String,
    /// Inclusive start.
    pub start: Option<DateTime<Utc>>,
    /// Exclusive end.
    pub end: Option<DateTime<Utc>>,
}

impl EventSpan {
    /// Build a span from RFC 3339 strings; unparseable bounds become `None`.
    pub fn parse(id: impl Into<String>, start: &str, end: &str) -> Self {
        let parse = |raw: &str| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        };
        Self {
            id: id.into(),
            start: parse(start),
            end: parse(end),
        }
    }
}

impl From<&Event> for EventSpan {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            start: Some(event.start_time),
            end: Some(event.end_time),
        }
    }
}

/// How many existing events a candidate overlaps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
    /// Whether any event overlaps.
    pub has_conflict: bool,
    /// Number of distinct overlapping events.
    pub count: usize,
}

/// Half-open interval overlap: `s1 < e2 && s2 < e1`.
pub fn overlaps(
    s1: DateTime<Utc>,
    e1: DateTime<Utc>,
    s2: DateTime<Utc>,
    e2: DateTime<Utc>,
) -> bool {
    s1 < e2 && s2 < e1
}

/// Count the existing events overlapping `[start, end)`.
///
/// The event with id `exclude_id` (the one being edited) is ignored, and
/// spans with missing or inverted bounds are skipped with a warning.
pub fn detect_conflicts(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    exclude_id: Option<&str>,
    existing: &[EventSpan],
) -> ConflictReport {
    let mut conflicting: HashSet<&str> = HashSet::new();

    for span in existing {
        if exclude_id == Some(span.id.as_str()) {
            continue;
        }
        let (Some(s2), Some(e2)) = (span.start, span.end) else {
            warn!(event_id = %span.id, "Skipping event with unparseable dates");
            continue;
        };
        if e2 <= s2 {
            warn!(event_id = %span.id, "Skipping event that ends before it starts");
            continue;
        }
        if overlaps(start, end, s2, e2) {
            conflicting.insert(span.id.as_str());
        }
    }

    ConflictReport {
        has_conflict: !conflicting.is_empty(),
        count: conflicting.len(),
    }
}
