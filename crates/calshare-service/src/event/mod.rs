//! Calendar events: overlap detection and permission-gated operations.

pub mod conflict;
pub mod service;

pub use conflict::{ConflictReport, EventSpan, detect_conflicts, overlaps};
pub use service::{ConflictCheck, EventInput, EventService};
