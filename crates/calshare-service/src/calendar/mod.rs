//! Calendar management for owners.

pub mod service;

pub use service::{CalendarInput, CalendarService, CalendarUpdate};
