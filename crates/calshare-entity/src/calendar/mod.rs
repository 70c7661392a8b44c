//! Calendar domain entities.

pub mod model;

pub use model::{Calendar, CalendarPatch, NewCalendar};
