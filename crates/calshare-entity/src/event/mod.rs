//! Calendar event entities.

pub mod model;

pub use model::{Event, EventData};
