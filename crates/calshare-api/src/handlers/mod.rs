//! Route handlers organized by audience.

pub mod calendar;
pub mod event;
pub mod health;
pub mod share;
pub mod shared;
