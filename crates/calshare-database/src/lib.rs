//! # calshare-database
//!
//! Persistence for Calshare: the async store traits the service layer
//! depends on, their PostgreSQL implementations, in-memory stores used by
//! tests and local runs, plus connection pooling and migrations.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::{CalendarStore, EventStore, SharedLinkStore};
