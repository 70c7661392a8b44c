//! In-memory store implementations backed by `dashmap`.
//!
//! Used by the integration tests and for running the server without a
//! database. Semantics mirror the PostgreSQL repositories, including
//! owner scoping and the unique token index.

pub mod calendar;
pub mod event;
pub mod shared_link;

pub use calendar::MemoryCalendarStore;
pub use event::MemoryEventStore;
pub use shared_link::MemorySharedLinkStore;
