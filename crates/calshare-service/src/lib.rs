//! # calshare-service
//!
//! Business logic for Calshare. Services are built once at startup with
//! their stores and collaborators injected as `Arc`s.
//!
//! - `calendar`: owner calendar management
//! - `share`: shared link lifecycle and token lookup
//! - `permission`: the authorization decision for token bearers
//! - `event`: conflict detection and permission-gated event operations

pub mod calendar;
pub mod context;
pub mod event;
pub mod permission;
pub mod share;

pub use calendar::{CalendarInput, CalendarService, CalendarUpdate};
pub use context::OwnerContext;
pub use event::{ConflictCheck, ConflictReport, EventInput, EventService};
pub use permission::{PermissionContext, PermissionError, PermissionValidator};
pub use share::SharedLinkService;
