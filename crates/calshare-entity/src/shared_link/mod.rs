//! Shared link domain entities.

pub mod model;
pub mod permission;
pub mod stats;

pub use model::{
    CURRENT_TOKEN_VERSION, LEGACY_TOKEN_VERSION, NewSharedLink, SharedLink, SharedLinkPatch,
};
pub use permission::PermissionLevel;
pub use stats::SharingStats;
