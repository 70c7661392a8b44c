//! Shared link management: creation, token lookup, updates and cleanup.

pub mod link;
pub mod lookup;
pub mod service;

pub use link::{build_share_url, expires_at_from_days};
pub use lookup::LinkLookup;
pub use service::{
    CreateSharedLinkRequest, CreatedSharedLink, SharedLinkService, UpdateSharedLinkRequest,
};
