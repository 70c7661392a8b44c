//! Custom Axum extractors.

pub mod auth;
pub mod share_password;

pub use auth::OwnerUser;
pub use share_password::{SHARE_PASSWORD_HEADER, SharePassword};
