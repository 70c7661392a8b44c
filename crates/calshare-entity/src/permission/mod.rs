//! Shared-link permission value objects.

pub mod action;
pub mod grant;

pub use action::Action;
pub use grant::{DenialReason, LinkFailure, PermissionValidationResult, SharedLinkPermission};
