//! Authorization for shared-link bearers.

pub mod context;
pub mod error;
pub mod validator;

pub use context::PermissionContext;
pub use error::{PermissionError, PermissionErrorCode};
pub use validator::PermissionValidator;
