//! Permission level granted by a shared link.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::permission::Action;

/// Access level carried by a shared link.
///
/// Ordered by privilege: Edit > View.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "shared_link_permission", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PermissionLevel {
    /// Read-only access to the calendar's events.
    #[default]
    View,
    /// Read and write access to the calendar's events.
    Edit,
}

impl PermissionLevel {
    /// Whether this level permits the given action.
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::View => true,
            Action::Edit => matches!(self, Self::Edit),
        }
    }

    /// Return the level as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
        }
    }
}

impl fmt::Display for PermissionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PermissionLevel {
    type Err = calshare_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "view" => Ok(Self::View),
            "edit" => Ok(Self::Edit),
            _ => Err(calshare_core::AppError::validation(format!(
                "Invalid permission: '{s}'. Expected one of: view, edit"
            ))),
        }
    }
}
