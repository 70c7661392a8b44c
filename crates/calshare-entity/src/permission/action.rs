//! Actions a shared-link bearer may attempt on a calendar.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use calshare_core::AppError;

/// An action checked against a shared-link permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Read calendar events.
    View,
    /// Create, modify or delete calendar events.
    Edit,
}

impl Action {
    /// Return the action as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Action {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "view" => Ok(Self::View),
            "edit" => Ok(Self::Edit),
            _ => Err(AppError::validation(format!("Unknown action: '{s}'"))),
        }
    }
}
