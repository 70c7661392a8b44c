//! Result of resolving a token against the link store.

use calshare_entity::permission::LinkFailure;
use calshare_entity::shared_link::SharedLink;

/// Outcome of `SharedLinkService::find_by_token`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkLookup {
    /// A live link whose password gate (if any) was satisfied.
    Granted(SharedLink),
    /// The token does not grant access.
    Denied(LinkFailure),
}

impl LinkLookup {
    /// The granted record, if any.
    pub fn record(&self) -> Option<&SharedLink> {
        match self {
            Self::Granted(link) => Some(link),
            Self::Denied(_) => None,
        }
    }

    /// Whether the lookup denied access only for lack of a password.
    pub fn requires_password(&self) -> bool {
        matches!(self, Self::Denied(LinkFailure::PasswordRequired))
    }
}
