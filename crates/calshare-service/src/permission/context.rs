//! Per-request permission context.

use serde::Serialize;
use uuid::Uuid;

use calshare_entity::permission::{Action, SharedLinkPermission};

/// Who is acting and what they may do.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionContext {
    /// Whether the request carries an owner session.
    pub is_authenticated: bool,
    /// The owner's id, when authenticated.
    pub user_id: Option<Uuid>,
    /// The resolved shared link, for token bearers.
    pub shared_link: Option<SharedLinkPermission>,
    /// Whether edits are allowed.
    pub has_edit_access: bool,
    /// Whether reads are allowed.
    pub has_view_access: bool,
}

impl PermissionContext {
    /// Whether the context allows `action`.
    pub fn allows(&self, action: Action) -> bool {
        match action {
            Action::View => self.has_view_access,
            Action::Edit => self.has_edit_access,
        }
    }
}
