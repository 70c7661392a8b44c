//! The single authorization decision point for token-bearing requests.
//!
//! Owners (authenticated requests) always have full access to their own
//! calendars; ownership itself is enforced by owner-scoped store queries.
//! This validator decides what an anonymous token bearer may do.

use std::sync::Arc;

use tracing::{debug, error};
use uuid::Uuid;

use calshare_core::error::AppError;
use calshare_entity::permission::{
    Action, LinkFailure, PermissionValidationResult, SharedLinkPermission,
};
use calshare_entity::shared_link::PermissionLevel;

use super::context::PermissionContext;
use super::error::PermissionError;
use crate::share::{LinkLookup, SharedLinkService};

/// Validates share tokens and answers access questions.
#[derive(Debug, Clone)]
pub struct PermissionValidator {
    links: Arc<SharedLinkService>,
}

impl PermissionValidator {
    /// Creates a new validator over the shared link service.
    pub fn new(links: Arc<SharedLinkService>) -> Self {
        Self { links }
    }

    /// Resolve a token and optional password into a permission decision.
    ///
    /// Unexpected failures fail closed with a generic message. Only
    /// configuration errors (missing or weak secret) are returned as `Err`.
    pub async fn validate_token(
        &self,
        token: &str,
        password: Option<&str>,
    ) -> Result<PermissionValidationResult, AppError> {
        if !self.links.token_manager().has_valid_format(token) {
            debug!("Share token failed structural check");
            return Ok(PermissionValidationResult::denied(LinkFailure::InvalidToken));
        }

        match self.links.find_by_token(token, password).await {
            Ok(LinkLookup::Granted(link)) => Ok(PermissionValidationResult::granted(
                SharedLinkPermission::from_link(&link, token),
            )),
            Ok(LinkLookup::Denied(failure)) => {
                debug!(
                    calendar_id = ?self.extract_calendar_id_from_token(token),
                    reason = ?failure,
                    "Share token denied"
                );
                Ok(PermissionValidationResult::denied(failure))
            }
            Err(e) if e.is_configuration() => {
                error!(error = %e, "Share token validation misconfigured");
                Err(e)
            }
            Err(e) => {
                error!(error = %e, "Share token validation failed");
                Ok(PermissionValidationResult::denied(LinkFailure::Internal))
            }
        }
    }

    /// Like [`validate_token`](Self::validate_token) but returns the granted
    /// permission or the denial as an error.
    pub async fn resolve(
        &self,
        token: &str,
        password: Option<&str>,
    ) -> Result<SharedLinkPermission, AppError> {
        let result = self.validate_token(token, password).await?;
        match (result.permission, result.failure) {
            (Some(permission), _) => Ok(permission),
            (None, Some(failure)) => Err(failure.into()),
            (None, None) => Err(LinkFailure::Internal.into()),
        }
    }

    /// Owners may always edit; bearers need an edit link.
    pub fn has_edit_access(
        &self,
        permission: Option<&SharedLinkPermission>,
        is_authenticated: bool,
    ) -> bool {
        is_authenticated || permission.is_some_and(|p| p.level == PermissionLevel::Edit)
    }

    /// Owners may always view; bearers need any link.
    pub fn has_view_access(
        &self,
        permission: Option<&SharedLinkPermission>,
        is_authenticated: bool,
    ) -> bool {
        is_authenticated
            || permission.is_some_and(|p| {
                matches!(p.level, PermissionLevel::View | PermissionLevel::Edit)
            })
    }

    /// Dispatch to the view or edit check.
    pub fn validate_action(
        &self,
        action: Action,
        permission: Option<&SharedLinkPermission>,
        is_authenticated: bool,
    ) -> bool {
        match action {
            Action::View => self.has_view_access(permission, is_authenticated),
            Action::Edit => self.has_edit_access(permission, is_authenticated),
        }
    }

    /// Fail with `INSUFFICIENT_PERMISSIONS` when `action` is not allowed.
    pub fn require_permission(
        &self,
        action: Action,
        permission: Option<&SharedLinkPermission>,
        is_authenticated: bool,
    ) -> Result<(), PermissionError> {
        if self.validate_action(action, permission, is_authenticated) {
            Ok(())
        } else {
            Err(PermissionError::insufficient(action, is_authenticated))
        }
    }

    /// Decode the calendar id of a token without verifying it.
    pub fn extract_calendar_id_from_token(&self, token: &str) -> Option<String> {
        self.links.token_manager().extract_calendar_id(token)
    }

    /// Build the access context for a request.
    pub fn permission_context(
        &self,
        user_id: Option<Uuid>,
        shared_link: Option<SharedLinkPermission>,
    ) -> PermissionContext {
        let is_authenticated = user_id.is_some();
        PermissionContext {
            is_authenticated,
            user_id,
            has_edit_access: self.has_edit_access(shared_link.as_ref(), is_authenticated),
            has_view_access: self.has_view_access(shared_link.as_ref(), is_authenticated),
            shared_link,
        }
    }
}
