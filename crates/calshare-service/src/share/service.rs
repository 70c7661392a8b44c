//! Shared link CRUD and token resolution.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use calshare_auth::password::LinkPasswordHasher;
use calshare_auth::token::ShareTokenManager;
use calshare_core::error::{AppError, ErrorCode};
use calshare_database::store::{CalendarStore, SharedLinkStore};
use calshare_entity::permission::LinkFailure;
use calshare_entity::shared_link::{
    CURRENT_TOKEN_VERSION, NewSharedLink, PermissionLevel, SharedLink, SharedLinkPatch,
    SharingStats,
};

use super::lookup::LinkLookup;
use crate::context::OwnerContext;

/// Request to create a shared link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSharedLinkRequest {
    /// Calendar to share.
    pub calendar_id: Uuid,
    /// Access level.
    #[serde(default)]
    pub permissions: PermissionLevel,
    /// Optional plaintext password. Empty means none.
    pub password: Option<String>,
    /// Optional expiry.
    pub expires_at: Option<DateTime<Utc>>,
}

/// Partial update of a shared link.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSharedLinkRequest {
    /// New access level.
    pub permissions: Option<PermissionLevel>,
    /// `None` keeps the password, empty removes it, anything else replaces it.
    pub password: Option<String>,
    /// `None` keeps the expiry, `Some(None)` removes it.
    pub expires_at: Option<Option<DateTime<Utc>>>,
}

/// A freshly created link and its token.
///
/// The token is only ever available here; the store keeps only its random
/// component.
#[derive(Debug, Clone)]
pub struct CreatedSharedLink {
    /// The stored record.
    pub record: SharedLink,
    /// The full share token.
    pub token: String,
}

/// Manages shared links for calendar owners and resolves tokens for bearers.
#[derive(Debug, Clone)]
pub struct SharedLinkService {
    links: Arc<dyn SharedLinkStore>,
    calendars: Arc<dyn CalendarStore>,
    tokens: Arc<ShareTokenManager>,
    hasher: Arc<LinkPasswordHasher>,
}

impl SharedLinkService {
    /// Creates a new shared link service.
    pub fn new(
        links: Arc<dyn SharedLinkStore>,
        calendars: Arc<dyn CalendarStore>,
        tokens: Arc<ShareTokenManager>,
        hasher: Arc<LinkPasswordHasher>,
    ) -> Self {
        Self {
            links,
            calendars,
            tokens,
            hasher,
        }
    }

    /// The token manager used to mint and verify tokens.
    pub fn token_manager(&self) -> &ShareTokenManager {
        &self.tokens
    }

    /// Create a link for a calendar the caller owns.
    pub async fn create_shared_link(
        &self,
        ctx: &OwnerContext,
        req: CreateSharedLinkRequest,
    ) -> Result<CreatedSharedLink, AppError> {
        self.require_owned_calendar(ctx, req.calendar_id).await?;

        let token = self.tokens.generate(&req.calendar_id.to_string())?;
        let (_, token_random) = self.tokens.validate(&token)?.into_result()?;

        let password_hash = match req.password.as_deref() {
            Some(password) if !password.is_empty() => Some(self.hasher.hash_password(password)?),
            _ => None,
        };

        let record = self
            .links
            .insert(NewSharedLink {
                calendar_id: req.calendar_id,
                user_id: Some(ctx.user_id),
                token_random,
                token_version: CURRENT_TOKEN_VERSION,
                permissions: req.permissions,
                password_hash,
                expires_at: req.expires_at,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            link_id = %record.id,
            calendar_id = %record.calendar_id,
            permissions = %record.permissions,
            password_protected = record.is_password_protected(),
            "Shared link created"
        );

        Ok(CreatedSharedLink { record, token })
    }

    /// Resolve a token (and optional password) to its link record.
    ///
    /// Order: full token validation, lookup by random component, expiry,
    /// then the password gate. An expired link is reported as expired even
    /// when it is password protected.
    ///
    /// Returns `Err` for configuration and store failures only.
    pub async fn find_by_token(
        &self,
        token: &str,
        password: Option<&str>,
    ) -> Result<LinkLookup, AppError> {
        let validation = self.tokens.validate(token)?;
        let (calendar_id, random) = match validation.into_result() {
            Ok(parts) => parts,
            Err(e) => {
                debug!(code = %e.code(), "Share token rejected");
                return Ok(LinkLookup::Denied(LinkFailure::InvalidToken));
            }
        };

        let Some(record) = self
            .links
            .find_by_token_random(&random, CURRENT_TOKEN_VERSION)
            .await?
        else {
            return Ok(LinkLookup::Denied(LinkFailure::NotFound));
        };

        if record.calendar_id.to_string() != calendar_id {
            warn!(
                link_id = %record.id,
                record_calendar_id = %record.calendar_id,
                token_calendar_id = %calendar_id,
                "Share token calendar does not match its link record"
            );
            return Ok(LinkLookup::Denied(LinkFailure::NotFound));
        }

        if record.is_expired_at(Utc::now()) {
            return Ok(LinkLookup::Denied(LinkFailure::Expired));
        }

        if let Some(ref stored_hash) = record.password_hash {
            match password.filter(|p| !p.is_empty()) {
                None => return Ok(LinkLookup::Denied(LinkFailure::PasswordRequired)),
                Some(password) => {
                    if !self.hasher.verify_password(password, stored_hash)? {
                        return Ok(LinkLookup::Denied(LinkFailure::PasswordIncorrect));
                    }
                }
            }
        }

        Ok(LinkLookup::Granted(record))
    }

    /// All links the caller created for one calendar, newest first.
    pub async fn list_by_calendar(
        &self,
        ctx: &OwnerContext,
        calendar_id: Uuid,
    ) -> Result<Vec<SharedLink>, AppError> {
        self.links.list_by_calendar(calendar_id, ctx.user_id).await
    }

    /// One link owned by the caller.
    pub async fn get_shared_link(
        &self,
        ctx: &OwnerContext,
        link_id: Uuid,
    ) -> Result<SharedLink, AppError> {
        self.links
            .find_by_id(link_id)
            .await?
            .filter(|link| link.user_id == Some(ctx.user_id))
            .ok_or_else(link_not_found)
    }

    /// Apply a partial update to a link owned by the caller.
    pub async fn update_shared_link(
        &self,
        ctx: &OwnerContext,
        link_id: Uuid,
        req: UpdateSharedLinkRequest,
    ) -> Result<SharedLink, AppError> {
        let password_hash = match req.password.as_deref() {
            None => None,
            Some("") => Some(None),
            Some(password) => Some(Some(self.hasher.hash_password(password)?)),
        };
        let patch = SharedLinkPatch {
            permissions: req.permissions,
            password_hash,
            expires_at: req.expires_at,
        };

        let link = self
            .links
            .update(link_id, ctx.user_id, &patch)
            .await?
            .ok_or_else(link_not_found)?;

        info!(
            user_id = %ctx.user_id,
            link_id = %link_id,
            password_changed = patch.password_hash.is_some(),
            "Shared link updated"
        );

        Ok(link)
    }

    /// Delete a link owned by the caller. Returns whether it existed.
    pub async fn delete_shared_link(
        &self,
        ctx: &OwnerContext,
        link_id: Uuid,
    ) -> Result<bool, AppError> {
        let deleted = self.links.delete(link_id, ctx.user_id).await?;
        if deleted {
            info!(user_id = %ctx.user_id, link_id = %link_id, "Shared link deleted");
        }
        Ok(deleted)
    }

    /// Remove every expired link.
    pub async fn cleanup_expired_links(&self) -> Result<u64, AppError> {
        let removed = self.links.delete_expired(Utc::now()).await?;
        info!(removed, "Expired shared links cleaned up");
        Ok(removed)
    }

    /// Link counts for one calendar and owner.
    pub async fn get_calendar_sharing_stats(
        &self,
        calendar_id: Uuid,
        user_id: Uuid,
    ) -> Result<SharingStats, AppError> {
        let links = self.links.list_by_calendar(calendar_id, user_id).await?;
        Ok(SharingStats::from_links(&links, Utc::now()))
    }

    async fn require_owned_calendar(
        &self,
        ctx: &OwnerContext,
        calendar_id: Uuid,
    ) -> Result<(), AppError> {
        self.calendars
            .find_owned(calendar_id, ctx.user_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| {
                AppError::not_found("Calendar not found").with_code(ErrorCode::CalendarNotFound)
            })
    }
}

fn link_not_found() -> AppError {
    AppError::not_found("Shared link not found").with_code(ErrorCode::LinkNotFound)
}
