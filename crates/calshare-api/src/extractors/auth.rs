//! `OwnerUser` extractor: pulls the JWT from the Authorization header,
//! validates it, and injects the owner context.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use calshare_core::error::AppError;
use calshare_service::OwnerContext;

use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated calendar owner.
#[derive(Debug, Clone)]
pub struct OwnerUser(pub OwnerContext);

impl OwnerUser {
    /// Returns the inner `OwnerContext`.
    pub fn context(&self) -> &OwnerContext {
        &self.0
    }
}

impl std::ops::Deref for OwnerUser {
    type Target = OwnerContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for OwnerUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = state.jwt_decoder.decode(token)?;
        Ok(OwnerUser(OwnerContext::new(claims.sub)))
    }
}
