//! Share token generation and validation.

use serde::Serialize;
use tracing::error;

use calshare_core::config::ShareConfig;

use super::components::{TOKEN_SEPARATOR, TokenComponents, signing_payload};
use super::error::TokenError;
use crate::crypto;
use crate::secret::TokenSecret;

/// Which structural checks a token passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ValidationDetails {
    /// Segment layout, encoding and random component were well formed.
    pub has_valid_format: bool,
    /// The checksum matched.
    pub has_valid_checksum: bool,
    /// The prefix matched.
    pub has_valid_prefix: bool,
}

/// Outcome of validating a share token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenValidation {
    /// Whether every check passed.
    pub is_valid: bool,
    /// Decoded calendar id, present iff valid.
    pub calendar_id: Option<String>,
    /// Random component (the store lookup key), present iff valid.
    pub random_component: Option<String>,
    /// First failing check.
    pub error: Option<TokenError>,
    /// Per-check flags.
    pub details: ValidationDetails,
}

impl TokenValidation {
    fn valid(calendar_id: String, random_component: &str) -> Self {
        Self {
            is_valid: true,
            calendar_id: Some(calendar_id),
            random_component: Some(random_component.to_string()),
            error: None,
            details: ValidationDetails {
                has_valid_format: true,
                has_valid_checksum: true,
                has_valid_prefix: true,
            },
        }
    }

    fn invalid(error: TokenError, has_valid_format: bool, has_valid_prefix: bool) -> Self {
        Self {
            is_valid: false,
            calendar_id: None,
            random_component: None,
            error: Some(error),
            details: ValidationDetails {
                has_valid_format,
                has_valid_checksum: false,
                has_valid_prefix,
            },
        }
    }

    /// Convert into `(calendar_id, random_component)` or the failing check.
    pub fn into_result(self) -> Result<(String, String), TokenError> {
        match (self.calendar_id, self.random_component, self.error) {
            (Some(calendar_id), Some(random), None) if self.is_valid => Ok((calendar_id, random)),
            (_, _, Some(err)) => Err(err),
            _ => Err(TokenError::InvalidFormat("incomplete validation".to_string())),
        }
    }
}

/// Builds and verifies share tokens with one server-held secret.
#[derive(Debug, Clone)]
pub struct ShareTokenManager {
    secret: TokenSecret,
    prefix: String,
    random_bytes: usize,
    checksum_length: usize,
}

impl ShareTokenManager {
    /// Create a manager from share configuration and a loaded secret.
    pub fn new(config: &ShareConfig, secret: TokenSecret) -> Self {
        Self {
            secret,
            prefix: config.prefix.clone(),
            random_bytes: config.random_bytes,
            checksum_length: config.checksum_length,
        }
    }

    /// Configured token prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Length in hex characters of the random component.
    pub fn random_hex_length(&self) -> usize {
        self.random_bytes * 2
    }

    /// Generate a token for `calendar_id` with the configured prefix.
    pub fn generate(&self, calendar_id: &str) -> Result<String, TokenError> {
        self.generate_with_prefix(calendar_id, None)
    }

    /// Generate a token for `calendar_id`, optionally overriding the prefix.
    pub fn generate_with_prefix(
        &self,
        calendar_id: &str,
        prefix: Option<&str>,
    ) -> Result<String, TokenError> {
        if calendar_id.is_empty() {
            return Err(TokenError::InvalidCalendarId(
                "calendar id must be a non-empty string".to_string(),
            ));
        }
        if calendar_id.trim() != calendar_id {
            return Err(TokenError::InvalidCalendarId(
                "calendar id cannot have leading or trailing whitespace".to_string(),
            ));
        }

        let prefix = prefix.unwrap_or(&self.prefix);
        if prefix.is_empty() || prefix.contains(TOKEN_SEPARATOR) {
            return Err(TokenError::InvalidFormat(format!(
                "prefix must be non-empty and contain no '{TOKEN_SEPARATOR}'"
            )));
        }

        let encoded_calendar_id = crypto::encode_base64_url(calendar_id);
        if encoded_calendar_id.contains(TOKEN_SEPARATOR) {
            return Err(TokenError::InvalidCalendarId(
                "calendar id encoding collides with the token separator".to_string(),
            ));
        }

        let random_component = crypto::generate_secure_random(self.random_bytes)?;
        let payload = signing_payload(prefix, &encoded_calendar_id, &random_component);
        let checksum = self.sign(&payload)?;

        Ok(format!("{payload}{TOKEN_SEPARATOR}{checksum}"))
    }

    /// Fully validate a token.
    ///
    /// Checks run in order and stop at the first failure: segment count,
    /// prefix, calendar id decoding, random component, then a constant-time
    /// checksum comparison. Format failures never reach the HMAC.
    ///
    /// Returns `Err` only for configuration failures.
    pub fn validate(&self, token: &str) -> Result<TokenValidation, TokenError> {
        let Some(components) = TokenComponents::parse(token) else {
            return Ok(TokenValidation::invalid(
                TokenError::InvalidFormat("token must have exactly 4 segments".to_string()),
                false,
                false,
            ));
        };

        if components.prefix != self.prefix {
            return Ok(TokenValidation::invalid(TokenError::InvalidPrefix, true, false));
        }

        let calendar_id = match crypto::decode_base64_url(components.encoded_calendar_id) {
            Ok(id) if !id.is_empty() => id,
            _ => {
                return Ok(TokenValidation::invalid(
                    TokenError::MalformedCalendarId,
                    true,
                    true,
                ));
            }
        };

        if !crypto::is_valid_hex(components.random_component, Some(self.random_hex_length())) {
            return Ok(TokenValidation::invalid(
                TokenError::InvalidFormat("invalid random component".to_string()),
                false,
                true,
            ));
        }

        let expected = self.sign(&components.payload())?;
        if !crypto::timing_safe_equal(components.checksum, &expected) {
            return Ok(TokenValidation::invalid(TokenError::InvalidChecksum, true, true));
        }

        Ok(TokenValidation::valid(calendar_id, components.random_component))
    }

    /// Decode the calendar id without verifying the checksum.
    ///
    /// For routing and logging only, never for authorization.
    pub fn extract_calendar_id(&self, token: &str) -> Option<String> {
        let components = TokenComponents::parse(token)?;
        if components.prefix != self.prefix {
            return None;
        }
        crypto::decode_base64_url(components.encoded_calendar_id)
            .ok()
            .filter(|id| !id.is_empty())
    }

    /// Extract the random component without verifying the checksum.
    pub fn extract_random_component(&self, token: &str) -> Option<String> {
        let components = TokenComponents::parse(token)?;
        crypto::is_valid_hex(components.random_component, Some(self.random_hex_length()))
            .then(|| components.random_component.to_string())
    }

    /// Cheap structural check that never computes an HMAC.
    pub fn has_valid_format(&self, token: &str) -> bool {
        let Some(components) = TokenComponents::parse(token) else {
            return false;
        };
        components.prefix == self.prefix
            && !components.encoded_calendar_id.is_empty()
            && components
                .encoded_calendar_id
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'-')
            && crypto::is_valid_hex(components.random_component, Some(self.random_hex_length()))
            && crypto::is_valid_hex(components.checksum, Some(self.checksum_length))
    }

    fn sign(&self, payload: &str) -> Result<String, TokenError> {
        crypto::generate_hmac(payload, self.secret.expose(), Some(self.checksum_length))
            .inspect_err(|e| error!(error = %e, "Share token signing failed"))
    }
}
