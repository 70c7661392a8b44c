//! Side-effect-free cryptographic primitives used by share tokens.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use rand::RngCore;
use rand::rngs::OsRng;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::token::TokenError;

type HmacSha256 = Hmac<Sha256>;

/// Minimum accepted length of an HMAC secret, in characters.
pub const MIN_SECRET_KEY_LENGTH: usize = 32;

/// Generate `byte_length` bytes from the OS CSPRNG, hex encoded.
pub fn generate_secure_random(byte_length: usize) -> Result<String, TokenError> {
    if byte_length == 0 {
        return Err(TokenError::InvalidByteLength(byte_length));
    }
    let mut bytes = vec![0u8; byte_length];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| TokenError::RandomSource(e.to_string()))?;
    Ok(hex::encode(bytes))
}

/// HMAC-SHA256 of `data` keyed by `secret_key`, hex encoded.
///
/// When `truncate_length` is given only that many leading hex characters
/// are returned.
pub fn generate_hmac(
    data: &str,
    secret_key: &str,
    truncate_length: Option<usize>,
) -> Result<String, TokenError> {
    validate_secret_key(secret_key)?;

    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .map_err(|e| TokenError::MacInit(e.to_string()))?;
    mac.update(data.as_bytes());
    let mut digest = hex::encode(mac.finalize().into_bytes());

    if let Some(length) = truncate_length {
        digest.truncate(length);
    }
    Ok(digest)
}

/// Reject absent or short HMAC secrets.
pub fn validate_secret_key(secret_key: &str) -> Result<(), TokenError> {
    if secret_key.is_empty() {
        return Err(TokenError::MissingSecretKey);
    }
    let length = secret_key.chars().count();
    if length < MIN_SECRET_KEY_LENGTH {
        return Err(TokenError::WeakSecretKey(length));
    }
    Ok(())
}

/// Constant-time string equality. Differing lengths compare unequal.
pub fn timing_safe_equal(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Encode a UTF-8 string as unpadded URL-safe base64.
pub fn encode_base64_url(input: &str) -> String {
    URL_SAFE_NO_PAD.encode(input.as_bytes())
}

/// Decode unpadded URL-safe base64 into a UTF-8 string.
pub fn decode_base64_url(encoded: &str) -> Result<String, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(encoded.as_bytes())
        .map_err(|_| TokenError::MalformedCalendarId)?;
    String::from_utf8(bytes).map_err(|_| TokenError::MalformedCalendarId)
}

/// Whether `input` is non-empty ASCII hex, optionally of an exact length.
pub fn is_valid_hex(input: &str, expected_length: Option<usize>) -> bool {
    if expected_length.is_some_and(|len| input.len() != len) {
        return false;
    }
    !input.is_empty() && input.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Read an environment variable that must be set and non-empty.
pub fn get_required_env_var(name: &str) -> Result<String, TokenError> {
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(TokenError::MissingEnvVar(name.to_string())),
    }
}

/// Unsalted SHA-256 of a string, hex encoded.
pub fn sha256_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn test_secure_random_length() {
        let value = generate_secure_random(32).unwrap();
        assert_eq!(value.len(), 64);
        assert!(is_valid_hex(&value, Some(64)));
        assert_ne!(value, generate_secure_random(32).unwrap());
    }

    #[test]
    fn test_secure_random_rejects_zero() {
        assert!(matches!(
            generate_secure_random(0),
            Err(TokenError::InvalidByteLength(0))
        ));
    }

    #[test]
    fn test_hmac_truncation() {
        let full = generate_hmac("payload", SECRET, None).unwrap();
        assert_eq!(full.len(), 64);
        let short = generate_hmac("payload", SECRET, Some(8)).unwrap();
        assert_eq!(short, full[..8]);
    }

    #[test]
    fn test_hmac_requires_secret() {
        assert!(matches!(
            generate_hmac("payload", "", None),
            Err(TokenError::MissingSecretKey)
        ));
        assert!(matches!(
            generate_hmac("payload", "short", Some(8)),
            Err(TokenError::WeakSecretKey(5))
        ));
    }

    #[test]
    fn test_hmac_accepts_multibyte_and_long_keys() {
        let multibyte = "ключ".repeat(8);
        assert_eq!(multibyte.chars().count(), 32);
        assert_eq!(generate_hmac("payload", &multibyte, Some(8)).unwrap().len(), 8);

        let long = "k".repeat(512);
        assert_eq!(generate_hmac("payload", &long, None).unwrap().len(), 64);
    }

    #[test]
    fn test_timing_safe_equal() {
        assert!(timing_safe_equal("a1b2c3d4", "a1b2c3d4"));
        assert!(!timing_safe_equal("a1b2c3d4", "a1b2c3d5"));
        assert!(!timing_safe_equal("a1b2c3d4", "a1b2c3"));
        assert!(!timing_safe_equal("", "a"));
        assert!(timing_safe_equal("", ""));
    }

    #[test]
    fn test_base64_url_round_trip() {
        for input in ["cal-123", "ünïcødé 📅", "a", "550e8400-e29b-41d4-a716-446655440000"] {
            let encoded = encode_base64_url(input);
            assert!(!encoded.contains('='));
            assert!(!encoded.contains('+'));
            assert!(!encoded.contains('/'));
            assert_eq!(decode_base64_url(&encoded).unwrap(), input);
        }
        assert_eq!(encode_base64_url("cal-123"), "Y2FsLTEyMw");
    }

    #[test]
    fn test_base64_url_rejects_malformed() {
        assert!(matches!(
            decode_base64_url("not*base64"),
            Err(TokenError::MalformedCalendarId)
        ));
        // Valid base64url of bytes that are not UTF-8.
        assert!(matches!(
            decode_base64_url("_w"),
            Err(TokenError::MalformedCalendarId)
        ));
    }

    #[test]
    fn test_is_valid_hex() {
        assert!(is_valid_hex("deadBEEF", None));
        assert!(is_valid_hex("deadbeef", Some(8)));
        assert!(!is_valid_hex("deadbeef", Some(6)));
        assert!(!is_valid_hex("xyz", None));
        assert!(!is_valid_hex("", None));
    }

    #[test]
    fn test_sha256_hex() {
        assert_eq!(
            sha256_hex("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
