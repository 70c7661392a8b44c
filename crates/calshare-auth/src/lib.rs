//! # calshare-auth
//!
//! Cryptography and credentials for Calshare.
//!
//! ## Modules
//!
//! - `crypto`: secure random, HMAC-SHA256, constant-time compare, base64url, hex
//! - `secret`: the process-wide share token secret
//! - `token`: share token generation, parsing and validation
//! - `password`: shared link password hashing
//! - `jwt`: owner session token verification

pub mod crypto;
pub mod jwt;
pub mod password;
pub mod secret;
pub mod token;

pub use jwt::{JwtDecoder, OwnerClaims};
pub use password::LinkPasswordHasher;
pub use secret::TokenSecret;
pub use token::{ShareTokenManager, TokenError, TokenValidation};
