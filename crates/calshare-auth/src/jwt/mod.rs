//! Owner session token verification.

pub mod claims;
pub mod decoder;

pub use claims::OwnerClaims;
pub use decoder::JwtDecoder;
