//! Share token wire format: `<prefix>_<base64url(calendar id)>_<random hex>_<hmac hex>`.

pub mod components;
pub mod error;
pub mod manager;

pub use components::{TOKEN_SEPARATOR, TokenComponents};
pub use error::TokenError;
pub use manager::{ShareTokenManager, TokenValidation, ValidationDetails};
