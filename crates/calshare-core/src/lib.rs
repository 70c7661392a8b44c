//! # calshare-core
//!
//! Core crate for Calshare. Contains the configuration schemas, the stable
//! machine-readable error codes, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Calshare crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorCode, ErrorKind};
pub use result::AppResult;
