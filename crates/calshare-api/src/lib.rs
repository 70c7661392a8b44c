//! # calshare-api
//!
//! HTTP API layer for Calshare built on Axum.
//!
//! Owner routes authenticate with a bearer JWT; shared-calendar routes
//! authenticate with the share token in the path plus an optional
//! `X-Share-Password` header.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;
