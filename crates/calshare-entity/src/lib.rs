//! # calshare-entity
//!
//! Domain entity models for Calshare. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow` so rows are mapped to typed entities
//! at the store boundary and never travel further as loose records.

pub mod calendar;
pub mod event;
pub mod permission;
pub mod shared_link;
