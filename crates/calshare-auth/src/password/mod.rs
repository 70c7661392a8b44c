//! Shared link password hashing.

pub mod hasher;

pub use hasher::LinkPasswordHasher;
