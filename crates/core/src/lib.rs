//! StoreMap Core - Shared types library.
//!
//! This crate provides common types used across all StoreMap components:
//! - `server` - JSON API serving stores, districts, stats, and auth
//! - `cli` - Command-line tools for migrations and data import
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, validated coordinates, and user roles

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
