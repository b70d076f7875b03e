//! StoreMap server library.
//!
//! This crate provides the API server functionality as a library,
//! allowing it to be tested and reused (the CLI uses the pool, repository,
//! and password-hashing helpers for imports and user management).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
