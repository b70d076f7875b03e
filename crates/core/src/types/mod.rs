//! Core types for StoreMap.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod coordinates;
pub mod id;
pub mod role;

pub use coordinates::{Coordinates, CoordinatesError};
pub use id::*;
pub use role::{Role, RoleError};
