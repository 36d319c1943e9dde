//! Identity module — user management & authentication
//!
//! Contains the `IdentityService` which orchestrates all identity
//! use-cases: registration, login, profile lookup, role management.

pub mod service;

#[cfg(test)]
pub mod testing;

pub use service::{IdentityService, LoginResult, RegisterInput};
