//! HTTP REST API interfaces
//!
//! - `middleware`: Bearer-token authentication + admin policy
//! - `modules`: Request handlers for all resources
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::create_api_router;
