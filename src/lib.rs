//! # Identity Service
//!
//! User-authentication and role-management backend fronting a
//! single-page application.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core entities, error taxonomy and repository traits
//! - **application**: The identity service orchestrating all use-cases
//! - **infrastructure**: Persistence (SeaORM) and crypto (bcrypt, JWT)
//! - **interfaces**: REST API with Swagger documentation

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::create_api_router;
