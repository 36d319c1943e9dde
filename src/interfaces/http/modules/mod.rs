//! HTTP endpoint modules

pub mod auth;
pub mod health;
pub mod roles;
pub mod users;

use std::sync::Arc;

use crate::application::IdentityService;
use crate::infrastructure::database::repositories::{RoleRepository, UserRepository};

/// Handler state, concrete over the SeaORM repositories for Axum
/// compatibility.
#[derive(Clone)]
pub struct IdentityState {
    pub identity: Arc<IdentityService<UserRepository, RoleRepository>>,
}
