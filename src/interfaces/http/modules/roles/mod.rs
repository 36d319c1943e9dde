//! Role creation and assignment endpoints

pub mod dto;
pub mod handlers;

pub use dto::CreateRoleParams;
pub use handlers::{add_roles, create_role, remove_roles};
