//! Database entities

pub mod role;
pub mod user;
pub mod user_role;
