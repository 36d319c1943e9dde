//! SeaORM repository implementations of the domain traits.

pub mod role_repository;
pub mod user_repository;

pub use role_repository::RoleRepository;
pub use user_repository::UserRepository;
