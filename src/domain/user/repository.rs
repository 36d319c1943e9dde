use async_trait::async_trait;

use super::{CreateUserDto, User, UserQuery};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>>;
    async fn list_users(&self, query: UserQuery) -> DomainResult<Vec<User>>;

    /// Deletes the user; role assignments cascade.
    /// Returns `NotFound` if no row matched.
    async fn delete_user(&self, id: &str) -> DomainResult<()>;
}
