use async_trait::async_trait;

use super::Role;
use crate::domain::DomainResult;

#[async_trait]
pub trait RoleRepositoryInterface: Send + Sync {
    async fn create_role(&self, name: &str) -> DomainResult<Role>;

    /// Resolves role names to role records, preserving only names that
    /// exist. Callers decide what to do about the missing ones.
    async fn find_roles_by_names(&self, names: &[String]) -> DomainResult<Vec<Role>>;

    /// Role names currently assigned to the user, sorted by name.
    async fn roles_for_user(&self, user_id: &str) -> DomainResult<Vec<String>>;

    /// Assigns the given roles to the user. Already-held roles are
    /// left untouched.
    async fn assign_roles(&self, user_id: &str, role_ids: &[String]) -> DomainResult<()>;

    /// Removes the given roles from the user. Roles the user does not
    /// hold are ignored.
    async fn remove_roles(&self, user_id: &str, role_ids: &[String]) -> DomainResult<()>;
}
