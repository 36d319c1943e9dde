//! Identity service — application-layer orchestration
//!
//! All user- and role-management business logic lives here. HTTP
//! handlers are thin wrappers that delegate to this service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, Role, RoleRepositoryInterface, User, UserQuery,
    UserRepositoryInterface,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Input for user registration, already syntax-checked by the HTTP layer.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub expiration: DateTime<Utc>,
    pub user: User,
}

/// Identity service — orchestrates registration, authentication and
/// role management.
///
/// Generic over the repository traits so it stays decoupled from the
/// concrete persistence layer.
pub struct IdentityService<U: UserRepositoryInterface, R: RoleRepositoryInterface> {
    users: Arc<U>,
    roles: Arc<R>,
    jwt_config: JwtConfig,
}

impl<U: UserRepositoryInterface, R: RoleRepositoryInterface> IdentityService<U, R> {
    pub fn new(users: Arc<U>, roles: Arc<R>, jwt_config: JwtConfig) -> Self {
        Self {
            users,
            roles,
            jwt_config,
        }
    }

    // ── Registration ────────────────────────────────────────────

    /// Register a new user with a freshly hashed password and a random
    /// security stamp. No token is issued on registration.
    pub async fn register(&self, input: RegisterInput) -> DomainResult<User> {
        if self
            .users
            .get_user_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict("User already exists!".into()));
        }

        let password_hash = hash_password(&input.password)
            .map_err(|e| DomainError::Store(format!("Failed to hash password: {}", e)))?;

        let dto = CreateUserDto {
            username: input.username,
            email: input.email,
            password_hash,
            security_stamp: uuid::Uuid::new_v4().to_string(),
            first_name: input.first_name,
            last_name: input.last_name,
            date_of_birth: None,
            gender: None,
            color_theme: None,
        };

        let user = self.users.create_user(dto).await?;
        info!(user_id = %user.id, username = %user.username, "New user registered");
        Ok(user)
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by username + password and issue a JWT valid for
    /// three hours. Unknown username and wrong password produce the
    /// same `Unauthorized` error so callers cannot enumerate accounts.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<LoginResult> {
        let user = self.users.get_user_by_username(username).await?;

        let Some(user) = user else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        let valid = verify_password(password, &user.password_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let role_names = self.roles.roles_for_user(&user.id).await?;

        let issued = create_token(&user.username, role_names, &self.jwt_config)
            .map_err(|e| DomainError::Store(format!("Failed to create token: {}", e)))?;

        info!(user_id = %user.id, username = %user.username, "User logged in");

        Ok(LoginResult {
            token: issued.token,
            expiration: issued.expires_at,
            user,
        })
    }

    // ── Profiles ────────────────────────────────────────────────

    /// Profile + current role names for a single user.
    pub async fn get_profile(&self, id: &str) -> DomainResult<(User, Vec<String>)> {
        let user = self
            .users
            .get_user_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            })?;

        let role_names = self.roles.roles_for_user(&user.id).await?;
        Ok((user, role_names))
    }

    /// Delete a user by id. Role assignments cascade in the store.
    pub async fn delete_user(&self, id: &str) -> DomainResult<()> {
        self.users.delete_user(id).await?;
        info!(user_id = %id, "User deleted");
        Ok(())
    }

    /// Every user with roles attached. One role lookup per user; the
    /// store sees O(n) round-trips for n users.
    pub async fn list_all(&self) -> DomainResult<Vec<(User, Vec<String>)>> {
        let users = self.users.list_users(UserQuery::default()).await?;

        let mut result = Vec::with_capacity(users.len());
        for user in users {
            let role_names = self.roles.roles_for_user(&user.id).await?;
            result.push((user, role_names));
        }
        Ok(result)
    }

    // ── Role management ─────────────────────────────────────────

    /// Create a role with the given name.
    pub async fn create_role(&self, name: &str) -> DomainResult<Role> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Role name should be provided.".into(),
            ));
        }

        let role = self.roles.create_role(name.trim()).await?;
        info!(role = %role.name, "Role created");
        Ok(role)
    }

    /// Assign the named roles to a user and return the refreshed
    /// profile. Unknown role names are rejected.
    pub async fn add_roles(
        &self,
        user_id: &str,
        role_names: &[String],
    ) -> DomainResult<(User, Vec<String>)> {
        let (user, roles) = self.resolve(user_id, role_names).await?;

        let role_ids: Vec<String> = roles.iter().map(|r| r.id.clone()).collect();
        self.roles.assign_roles(&user.id, &role_ids).await?;
        info!(user_id = %user.id, roles = ?role_names, "Roles added");

        let refreshed = self.roles.roles_for_user(&user.id).await?;
        Ok((user, refreshed))
    }

    /// Remove the named roles from a user and return the refreshed
    /// profile. Removing a role the user does not hold is a no-op.
    pub async fn remove_roles(
        &self,
        user_id: &str,
        role_names: &[String],
    ) -> DomainResult<(User, Vec<String>)> {
        let (user, roles) = self.resolve(user_id, role_names).await?;

        let role_ids: Vec<String> = roles.iter().map(|r| r.id.clone()).collect();
        self.roles.remove_roles(&user.id, &role_ids).await?;
        info!(user_id = %user.id, roles = ?role_names, "Roles removed");

        let refreshed = self.roles.roles_for_user(&user.id).await?;
        Ok((user, refreshed))
    }

    /// Looks up the target user and resolves role names to records,
    /// rejecting names that do not exist.
    async fn resolve(
        &self,
        user_id: &str,
        role_names: &[String],
    ) -> DomainResult<(User, Vec<Role>)> {
        let user = self
            .users
            .get_user_by_id(user_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: user_id.to_string(),
            })?;

        let roles = self.roles.find_roles_by_names(role_names).await?;

        if roles.len() != role_names.len() {
            let known: Vec<&str> = roles.iter().map(|r| r.name.as_str()).collect();
            let unknown: Vec<&str> = role_names
                .iter()
                .map(String::as_str)
                .filter(|n| !known.contains(n))
                .collect();
            return Err(DomainError::Validation(format!(
                "Unknown role(s): {}",
                unknown.join(", ")
            )));
        }

        Ok((user, roles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::identity::testing::{InMemoryRoles, InMemoryUsers};
    use crate::infrastructure::crypto::jwt::{verify_token, TOKEN_LIFETIME_HOURS};

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-secret-unit-test-secret".to_string(),
            issuer: "identity-service".to_string(),
            audience: "identity-spa".to_string(),
        }
    }

    fn service() -> IdentityService<InMemoryUsers, InMemoryRoles> {
        IdentityService::new(
            Arc::new(InMemoryUsers::default()),
            Arc::new(InMemoryRoles::default()),
            jwt_config(),
        )
    }

    fn alice() -> RegisterInput {
        RegisterInput {
            username: "alice".into(),
            email: "a@x.com".into(),
            password: "Passw0rd!".into(),
            first_name: "Alice".into(),
            last_name: "A".into(),
        }
    }

    #[tokio::test]
    async fn register_then_duplicate_conflicts() {
        let svc = service();
        svc.register(alice()).await.unwrap();

        let err = svc.register(alice()).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // no duplicate record was created
        assert_eq!(svc.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn register_hashes_password_and_stamps() {
        let svc = service();
        let user = svc.register(alice()).await.unwrap();

        assert_ne!(user.password_hash, "Passw0rd!");
        assert!(verify_password("Passw0rd!", &user.password_hash).unwrap());
        assert!(!user.security_stamp.is_empty());
    }

    #[tokio::test]
    async fn login_success_returns_token_and_profile() {
        let svc = service();
        svc.register(alice()).await.unwrap();

        let result = svc.login("alice", "Passw0rd!").await.unwrap();
        assert!(!result.token.is_empty());
        assert_eq!(result.user.username, "alice");

        let claims = verify_token(&result.token, &jwt_config()).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp - claims.iat, TOKEN_LIFETIME_HOURS * 3600);
        assert_eq!(result.expiration.timestamp(), claims.exp);
    }

    #[tokio::test]
    async fn login_carries_role_claims() {
        let svc = service();
        let user = svc.register(alice()).await.unwrap();
        svc.create_role("Admin").await.unwrap();
        svc.add_roles(&user.id, &["Admin".to_string()]).await.unwrap();

        let result = svc.login("alice", "Passw0rd!").await.unwrap();
        let claims = verify_token(&result.token, &jwt_config()).unwrap();
        assert_eq!(claims.roles, vec!["Admin"]);
        assert!(claims.is_admin());
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_are_indistinguishable() {
        let svc = service();
        svc.register(alice()).await.unwrap();

        let wrong_password = svc.login("alice", "nope").await.unwrap_err();
        let unknown_user = svc.login("nobody", "nope").await.unwrap_err();

        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
        assert!(matches!(wrong_password, DomainError::Unauthorized(_)));
        assert!(matches!(unknown_user, DomainError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn get_profile_returns_roles() {
        let svc = service();
        let user = svc.register(alice()).await.unwrap();
        svc.create_role("Member").await.unwrap();
        svc.add_roles(&user.id, &["Member".to_string()]).await.unwrap();

        let (profile, roles) = svc.get_profile(&user.id).await.unwrap();
        assert_eq!(profile.username, "alice");
        assert_eq!(roles, vec!["Member"]);
    }

    #[tokio::test]
    async fn get_profile_unknown_id_is_not_found() {
        let svc = service();
        let err = svc.get_profile("missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn delete_unknown_id_leaves_store_unchanged() {
        let svc = service();
        svc.register(alice()).await.unwrap();

        let err = svc.delete_user("missing").await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(svc.list_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_existing_user() {
        let svc = service();
        let user = svc.register(alice()).await.unwrap();

        svc.delete_user(&user.id).await.unwrap();
        assert!(svc.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_then_remove_round_trips() {
        let svc = service();
        let user = svc.register(alice()).await.unwrap();
        svc.create_role("Member").await.unwrap();
        svc.create_role("Auditor").await.unwrap();
        svc.add_roles(&user.id, &["Member".to_string()]).await.unwrap();

        let (_, before) = svc.get_profile(&user.id).await.unwrap();

        svc.add_roles(&user.id, &["Auditor".to_string()]).await.unwrap();
        let (_, after) = svc
            .remove_roles(&user.id, &["Auditor".to_string()])
            .await
            .unwrap();

        assert_eq!(before, after);
        assert_eq!(after, vec!["Member"]);
    }

    #[tokio::test]
    async fn adding_held_role_is_idempotent() {
        let svc = service();
        let user = svc.register(alice()).await.unwrap();
        svc.create_role("Member").await.unwrap();

        svc.add_roles(&user.id, &["Member".to_string()]).await.unwrap();
        let (_, roles) = svc.add_roles(&user.id, &["Member".to_string()]).await.unwrap();
        assert_eq!(roles, vec!["Member"]);
    }

    #[tokio::test]
    async fn unknown_role_name_is_rejected() {
        let svc = service();
        let user = svc.register(alice()).await.unwrap();
        svc.create_role("Member").await.unwrap();

        let err = svc
            .add_roles(&user.id, &["Member".to_string(), "Ghost".to_string()])
            .await
            .unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("Ghost")),
            other => panic!("expected Validation, got {:?}", other),
        }

        // nothing was applied
        let (_, roles) = svc.get_profile(&user.id).await.unwrap();
        assert!(roles.is_empty());
    }

    #[tokio::test]
    async fn role_ops_on_unknown_user_are_not_found() {
        let svc = service();
        svc.create_role("Member").await.unwrap();

        let err = svc
            .add_roles("missing", &["Member".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn blank_role_name_is_rejected() {
        let svc = service();
        let err = svc.create_role("   ").await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn duplicate_role_name_conflicts() {
        let svc = service();
        svc.create_role("Member").await.unwrap();
        let err = svc.create_role("Member").await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn list_all_has_one_entry_per_user_with_roles() {
        let svc = service();
        let a = svc.register(alice()).await.unwrap();
        let b = svc
            .register(RegisterInput {
                username: "bob".into(),
                email: "b@x.com".into(),
                password: "Hunter2!".into(),
                first_name: "Bob".into(),
                last_name: "B".into(),
            })
            .await
            .unwrap();

        svc.create_role("Member").await.unwrap();
        svc.create_role("Admin").await.unwrap();
        svc.add_roles(&a.id, &["Member".to_string()]).await.unwrap();
        svc.add_roles(&b.id, &["Admin".to_string(), "Member".to_string()])
            .await
            .unwrap();

        let all = svc.list_all().await.unwrap();
        assert_eq!(all.len(), 2);

        let roles_of = |name: &str| {
            all.iter()
                .find(|(u, _)| u.username == name)
                .map(|(_, r)| r.clone())
                .unwrap()
        };
        assert_eq!(roles_of("alice"), vec!["Member"]);
        assert_eq!(roles_of("bob"), vec!["Admin", "Member"]);
    }
}
