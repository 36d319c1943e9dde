//! In-memory repository implementations for service-level tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, Role, RoleRepositoryInterface, User, UserQuery,
    UserRepositoryInterface,
};

#[derive(Default)]
pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepositoryInterface for InMemoryUsers {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.username == dto.username || u.email == dto.email)
        {
            return Err(DomainError::Conflict(
                "Username or email already exists".into(),
            ));
        }

        let now = Utc::now();
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            username: dto.username,
            email: dto.email,
            password_hash: dto.password_hash,
            security_stamp: dto.security_stamp,
            first_name: dto.first_name,
            last_name: dto.last_name,
            date_of_birth: dto.date_of_birth,
            gender: dto.gender,
            color_theme: dto.color_theme,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn list_users(&self, _query: UserQuery) -> DomainResult<Vec<User>> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn delete_user(&self, id: &str) -> DomainResult<()> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        if users.len() == before {
            return Err(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRoles {
    roles: Mutex<Vec<Role>>,
    assignments: Mutex<HashSet<(String, String)>>,
}

#[async_trait]
impl RoleRepositoryInterface for InMemoryRoles {
    async fn create_role(&self, name: &str) -> DomainResult<Role> {
        let mut roles = self.roles.lock().unwrap();
        if roles.iter().any(|r| r.name == name) {
            return Err(DomainError::Conflict(format!(
                "Role '{}' already exists",
                name
            )));
        }
        let role = Role {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        roles.push(role.clone());
        Ok(role)
    }

    async fn find_roles_by_names(&self, names: &[String]) -> DomainResult<Vec<Role>> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .filter(|r| names.contains(&r.name))
            .cloned()
            .collect())
    }

    async fn roles_for_user(&self, user_id: &str) -> DomainResult<Vec<String>> {
        let roles = self.roles.lock().unwrap();
        let assignments = self.assignments.lock().unwrap();
        let mut names: Vec<String> = assignments
            .iter()
            .filter(|(uid, _)| uid == user_id)
            .filter_map(|(_, rid)| roles.iter().find(|r| &r.id == rid))
            .map(|r| r.name.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    async fn assign_roles(&self, user_id: &str, role_ids: &[String]) -> DomainResult<()> {
        let mut assignments = self.assignments.lock().unwrap();
        for rid in role_ids {
            assignments.insert((user_id.to_string(), rid.clone()));
        }
        Ok(())
    }

    async fn remove_roles(&self, user_id: &str, role_ids: &[String]) -> DomainResult<()> {
        let mut assignments = self.assignments.lock().unwrap();
        assignments.retain(|(uid, rid)| uid != user_id || !role_ids.contains(rid));
        Ok(())
    }
}
