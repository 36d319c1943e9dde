//! User profile DTOs
//!
//! Response shapes for the SPA. Field names are camelCase and the
//! password hash / security stamp never appear here.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::User;

/// User profile without roles (login response payload)
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserProfile {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            user_name: u.username,
            first_name: u.first_name,
            last_name: u.last_name,
        }
    }
}

/// User profile with the current role names attached
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileWithRoles {
    pub id: String,
    pub email: String,
    pub user_name: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: Vec<String>,
}

impl From<(User, Vec<String>)> for UserProfileWithRoles {
    fn from((u, roles): (User, Vec<String>)) -> Self {
        Self {
            id: u.id,
            email: u.email,
            user_name: u.username,
            first_name: u.first_name,
            last_name: u.last_name,
            roles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: "u-1".into(),
            username: "alice".into(),
            email: "a@x.com".into(),
            password_hash: "$2b$12$secret".into(),
            security_stamp: "stamp".into(),
            first_name: "Alice".into(),
            last_name: "A".into(),
            date_of_birth: None,
            gender: None,
            color_theme: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn profile_uses_spa_field_names() {
        let json = serde_json::to_value(UserProfile::from(user())).unwrap();
        assert_eq!(json["userName"], "alice");
        assert_eq!(json["firstName"], "Alice");
    }

    #[test]
    fn profile_never_carries_credentials() {
        let json = serde_json::to_string(&UserProfile::from(user())).unwrap();
        assert!(!json.contains("secret"));
        assert!(!json.contains("stamp"));

        let with_roles =
            serde_json::to_string(&UserProfileWithRoles::from((user(), vec![]))).unwrap();
        assert!(!with_roles.contains("secret"));
        assert!(!with_roles.contains("stamp"));
    }
}
