use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{
    CreateUserDto, DomainError, DomainResult, User, UserQuery, UserRepositoryInterface,
};
use crate::infrastructure::database::entities::user;

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        security_stamp: model.security_stamp,
        first_name: model.first_name,
        last_name: model.last_name,
        date_of_birth: model.date_of_birth,
        gender: model.gender,
        color_theme: model.color_theme,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Store(e.to_string())
}

fn is_unique_violation(e: &sea_orm::DbErr) -> bool {
    let msg = e.to_string();
    msg.contains("UNIQUE") || msg.contains("duplicate")
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for UserRepository {
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User> {
        let now = Utc::now();
        let id = uuid::Uuid::new_v4().to_string();

        let new_user = user::ActiveModel {
            id: Set(id),
            username: Set(dto.username),
            email: Set(dto.email),
            password_hash: Set(dto.password_hash),
            security_stamp: Set(dto.security_stamp),
            first_name: Set(dto.first_name),
            last_name: Set(dto.last_name),
            date_of_birth: Set(dto.date_of_birth),
            gender: Set(dto.gender),
            color_theme: Set(dto.color_theme),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = new_user.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict("Username or email already exists".to_string())
            } else {
                db_err(e)
            }
        })?;

        Ok(user_model_to_domain(inserted))
    }

    async fn get_user_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn get_user_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn list_users(&self, query: UserQuery) -> DomainResult<Vec<User>> {
        let mut select = user::Entity::find();

        if let Some(ref search) = query.search {
            select = select.filter(
                user::Column::Username
                    .contains(search)
                    .or(user::Column::Email.contains(search)),
            );
        }

        match query.sort_by.as_deref() {
            Some("username") => {
                select = select.order_by_asc(user::Column::Username);
            }
            Some("email") => {
                select = select.order_by_asc(user::Column::Email);
            }
            _ => {
                select = select.order_by_desc(user::Column::CreatedAt);
            }
        }

        let models = select.all(&self.db).await.map_err(db_err)?;
        Ok(models.into_iter().map(user_model_to_domain).collect())
    }

    async fn delete_user(&self, id: &str) -> DomainResult<()> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: id.to_string(),
            });
        }

        Ok(())
    }
}
