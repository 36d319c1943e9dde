use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};

use crate::domain::{DomainError, DomainResult, Role, RoleRepositoryInterface};
use crate::infrastructure::database::entities::{role, user_role};

pub struct RoleRepository {
    db: DatabaseConnection,
}

impl RoleRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn role_model_to_domain(model: role::Model) -> Role {
    Role {
        id: model.id,
        name: model.name,
        created_at: model.created_at,
    }
}

fn db_err(e: DbErr) -> DomainError {
    DomainError::Store(e.to_string())
}

fn is_unique_violation(e: &DbErr) -> bool {
    let msg = e.to_string();
    msg.contains("UNIQUE") || msg.contains("duplicate")
}

#[async_trait]
impl RoleRepositoryInterface for RoleRepository {
    async fn create_role(&self, name: &str) -> DomainResult<Role> {
        let new_role = role::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            name: Set(name.to_string()),
            created_at: Set(Utc::now()),
        };

        let inserted = new_role.insert(&self.db).await.map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::Conflict(format!("Role '{}' already exists", name))
            } else {
                db_err(e)
            }
        })?;

        Ok(role_model_to_domain(inserted))
    }

    async fn find_roles_by_names(&self, names: &[String]) -> DomainResult<Vec<Role>> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let models = role::Entity::find()
            .filter(role::Column::Name.is_in(names.iter().cloned()))
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(role_model_to_domain).collect())
    }

    async fn roles_for_user(&self, user_id: &str) -> DomainResult<Vec<String>> {
        let models = role::Entity::find()
            .join(JoinType::InnerJoin, role::Relation::UserRoles.def())
            .filter(user_role::Column::UserId.eq(user_id))
            .order_by_asc(role::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(|m| m.name).collect())
    }

    async fn assign_roles(&self, user_id: &str, role_ids: &[String]) -> DomainResult<()> {
        if role_ids.is_empty() {
            return Ok(());
        }

        let models = role_ids.iter().map(|rid| user_role::ActiveModel {
            user_id: Set(user_id.to_string()),
            role_id: Set(rid.clone()),
        });

        // Re-assigning an already-held role is a no-op.
        let result = user_role::Entity::insert_many(models)
            .on_conflict(
                OnConflict::columns([user_role::Column::UserId, user_role::Column::RoleId])
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.db)
            .await;

        match result {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(db_err(e)),
        }
    }

    async fn remove_roles(&self, user_id: &str, role_ids: &[String]) -> DomainResult<()> {
        if role_ids.is_empty() {
            return Ok(());
        }

        user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .filter(user_role::Column::RoleId.is_in(role_ids.iter().cloned()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(())
    }
}
