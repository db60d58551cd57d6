use super::entities::users;
use super::{db_error, write_error};
use crate::auth::generate_token;
use async_trait::async_trait;
use domain::DomainError;
use domain::staff::{User, UserRepository};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use sqlx::PgPool;

/// Login identities through sea-orm; API tokens through sqlx on the same pool
pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    username: String,
    password_hash: String,
    is_captain: bool,
    is_manager: bool,
    is_supervisor: bool,
    is_no_role: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
            is_captain: row.is_captain,
            is_manager: row.is_manager,
            is_supervisor: row.is_supervisor,
            is_no_role: row.is_no_role,
        }
    }
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn pool(&self) -> &PgPool {
        self.db.get_postgres_connection_pool()
    }

    fn model_to_user(model: users::Model) -> User {
        User {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            is_captain: model.is_captain,
            is_manager: model.is_manager,
            is_supervisor: model.is_supervisor,
            is_no_role: model.is_no_role,
        }
    }

    /// Insert a login identity with an already-hashed password
    pub async fn create(&self, user: &User) -> Result<User, DomainError> {
        let model = users::ActiveModel {
            username: Set(user.username.clone()),
            password_hash: Set(user.password_hash.clone()),
            is_captain: Set(user.is_captain),
            is_manager: Set(user.is_manager),
            is_supervisor: Set(user.is_supervisor),
            is_no_role: Set(user.is_no_role),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(|e| {
            write_error(e, || "A user with that username already exists.".to_string())
        })?;
        Ok(Self::model_to_user(model))
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Self::model_to_user))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Self::model_to_user))
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT u.id, u.username, u.password_hash,
                   u.is_captain, u.is_manager, u.is_supervisor, u.is_no_role
            FROM users u
            JOIN auth_tokens t ON t.user_id = u.id
            WHERE t.key = $1
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| DomainError::repository(format!("Database error: {}", e)))?;

        Ok(row.map(User::from))
    }

    async fn get_or_create_token(&self, user_id: i32) -> Result<String, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO auth_tokens (key, user_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(generate_token())
        .bind(user_id)
        .execute(self.pool())
        .await
        .map_err(|e| DomainError::repository(format!("Database error: {}", e)))?;

        let key: String = sqlx::query_scalar("SELECT key FROM auth_tokens WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(self.pool())
            .await
            .map_err(|e| DomainError::repository(format!("Database error: {}", e)))?;

        Ok(key)
    }
}
