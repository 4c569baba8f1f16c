//! User repository implementation

use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;
use crate::models::user::{User, CreateUserRequest};
use crate::utils::errors::StoreResult;

#[derive(Clone)]
#[derive(Debug)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Mirror a profile from the identity provider; existing rows are left untouched
    pub async fn create(&self, request: CreateUserRequest) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, full_name, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET id = EXCLUDED.id
            RETURNING id, username, full_name, created_at
            "#
        )
        .bind(request.id)
        .bind(request.username)
        .bind(request.full_name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(super::classify)?;

        Ok(user)
    }

    /// Check whether a profile row exists
    pub async fn exists(&self, id: Uuid) -> StoreResult<bool> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists.0)
    }
}
