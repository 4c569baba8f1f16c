//! Group repository implementation

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;
use crate::models::group::{Group, InviteRotation, NewGroup};
use crate::utils::errors::StoreResult;

const GROUP_COLUMNS: &str =
    "id, name, join_code, invite_token, invite_token_expires_at, created_by, created_at";

#[derive(Clone)]
#[derive(Debug)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a group on any executor, so it can join a transaction
    pub async fn insert_with<'e, E>(executor: E, group: &NewGroup) -> StoreResult<Group>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, Group>(
            r#"
            INSERT INTO game_groups (id, name, join_code, invite_token, invite_token_expires_at, created_by, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, join_code, invite_token, invite_token_expires_at, created_by, created_at
            "#
        )
        .bind(group.id)
        .bind(&group.name)
        .bind(&group.join_code)
        .bind(&group.invite_token)
        .bind(group.invite_token_expires_at)
        .bind(group.created_by)
        .bind(group.created_at)
        .fetch_one(executor)
        .await
        .map_err(super::classify)
    }

    /// Create a new group
    pub async fn create(&self, group: &NewGroup) -> StoreResult<Group> {
        Self::insert_with(&self.pool, group).await
    }

    /// Delete group; memberships cascade
    pub async fn delete(&self, id: Uuid) -> StoreResult<()> {
        sqlx::query("DELETE FROM game_groups WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Find group by ID
    pub async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Group>> {
        let query = format!("SELECT {} FROM game_groups WHERE id = $1", GROUP_COLUMNS);
        let group = sqlx::query_as::<_, Group>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(group)
    }

    /// Find group by join code
    pub async fn find_by_join_code(&self, join_code: &str) -> StoreResult<Option<Group>> {
        let query = format!("SELECT {} FROM game_groups WHERE join_code = $1", GROUP_COLUMNS);
        let group = sqlx::query_as::<_, Group>(&query)
            .bind(join_code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(group)
    }

    /// Find group by its current invite pair
    pub async fn find_by_credentials(&self, join_code: &str, invite_token: &str) -> StoreResult<Option<Group>> {
        let query = format!(
            "SELECT {} FROM game_groups WHERE join_code = $1 AND invite_token = $2",
            GROUP_COLUMNS
        );
        let group = sqlx::query_as::<_, Group>(&query)
            .bind(join_code)
            .bind(invite_token)
            .fetch_optional(&self.pool)
            .await?;

        Ok(group)
    }

    /// Replace the invite token and expiry
    pub async fn rotate_invite(&self, id: Uuid, rotation: &InviteRotation) -> StoreResult<Option<Group>> {
        let query = format!(
            r#"
            UPDATE game_groups
            SET invite_token = $2,
                invite_token_expires_at = $3
            WHERE id = $1
            RETURNING {}
            "#,
            GROUP_COLUMNS
        );

        let group = sqlx::query_as::<_, Group>(&query)
            .bind(id)
            .bind(&rotation.invite_token)
            .bind(rotation.invite_token_expires_at)
            .fetch_optional(&self.pool)
            .await?;

        Ok(group)
    }
}
