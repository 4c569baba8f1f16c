//! Group membership repository implementation

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;
use crate::models::membership::{Membership, MembershipRow, NewMembership};
use crate::utils::errors::StoreResult;

#[derive(Clone)]
#[derive(Debug)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a membership on any executor. The `(group_id, user_id)` primary
    /// key turns a racing duplicate into `StoreError::DuplicateMembership`.
    pub async fn insert_with<'e, E>(executor: E, membership: &NewMembership) -> StoreResult<Membership>
    where
        E: PgExecutor<'e>,
    {
        let row = sqlx::query_as::<_, MembershipRow>(
            r#"
            INSERT INTO group_members (group_id, user_id, role, joined_at)
            VALUES ($1, $2, $3, $4)
            RETURNING group_id, user_id, role, joined_at
            "#
        )
        .bind(membership.group_id)
        .bind(membership.user_id)
        .bind(membership.role.as_str())
        .bind(membership.joined_at)
        .fetch_one(executor)
        .await
        .map_err(super::classify)?;

        Membership::try_from(row)
    }

    /// Add member to group
    pub async fn add_member(&self, membership: &NewMembership) -> StoreResult<Membership> {
        Self::insert_with(&self.pool, membership).await
    }

    /// Find a single membership
    pub async fn find(&self, group_id: Uuid, user_id: Uuid) -> StoreResult<Option<Membership>> {
        let row = sqlx::query_as::<_, MembershipRow>(
            "SELECT group_id, user_id, role, joined_at FROM group_members WHERE group_id = $1 AND user_id = $2"
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Membership::try_from).transpose()
    }

    /// Get group members
    pub async fn get_members(&self, group_id: Uuid) -> StoreResult<Vec<Membership>> {
        let rows = sqlx::query_as::<_, MembershipRow>(
            "SELECT group_id, user_id, role, joined_at FROM group_members WHERE group_id = $1 ORDER BY joined_at ASC"
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Membership::try_from).collect()
    }
}
