//! Database service layer
//!
//! PostgreSQL implementation of [`GroupStore`] built from the repositories.

use std::time::Instant;

use async_trait::async_trait;
use uuid::Uuid;

use crate::database::{DatabasePool, GroupRepository, GroupStore, MemberRepository, UserRepository};
use crate::models::*;
use crate::utils::errors::StoreResult;
use crate::utils::logging::log_store_operation;

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pool: DatabasePool,
    pub users: UserRepository,
    pub groups: GroupRepository,
    pub members: MemberRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            groups: GroupRepository::new(pool.clone()),
            members: MemberRepository::new(pool.clone()),
            pool,
        }
    }

    async fn create_group_in_transaction(&self, group: &NewGroup) -> StoreResult<(Group, Membership)> {
        let mut tx = self.pool.begin().await?;

        let created = GroupRepository::insert_with(&mut *tx, group).await?;
        let admin = NewMembership {
            group_id: created.id,
            user_id: created.created_by,
            role: MemberRole::Admin,
            joined_at: created.created_at,
        };
        let membership = MemberRepository::insert_with(&mut *tx, &admin).await?;

        tx.commit().await?;
        Ok((created, membership))
    }
}

#[async_trait]
impl GroupStore for DatabaseService {
    async fn user_exists(&self, user_id: Uuid) -> StoreResult<bool> {
        self.users.exists(user_id).await
    }

    async fn insert_group(&self, group: &NewGroup) -> StoreResult<Group> {
        self.groups.create(group).await
    }

    async fn delete_group(&self, group_id: Uuid) -> StoreResult<()> {
        self.groups.delete(group_id).await
    }

    async fn find_group(&self, group_id: Uuid) -> StoreResult<Option<Group>> {
        self.groups.find_by_id(group_id).await
    }

    async fn find_group_by_join_code(&self, join_code: &str) -> StoreResult<Option<Group>> {
        self.groups.find_by_join_code(join_code).await
    }

    async fn find_group_by_credentials(
        &self,
        join_code: &str,
        invite_token: &str,
    ) -> StoreResult<Option<Group>> {
        self.groups.find_by_credentials(join_code, invite_token).await
    }

    async fn rotate_invite(
        &self,
        group_id: Uuid,
        rotation: &InviteRotation,
    ) -> StoreResult<Option<Group>> {
        self.groups.rotate_invite(group_id, rotation).await
    }

    async fn find_membership(&self, group_id: Uuid, user_id: Uuid) -> StoreResult<Option<Membership>> {
        self.members.find(group_id, user_id).await
    }

    async fn insert_membership(&self, membership: &NewMembership) -> StoreResult<Membership> {
        self.members.add_member(membership).await
    }

    async fn list_memberships(&self, group_id: Uuid) -> StoreResult<Vec<Membership>> {
        self.members.get_members(group_id).await
    }

    /// Both rows are written in one transaction; a failed membership insert
    /// rolls the group back when `tx` is dropped.
    async fn create_group_with_admin(&self, group: &NewGroup) -> StoreResult<(Group, Membership)> {
        let started = Instant::now();
        let result = self.create_group_in_transaction(group).await;
        log_store_operation(
            "create_group_with_admin",
            "game_groups",
            started.elapsed().as_millis() as u64,
            result.is_ok(),
        );
        result
    }

    async fn health_check(&self) -> StoreResult<()> {
        crate::database::connection::health_check(&self.pool).await
    }
}
