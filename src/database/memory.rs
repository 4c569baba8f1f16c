//! In-process store
//!
//! Keeps every table in one lock so the uniqueness rules hold under
//! concurrent requests exactly as the database constraints do.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::store::GroupStore;
use crate::models::{
    CreateUserRequest, Group, InviteRotation, MemberRole, Membership, NewGroup, NewMembership, User,
};
use crate::utils::errors::{StoreError, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    groups: HashMap<Uuid, Group>,
    memberships: HashMap<(Uuid, Uuid), Membership>,
}

impl Tables {
    fn insert_group(&mut self, group: &NewGroup) -> StoreResult<Group> {
        if !self.users.contains_key(&group.created_by) {
            return Err(StoreError::NotFound);
        }
        if self.groups.contains_key(&group.id) {
            return Err(StoreError::DuplicateGroup);
        }
        if self.groups.values().any(|existing| existing.join_code == group.join_code) {
            return Err(StoreError::DuplicateJoinCode);
        }

        let created = group.clone().into_group();
        self.groups.insert(created.id, created.clone());
        Ok(created)
    }

    fn insert_membership(&mut self, membership: &NewMembership) -> StoreResult<Membership> {
        if !self.groups.contains_key(&membership.group_id)
            || !self.users.contains_key(&membership.user_id)
        {
            return Err(StoreError::NotFound);
        }

        let key = (membership.group_id, membership.user_id);
        if self.memberships.contains_key(&key) {
            return Err(StoreError::DuplicateMembership);
        }

        let created = membership.clone().into_membership();
        self.memberships.insert(key, created.clone());
        Ok(created)
    }
}

/// [`GroupStore`] backed by in-memory tables
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a user profile, as the identity provider would on first sign-in
    pub async fn create_user(&self, request: CreateUserRequest) -> User {
        let user = User {
            id: request.id,
            username: request.username,
            full_name: request.full_name,
            created_at: Utc::now(),
        };

        let mut tables = self.tables.write().await;
        tables.users.entry(user.id).or_insert(user).clone()
    }

    pub async fn group_count(&self) -> usize {
        self.tables.read().await.groups.len()
    }

    pub async fn membership_count(&self) -> usize {
        self.tables.read().await.memberships.len()
    }
}

#[async_trait]
impl GroupStore for MemoryStore {
    async fn user_exists(&self, user_id: Uuid) -> StoreResult<bool> {
        Ok(self.tables.read().await.users.contains_key(&user_id))
    }

    async fn insert_group(&self, group: &NewGroup) -> StoreResult<Group> {
        self.tables.write().await.insert_group(group)
    }

    async fn delete_group(&self, group_id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        tables.groups.remove(&group_id);
        tables.memberships.retain(|(member_group, _), _| *member_group != group_id);
        Ok(())
    }

    async fn find_group(&self, group_id: Uuid) -> StoreResult<Option<Group>> {
        Ok(self.tables.read().await.groups.get(&group_id).cloned())
    }

    async fn find_group_by_join_code(&self, join_code: &str) -> StoreResult<Option<Group>> {
        let tables = self.tables.read().await;
        Ok(tables
            .groups
            .values()
            .find(|group| group.join_code == join_code)
            .cloned())
    }

    async fn find_group_by_credentials(
        &self,
        join_code: &str,
        invite_token: &str,
    ) -> StoreResult<Option<Group>> {
        let tables = self.tables.read().await;
        Ok(tables
            .groups
            .values()
            .find(|group| group.has_credentials(join_code, invite_token))
            .cloned())
    }

    async fn rotate_invite(
        &self,
        group_id: Uuid,
        rotation: &InviteRotation,
    ) -> StoreResult<Option<Group>> {
        let mut tables = self.tables.write().await;
        Ok(tables.groups.get_mut(&group_id).map(|group| {
            group.invite_token = rotation.invite_token.clone();
            group.invite_token_expires_at = rotation.invite_token_expires_at;
            group.clone()
        }))
    }

    async fn find_membership(&self, group_id: Uuid, user_id: Uuid) -> StoreResult<Option<Membership>> {
        let tables = self.tables.read().await;
        Ok(tables.memberships.get(&(group_id, user_id)).cloned())
    }

    async fn insert_membership(&self, membership: &NewMembership) -> StoreResult<Membership> {
        self.tables.write().await.insert_membership(membership)
    }

    async fn list_memberships(&self, group_id: Uuid) -> StoreResult<Vec<Membership>> {
        let tables = self.tables.read().await;
        let mut members: Vec<Membership> = tables
            .memberships
            .values()
            .filter(|membership| membership.group_id == group_id)
            .cloned()
            .collect();
        members.sort_by_key(|membership| membership.joined_at);
        Ok(members)
    }

    async fn create_group_with_admin(&self, group: &NewGroup) -> StoreResult<(Group, Membership)> {
        let mut tables = self.tables.write().await;
        let created = tables.insert_group(group)?;

        let admin = NewMembership {
            group_id: created.id,
            user_id: created.created_by,
            role: MemberRole::Admin,
            joined_at: created.created_at,
        };

        match tables.insert_membership(&admin) {
            Ok(membership) => Ok((created, membership)),
            Err(e) => {
                tables.groups.remove(&created.id);
                Err(e)
            }
        }
    }
}
