//! Test data helpers
//!
//! Users, settings and store doubles shared by the integration tests.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use MeepleLog::config::InvitesConfig;
use MeepleLog::database::{GroupStore, MemoryStore};
use MeepleLog::models::{
    CreateUserRequest, Group, InviteRotation, Membership, NewGroup, NewMembership,
};
use MeepleLog::services::{AuthContext, InviteService};
use MeepleLog::utils::errors::{StoreError, StoreResult};

/// Register a user in the memory store and return their auth context
pub async fn register_user(store: &MemoryStore, username: &str) -> AuthContext {
    let user = store
        .create_user(CreateUserRequest {
            id: Uuid::new_v4(),
            username: Some(username.to_string()),
            full_name: None,
        })
        .await;
    AuthContext::authenticated(user.id)
}

/// Memory store plus an invite service over it
pub fn memory_service(config: InvitesConfig) -> (Arc<MemoryStore>, InviteService) {
    let store = Arc::new(MemoryStore::new());
    let service = InviteService::new(store.clone(), config);
    (store, service)
}

/// Delegates every call to a [`MemoryStore`]; only overrides what a test needs.
/// It does not override `create_group_with_admin`, so issuing runs the
/// trait's compensating default.
pub struct FaultyStore {
    pub inner: Arc<MemoryStore>,
    /// Every membership insert fails
    pub fail_membership_insert: AtomicBool,
    /// Number of group inserts still to be rejected as join-code collisions
    pub join_code_collisions: AtomicU32,
    /// Next membership lookup pretends there is no row
    pub hide_membership_once: AtomicBool,
}

impl FaultyStore {
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            fail_membership_insert: AtomicBool::new(false),
            join_code_collisions: AtomicU32::new(0),
            hide_membership_once: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl GroupStore for FaultyStore {
    async fn user_exists(&self, user_id: Uuid) -> StoreResult<bool> {
        self.inner.user_exists(user_id).await
    }

    async fn insert_group(&self, group: &NewGroup) -> StoreResult<Group> {
        let remaining = self.join_code_collisions.load(Ordering::SeqCst);
        if remaining > 0 {
            self.join_code_collisions.store(remaining - 1, Ordering::SeqCst);
            return Err(StoreError::DuplicateJoinCode);
        }
        self.inner.insert_group(group).await
    }

    async fn delete_group(&self, group_id: Uuid) -> StoreResult<()> {
        self.inner.delete_group(group_id).await
    }

    async fn find_group(&self, group_id: Uuid) -> StoreResult<Option<Group>> {
        self.inner.find_group(group_id).await
    }

    async fn find_group_by_join_code(&self, join_code: &str) -> StoreResult<Option<Group>> {
        self.inner.find_group_by_join_code(join_code).await
    }

    async fn find_group_by_credentials(
        &self,
        join_code: &str,
        invite_token: &str,
    ) -> StoreResult<Option<Group>> {
        self.inner.find_group_by_credentials(join_code, invite_token).await
    }

    async fn rotate_invite(
        &self,
        group_id: Uuid,
        rotation: &InviteRotation,
    ) -> StoreResult<Option<Group>> {
        self.inner.rotate_invite(group_id, rotation).await
    }

    async fn find_membership(&self, group_id: Uuid, user_id: Uuid) -> StoreResult<Option<Membership>> {
        if self.hide_membership_once.swap(false, Ordering::SeqCst) {
            return Ok(None);
        }
        self.inner.find_membership(group_id, user_id).await
    }

    async fn insert_membership(&self, membership: &NewMembership) -> StoreResult<Membership> {
        if self.fail_membership_insert.load(Ordering::SeqCst) {
            return Err(StoreError::Corrupt("injected membership failure".to_string()));
        }
        self.inner.insert_membership(membership).await
    }

    async fn list_memberships(&self, group_id: Uuid) -> StoreResult<Vec<Membership>> {
        self.inner.list_memberships(group_id).await
    }
}
