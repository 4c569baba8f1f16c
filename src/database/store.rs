//! The store trait the invite services depend on.

use async_trait::async_trait;
use tracing::{error, warn};
use uuid::Uuid;

use crate::models::{Group, InviteRotation, MemberRole, Membership, NewGroup, NewMembership};
use crate::utils::errors::StoreResult;

/// Relational store holding groups, memberships and user profiles.
///
/// Implementations must reject a second membership for the same
/// `(group_id, user_id)` with [`StoreError::DuplicateMembership`] and a second
/// group with an existing join code with [`StoreError::DuplicateJoinCode`].
///
/// [`StoreError::DuplicateMembership`]: crate::utils::errors::StoreError::DuplicateMembership
/// [`StoreError::DuplicateJoinCode`]: crate::utils::errors::StoreError::DuplicateJoinCode
#[async_trait]
pub trait GroupStore: Send + Sync {
    // ───────────────────────────────────── Users ──────────────────────────────────────────

    /// Whether a profile row exists for this user.
    async fn user_exists(&self, user_id: Uuid) -> StoreResult<bool>;

    // ───────────────────────────────────── Groups ─────────────────────────────────────────

    async fn insert_group(&self, group: &NewGroup) -> StoreResult<Group>;

    async fn delete_group(&self, group_id: Uuid) -> StoreResult<()>;

    async fn find_group(&self, group_id: Uuid) -> StoreResult<Option<Group>>;

    /// Lookup by an already-normalized join code.
    async fn find_group_by_join_code(&self, join_code: &str) -> StoreResult<Option<Group>>;

    /// Lookup by the group's current, exact `(join_code, invite_token)` pair.
    async fn find_group_by_credentials(
        &self,
        join_code: &str,
        invite_token: &str,
    ) -> StoreResult<Option<Group>>;

    /// Overwrite the invite pair unconditionally. `None` when the group is gone.
    async fn rotate_invite(
        &self,
        group_id: Uuid,
        rotation: &InviteRotation,
    ) -> StoreResult<Option<Group>>;

    // ───────────────────────────────────── Memberships ────────────────────────────────────

    async fn find_membership(&self, group_id: Uuid, user_id: Uuid) -> StoreResult<Option<Membership>>;

    async fn insert_membership(&self, membership: &NewMembership) -> StoreResult<Membership>;

    async fn list_memberships(&self, group_id: Uuid) -> StoreResult<Vec<Membership>>;

    // ───────────────────────────────────── Composite ──────────────────────────────────────

    /// Create a group together with its creator's admin membership.
    ///
    /// The default implementation compensates by deleting the group when the
    /// membership insert fails. Stores with transactions should override it.
    async fn create_group_with_admin(&self, group: &NewGroup) -> StoreResult<(Group, Membership)> {
        let created = self.insert_group(group).await?;

        let admin = NewMembership {
            group_id: created.id,
            user_id: created.created_by,
            role: MemberRole::Admin,
            joined_at: created.created_at,
        };

        match self.insert_membership(&admin).await {
            Ok(membership) => Ok((created, membership)),
            Err(insert_error) => {
                warn!(group_id = %created.id, error = %insert_error, "Admin membership insert failed, removing group");
                if let Err(cleanup_error) = self.delete_group(created.id).await {
                    error!(group_id = %created.id, error = %cleanup_error, "Failed to remove orphaned group");
                }
                Err(insert_error)
            }
        }
    }

    /// Cheap connectivity probe.
    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}
