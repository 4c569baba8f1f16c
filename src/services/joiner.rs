//! Membership joiner
//!
//! Admits users into groups. Admission is idempotent: a user who already
//! belongs to the group gets `JoinOutcome::AlreadyMember`, never an error.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::InvitesConfig;
use crate::database::GroupStore;
use crate::models::{InviteCredentials, JoinOutcome, MemberRole, NewMembership};
use crate::services::verifier::InviteVerifier;
use crate::utils::errors::{Result, StoreError, TrackerError};
use crate::utils::helpers::normalize_join_code;
use crate::utils::logging::log_group_event;

#[derive(Clone)]
pub struct MembershipJoiner {
    store: Arc<dyn GroupStore>,
    verifier: InviteVerifier,
    config: InvitesConfig,
}

impl MembershipJoiner {
    pub fn new(store: Arc<dyn GroupStore>, verifier: InviteVerifier, config: InvitesConfig) -> Self {
        Self { store, verifier, config }
    }

    pub async fn join(&self, group_id: Uuid, user_id: Uuid) -> Result<JoinOutcome> {
        self.join_at(group_id, user_id, Utc::now()).await
    }

    /// Admit `user_id` as a member of `group_id`.
    ///
    /// The existence check only short-cuts the common case; the store's
    /// `(group_id, user_id)` uniqueness decides races.
    pub async fn join_at(&self, group_id: Uuid, user_id: Uuid, now: DateTime<Utc>) -> Result<JoinOutcome> {
        if self.store.find_group(group_id).await?.is_none() {
            return Err(TrackerError::GroupNotFound { group_id });
        }

        if let Some(existing) = self.store.find_membership(group_id, user_id).await? {
            debug!(group_id = %group_id, user_id = %user_id, "User is already a member");
            return Ok(JoinOutcome::AlreadyMember(existing));
        }

        if !self.store.user_exists(user_id).await? {
            warn!(group_id = %group_id, user_id = %user_id, "Join attempted without a user profile");
            return Err(TrackerError::UserNotFound { user_id });
        }

        let membership = NewMembership {
            group_id,
            user_id,
            role: MemberRole::Member,
            joined_at: now,
        };

        match self.store.insert_membership(&membership).await {
            Ok(created) => {
                log_group_event(group_id, "member_joined", Some(user_id), None);
                Ok(JoinOutcome::Joined(created))
            }
            Err(StoreError::DuplicateMembership) => {
                debug!(group_id = %group_id, user_id = %user_id, "Concurrent join won the race");
                let existing = self
                    .store
                    .find_membership(group_id, user_id)
                    .await?
                    .ok_or(TrackerError::MembershipNotFound { group_id, user_id })?;
                Ok(JoinOutcome::AlreadyMember(existing))
            }
            Err(StoreError::NotFound) => {
                // Group or profile deleted between the lookups and the insert
                if self.store.find_group(group_id).await?.is_none() {
                    Err(TrackerError::GroupNotFound { group_id })
                } else {
                    Err(TrackerError::UserNotFound { user_id })
                }
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Verify the presented pair, then admit the user
    pub async fn join_with_invite(
        &self,
        join_code: &str,
        invite_token: &str,
        user_id: Uuid,
    ) -> Result<JoinOutcome> {
        let credentials = InviteCredentials::new(join_code, invite_token)?;
        self.join_with_credentials_at(&credentials, user_id, Utc::now()).await
    }

    pub async fn join_with_credentials_at(
        &self,
        credentials: &InviteCredentials,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<JoinOutcome> {
        let verified = self.verifier.verify_credentials_at(credentials, now).await?;
        let outcome = self.join_at(verified.group_id, user_id, now).await?;
        info!(group_id = %verified.group_id, user_id = %user_id, outcome = outcome.code(), "Invite join completed");
        Ok(outcome)
    }

    /// Legacy admission by join code alone, without token or expiry checks.
    /// Disabled unless `invites.allow_code_only_join` is set.
    pub async fn join_by_code(&self, join_code: &str, user_id: Uuid) -> Result<JoinOutcome> {
        if !self.config.allow_code_only_join {
            warn!(user_id = %user_id, "Rejected code-only join while disabled");
            return Err(TrackerError::PermissionDenied(
                "Joining by code alone is disabled; use an invite link".to_string(),
            ));
        }

        let join_code = normalize_join_code(join_code);
        if join_code.is_empty() {
            return Err(TrackerError::InvalidInput("Join code is required".to_string()));
        }

        let group = self
            .store
            .find_group_by_join_code(&join_code)
            .await?
            .ok_or(TrackerError::InvalidCredential)?;

        self.join(group.id, user_id).await
    }
}
