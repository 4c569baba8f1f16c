//! Invite issuer
//!
//! Creates groups with their first invite pair and rotates invite tokens.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::InvitesConfig;
use crate::database::GroupStore;
use crate::models::{Group, InviteRotation, NewGroup};
use crate::utils::errors::{Result, StoreError, TrackerError};
use crate::utils::helpers::{
    generate_invite_token, generate_join_code, invite_expiry, MAX_GROUP_NAME_LENGTH,
};
use crate::utils::logging::log_group_event;

#[derive(Clone)]
pub struct InviteIssuer {
    store: Arc<dyn GroupStore>,
    config: InvitesConfig,
}

impl InviteIssuer {
    pub fn new(store: Arc<dyn GroupStore>, config: InvitesConfig) -> Self {
        Self { store, config }
    }

    /// Create a group named `group_name` with `creator_id` as its admin
    pub async fn issue(&self, group_name: &str, creator_id: Uuid) -> Result<Group> {
        self.issue_at(group_name, creator_id, Utc::now()).await
    }

    pub async fn issue_at(&self, group_name: &str, creator_id: Uuid, now: DateTime<Utc>) -> Result<Group> {
        let name = validate_group_name(group_name)?;
        let attempts = self.config.join_code_attempts.max(1);

        for attempt in 1..=attempts {
            let new_group = NewGroup {
                id: Uuid::new_v4(),
                name: name.clone(),
                join_code: generate_join_code(),
                invite_token: generate_invite_token(),
                invite_token_expires_at: invite_expiry(now, self.config.ttl_seconds),
                created_by: creator_id,
                created_at: now,
            };

            match self.store.create_group_with_admin(&new_group).await {
                Ok((group, _admin)) => {
                    log_group_event(group.id, "created", Some(creator_id), Some(&group.name));
                    return Ok(group);
                }
                Err(StoreError::DuplicateJoinCode) => {
                    warn!(attempt = attempt, join_code = %new_group.join_code, "Join code collision, drawing a new code");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(attempts = attempts, "Giving up on join code generation");
        Err(StoreError::DuplicateJoinCode.into())
    }

    /// Replace the invite token and expiry of `group_id`
    pub async fn regenerate(&self, group_id: Uuid, requesting_user_id: Uuid) -> Result<Group> {
        self.regenerate_at(group_id, requesting_user_id, Utc::now()).await
    }

    pub async fn regenerate_at(
        &self,
        group_id: Uuid,
        requesting_user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Group> {
        debug!(group_id = %group_id, user_id = %requesting_user_id, "Regenerating invite");

        if self.store.find_group(group_id).await?.is_none() {
            return Err(TrackerError::GroupNotFound { group_id });
        }

        let membership = self
            .store
            .find_membership(group_id, requesting_user_id)
            .await?
            .ok_or(TrackerError::MembershipNotFound { group_id, user_id: requesting_user_id })?;

        if self.config.regenerate_requires_admin && !membership.is_admin() {
            warn!(group_id = %group_id, user_id = %requesting_user_id, "Non-admin tried to rotate invite");
            return Err(TrackerError::PermissionDenied(
                "Only group admins can regenerate invites".to_string(),
            ));
        }

        let rotation = InviteRotation {
            invite_token: generate_invite_token(),
            invite_token_expires_at: invite_expiry(now, self.config.ttl_seconds),
        };

        let group = self
            .store
            .rotate_invite(group_id, &rotation)
            .await?
            .ok_or(TrackerError::GroupNotFound { group_id })?;

        info!(group_id = %group_id, user_id = %requesting_user_id, expires_at = %group.invite_token_expires_at, "Invite regenerated");
        Ok(group)
    }
}

fn validate_group_name(group_name: &str) -> Result<String> {
    let name = group_name.trim();

    if name.is_empty() {
        return Err(TrackerError::InvalidInput("Group name is required".to_string()));
    }

    if name.chars().count() > MAX_GROUP_NAME_LENGTH {
        return Err(TrackerError::InvalidInput(format!(
            "Group name cannot exceed {} characters",
            MAX_GROUP_NAME_LENGTH
        )));
    }

    Ok(name.to_string())
}
