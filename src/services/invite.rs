//! Invite service
//!
//! Entry points for the presentation layer. Every call carries the caller's
//! [`AuthContext`]; results and errors are plain values for the caller to render.

use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::config::InvitesConfig;
use crate::database::GroupStore;
use crate::models::{Group, InviteLink, JoinOutcome, Membership, VerifiedGroup};
use crate::services::auth::{AuthContext, AuthService};
use crate::services::issuer::InviteIssuer;
use crate::services::joiner::MembershipJoiner;
use crate::services::verifier::InviteVerifier;
use crate::utils::errors::{Result, TrackerError};
use crate::utils::logging::log_service_error;

#[derive(Clone)]
pub struct InviteService {
    auth: AuthService,
    issuer: InviteIssuer,
    verifier: InviteVerifier,
    joiner: MembershipJoiner,
    store: Arc<dyn GroupStore>,
    base_url: String,
}

impl InviteService {
    pub fn new(store: Arc<dyn GroupStore>, config: InvitesConfig) -> Self {
        let verifier = InviteVerifier::new(store.clone());

        Self {
            auth: AuthService::new(store.clone()),
            issuer: InviteIssuer::new(store.clone(), config.clone()),
            joiner: MembershipJoiner::new(store.clone(), verifier.clone(), config.clone()),
            verifier,
            store,
            base_url: config.base_url,
        }
    }

    pub fn issuer(&self) -> &InviteIssuer {
        &self.issuer
    }

    pub fn verifier(&self) -> &InviteVerifier {
        &self.verifier
    }

    pub fn joiner(&self) -> &MembershipJoiner {
        &self.joiner
    }

    /// Create a group owned by the caller
    pub async fn create_group(&self, auth: &AuthContext, group_name: &str) -> Result<Group> {
        let result: Result<Group> = async {
            let user_id = self.auth.require_registered_user(auth).await?;
            self.issuer.issue(group_name, user_id).await
        }
        .await;
        observe("create_group", result)
    }

    /// Rotate the invite token of a group the caller belongs to
    pub async fn regenerate_invite(&self, auth: &AuthContext, group_id: Uuid) -> Result<Group> {
        let result: Result<Group> = async {
            let user_id = auth.require_user()?;
            self.issuer.regenerate(group_id, user_id).await
        }
        .await;
        observe("regenerate_invite", result)
    }

    /// Check an invite without joining
    pub async fn verify_invite(
        &self,
        auth: &AuthContext,
        join_code: &str,
        invite_token: &str,
    ) -> Result<VerifiedGroup> {
        let result: Result<VerifiedGroup> = async {
            auth.require_user()?;
            self.verifier.verify(join_code, invite_token).await
        }
        .await;
        observe("verify_invite", result)
    }

    /// Canonical join path: verified code and token
    pub async fn join_with_invite(
        &self,
        auth: &AuthContext,
        join_code: &str,
        invite_token: &str,
    ) -> Result<JoinOutcome> {
        let result: Result<JoinOutcome> = async {
            let user_id = self.auth.require_registered_user(auth).await?;
            self.joiner.join_with_invite(join_code, invite_token, user_id).await
        }
        .await;
        observe("join_with_invite", result)
    }

    /// Join through a shared invite link
    pub async fn join_with_link(&self, auth: &AuthContext, link: &str) -> Result<JoinOutcome> {
        let result: Result<JoinOutcome> = async {
            let user_id = self.auth.require_registered_user(auth).await?;
            let credentials = InviteLink::parse(link)?.credentials()?;
            debug!(user_id = %user_id, join_code = %credentials.join_code, "Joining through invite link");
            self.joiner
                .join_with_credentials_at(&credentials, user_id, chrono::Utc::now())
                .await
        }
        .await;
        observe("join_with_link", result)
    }

    /// Legacy code-only join
    pub async fn join_by_code(&self, auth: &AuthContext, join_code: &str) -> Result<JoinOutcome> {
        let result: Result<JoinOutcome> = async {
            let user_id = self.auth.require_registered_user(auth).await?;
            self.joiner.join_by_code(join_code, user_id).await
        }
        .await;
        observe("join_by_code", result)
    }

    /// Shareable link carrying the group's current invite pair
    pub async fn invite_link(&self, auth: &AuthContext, group_id: Uuid) -> Result<InviteLink> {
        let result: Result<InviteLink> = async {
            let user_id = auth.require_user()?;
            self.auth.require_membership(group_id, user_id).await?;

            let group = self
                .store
                .find_group(group_id)
                .await?
                .ok_or(TrackerError::GroupNotFound { group_id })?;

            InviteLink::for_group(&self.base_url, &group)
        }
        .await;
        observe("invite_link", result)
    }

    /// Members of a group the caller belongs to, oldest first
    pub async fn group_members(&self, auth: &AuthContext, group_id: Uuid) -> Result<Vec<Membership>> {
        let result: Result<Vec<Membership>> = async {
            let user_id = auth.require_user()?;
            self.auth.require_membership(group_id, user_id).await?;
            Ok(self.store.list_memberships(group_id).await?)
        }
        .await;
        observe("group_members", result)
    }
}

fn observe<T>(operation: &str, result: Result<T>) -> Result<T> {
    if let Err(e) = &result {
        log_service_error(operation, e);
    }
    result
}
