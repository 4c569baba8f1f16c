//! Invite verifier
//!
//! Read-only check of a presented `(join_code, invite_token)` pair.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::database::GroupStore;
use crate::models::{InviteCredentials, VerifiedGroup};
use crate::utils::errors::{Result, TrackerError};
use crate::utils::logging::log_invite_event;

#[derive(Clone)]
pub struct InviteVerifier {
    store: Arc<dyn GroupStore>,
}

impl InviteVerifier {
    pub fn new(store: Arc<dyn GroupStore>) -> Self {
        Self { store }
    }

    pub async fn verify(&self, join_code: &str, invite_token: &str) -> Result<VerifiedGroup> {
        self.verify_at(join_code, invite_token, Utc::now()).await
    }

    /// Wrong code and rotated token are indistinguishable: both are
    /// `InvalidCredential`. A matching pair past its expiry is `Expired`.
    pub async fn verify_at(
        &self,
        join_code: &str,
        invite_token: &str,
        now: DateTime<Utc>,
    ) -> Result<VerifiedGroup> {
        let credentials = match InviteCredentials::new(join_code, invite_token) {
            Ok(credentials) => credentials,
            Err(e) => {
                log_invite_event(join_code, "malformed", None);
                return Err(e);
            }
        };

        self.verify_credentials_at(&credentials, now).await
    }

    pub async fn verify_credentials_at(
        &self,
        credentials: &InviteCredentials,
        now: DateTime<Utc>,
    ) -> Result<VerifiedGroup> {
        let group = match self
            .store
            .find_group_by_credentials(&credentials.join_code, &credentials.invite_token)
            .await?
        {
            Some(group) => group,
            None => {
                log_invite_event(&credentials.join_code, "invalid", None);
                return Err(TrackerError::InvalidCredential);
            }
        };

        if group.is_invite_expired_at(now) {
            log_invite_event(&credentials.join_code, "expired", Some(group.id));
            return Err(TrackerError::Expired {
                expired_at: group.invite_token_expires_at,
            });
        }

        log_invite_event(&credentials.join_code, "verified", Some(group.id));
        Ok(VerifiedGroup::from(&group))
    }
}
