//! Authentication service implementation
//!
//! Turns the identity supplied by the authentication provider into a
//! registered user id, and checks group membership for member-only operations.

use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::database::GroupStore;
use crate::models::Membership;
use crate::utils::errors::{Result, TrackerError};

/// Identity attached to a request by the authentication provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Option<Uuid>,
}

impl AuthContext {
    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn authenticated(user_id: Uuid) -> Self {
        Self { user_id: Some(user_id) }
    }

    /// The caller's user id, or `NotAuthenticated`
    pub fn require_user(&self) -> Result<Uuid> {
        self.user_id.ok_or(TrackerError::NotAuthenticated)
    }
}

/// Authentication service for identity and membership checks
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn GroupStore>,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(store: Arc<dyn GroupStore>) -> Self {
        Self { store }
    }

    /// Require an authenticated caller with a profile row
    pub async fn require_registered_user(&self, auth: &AuthContext) -> Result<Uuid> {
        let user_id = auth.require_user()?;

        if !self.store.user_exists(user_id).await? {
            warn!(user_id = %user_id, "Authenticated user has no profile");
            return Err(TrackerError::UserNotFound { user_id });
        }

        debug!(user_id = %user_id, "User authenticated");
        Ok(user_id)
    }

    /// Require that `user_id` belongs to `group_id`
    pub async fn require_membership(&self, group_id: Uuid, user_id: Uuid) -> Result<Membership> {
        if self.store.find_group(group_id).await?.is_none() {
            return Err(TrackerError::GroupNotFound { group_id });
        }

        self.store
            .find_membership(group_id, user_id)
            .await?
            .ok_or(TrackerError::MembershipNotFound { group_id, user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;
    use crate::models::CreateUserRequest;
    use assert_matches::assert_matches;

    #[test]
    fn test_anonymous_context_is_rejected() {
        assert_matches!(AuthContext::anonymous().require_user(), Err(TrackerError::NotAuthenticated));
        let user_id = Uuid::new_v4();
        assert_eq!(AuthContext::authenticated(user_id).require_user().unwrap(), user_id);
    }

    #[tokio::test]
    async fn test_unregistered_user_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let registered = store
            .create_user(CreateUserRequest { id: Uuid::new_v4(), ..Default::default() })
            .await;
        let auth = AuthService::new(store);

        assert_eq!(
            auth.require_registered_user(&AuthContext::authenticated(registered.id))
                .await
                .unwrap(),
            registered.id
        );
        assert_matches!(
            auth.require_registered_user(&AuthContext::authenticated(Uuid::new_v4())).await,
            Err(TrackerError::UserNotFound { .. })
        );
    }

    #[tokio::test]
    async fn test_membership_of_missing_group() {
        let auth = AuthService::new(Arc::new(MemoryStore::new()));
        assert_matches!(
            auth.require_membership(Uuid::new_v4(), Uuid::new_v4()).await,
            Err(TrackerError::GroupNotFound { .. })
        );
    }
}
