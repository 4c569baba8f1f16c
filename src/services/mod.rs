//! Services module
//!
//! This module contains the invite workflow services

pub mod auth;
pub mod invite;
pub mod issuer;
pub mod joiner;
pub mod verifier;

// Re-export commonly used services
pub use auth::{AuthContext, AuthService};
pub use invite::InviteService;
pub use issuer::InviteIssuer;
pub use joiner::MembershipJoiner;
pub use verifier::InviteVerifier;

use std::sync::Arc;

use tracing::warn;

use crate::config::settings::Settings;
use crate::database::GroupStore;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub invite_service: InviteService,
    store: Arc<dyn GroupStore>,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services sharing one store
    pub fn new(store: Arc<dyn GroupStore>, settings: &Settings) -> Self {
        Self {
            invite_service: InviteService::new(store.clone(), settings.invites.clone()),
            store,
        }
    }

    /// Health check for all services
    pub async fn health_check(&self) -> ServiceHealthStatus {
        let store_healthy = match self.store.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Store health check failed");
                false
            }
        };

        ServiceHealthStatus { store_healthy }
    }
}

/// Health status for all services
#[derive(Debug, Clone)]
pub struct ServiceHealthStatus {
    pub store_healthy: bool,
}

impl ServiceHealthStatus {
    /// Check if all critical services are healthy
    pub fn is_healthy(&self) -> bool {
        self.store_healthy
    }

    /// Get list of unhealthy services
    pub fn get_issues(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if !self.store_healthy {
            issues.push("Store connection failed".to_string());
        }

        issues
    }
}
