//! Error handling for MeepleLog
//!
//! This module defines the error types returned by the invite workflow
//! and by the store implementations behind it.

use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

/// Main error type for MeepleLog operations
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: Uuid },

    #[error("Group not found: {group_id}")]
    GroupNotFound { group_id: Uuid },

    #[error("Membership not found: user {user_id} in group {group_id}")]
    MembershipNotFound { group_id: Uuid, user_id: Uuid },

    #[error("Invalid invite credential")]
    InvalidCredential,

    #[error("Invite expired at {expired_at}")]
    Expired { expired_at: DateTime<Utc> },

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors reported by a [`GroupStore`](crate::database::GroupStore) implementation
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Membership already exists")]
    DuplicateMembership,

    #[error("Join code already in use")]
    DuplicateJoinCode,

    #[error("Group already exists")]
    DuplicateGroup,

    #[error("Referenced row not found")]
    NotFound,

    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

/// Result type alias for MeepleLog operations
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Result type alias for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

impl TrackerError {
    /// Short machine-checkable code for the presentation layer
    pub fn code(&self) -> &'static str {
        match self {
            TrackerError::NotAuthenticated => "not_authenticated",
            TrackerError::UserNotFound { .. } => "user_not_found",
            TrackerError::GroupNotFound { .. } | TrackerError::MembershipNotFound { .. } => "not_found",
            TrackerError::InvalidCredential => "invalid_credential",
            TrackerError::Expired { .. } => "expired",
            TrackerError::PermissionDenied(_) => "permission_denied",
            TrackerError::InvalidInput(_) => "invalid_input",
            TrackerError::Config(_) => "config",
            TrackerError::Store(_) => "store_failure",
        }
    }

    /// Group or membership missing
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            TrackerError::GroupNotFound { .. } | TrackerError::MembershipNotFound { .. }
        )
    }

    /// Underlying persistence failed
    pub fn is_store_failure(&self) -> bool {
        matches!(self, TrackerError::Store(_))
    }

    /// Check if the caller may reasonably try the same request again
    pub fn is_recoverable(&self) -> bool {
        match self {
            TrackerError::Store(StoreError::Database(_)) => true,
            TrackerError::Store(StoreError::DuplicateJoinCode) => true,
            TrackerError::NotAuthenticated => true,
            _ => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TrackerError::Store(_) => ErrorSeverity::Critical,
            TrackerError::Config(_) => ErrorSeverity::Critical,
            TrackerError::PermissionDenied(_) => ErrorSeverity::Warning,
            TrackerError::NotAuthenticated => ErrorSeverity::Warning,
            TrackerError::InvalidCredential | TrackerError::Expired { .. } => ErrorSeverity::Info,
            TrackerError::InvalidInput(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
