//! MeepleLog
//!
//! Invite and group-join workflow for a board-game session tracker.
//! Groups carry a short join code and a rotating, expiring invite token;
//! prospective members present both to be admitted exactly once.

#![allow(non_snake_case)]

pub mod config;
pub mod services;
pub mod models;
pub mod database;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{TrackerError, StoreError, Result};

// Re-export main components for easy access
pub use database::{DatabaseService, GroupStore, MemoryStore};
pub use models::{Group, InviteLink, JoinOutcome, MemberRole, Membership, VerifiedGroup};
pub use services::{AuthContext, InviteIssuer, InviteService, InviteVerifier, MembershipJoiner, ServiceFactory};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
