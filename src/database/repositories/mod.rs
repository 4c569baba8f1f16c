//! Database repositories module
//!
//! This module contains the PostgreSQL repository implementations

pub mod user;
pub mod group;
pub mod member;

// Re-export repositories
pub use user::UserRepository;
pub use group::GroupRepository;
pub use member::MemberRepository;

use crate::utils::errors::StoreError;

const GROUP_MEMBERS_PKEY: &str = "group_members_pkey";
const GAME_GROUPS_PKEY: &str = "game_groups_pkey";
const GAME_GROUPS_JOIN_CODE_KEY: &str = "game_groups_join_code_key";

/// Map constraint violations onto the store's typed errors
pub(crate) fn classify(error: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            match db_error.constraint() {
                Some(GROUP_MEMBERS_PKEY) => return StoreError::DuplicateMembership,
                Some(GAME_GROUPS_JOIN_CODE_KEY) => return StoreError::DuplicateJoinCode,
                Some(GAME_GROUPS_PKEY) => return StoreError::DuplicateGroup,
                _ => {}
            }
        }
        if db_error.is_foreign_key_violation() {
            return StoreError::NotFound;
        }
    }

    StoreError::Database(error)
}
