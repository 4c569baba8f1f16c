//! Data models module
//!
//! This module contains all data structures used by the invite workflow

pub mod group;
pub mod invite;
pub mod membership;
pub mod user;

// Re-export commonly used models
pub use group::{Group, NewGroup, InviteRotation};
pub use invite::{InviteCredentials, InviteLink, VerifiedGroup};
pub use membership::{JoinOutcome, MemberRole, Membership, MembershipRow, NewMembership};
pub use user::{User, CreateUserRequest};
