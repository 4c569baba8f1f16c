//! Membership model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::errors::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Admin,
    Member,
}

impl MemberRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Admin => "admin",
            MemberRole::Member => "member",
        }
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MemberRole {
    type Err = StoreError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(MemberRole::Admin),
            "member" => Ok(MemberRole::Member),
            other => Err(StoreError::Corrupt(format!("unknown member role: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

impl Membership {
    pub fn is_admin(&self) -> bool {
        self.role == MemberRole::Admin
    }
}

/// Raw `group_members` row; the role column is free text in storage
#[derive(Debug, Clone, FromRow)]
pub struct MembershipRow {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub joined_at: DateTime<Utc>,
}

impl TryFrom<MembershipRow> for Membership {
    type Error = StoreError;

    fn try_from(row: MembershipRow) -> Result<Self, Self::Error> {
        Ok(Membership {
            group_id: row.group_id,
            user_id: row.user_id,
            role: row.role.parse()?,
            joined_at: row.joined_at,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewMembership {
    pub group_id: Uuid,
    pub user_id: Uuid,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

impl NewMembership {
    pub fn into_membership(self) -> Membership {
        Membership {
            group_id: self.group_id,
            user_id: self.user_id,
            role: self.role,
            joined_at: self.joined_at,
        }
    }
}

/// Result of an admission attempt. Both variants are successes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined(Membership),
    AlreadyMember(Membership),
}

impl JoinOutcome {
    /// `true` only when this call created the membership row
    pub fn is_new(&self) -> bool {
        matches!(self, JoinOutcome::Joined(_))
    }

    pub fn membership(&self) -> &Membership {
        match self {
            JoinOutcome::Joined(membership) | JoinOutcome::AlreadyMember(membership) => membership,
        }
    }

    pub fn into_membership(self) -> Membership {
        match self {
            JoinOutcome::Joined(membership) | JoinOutcome::AlreadyMember(membership) => membership,
        }
    }

    /// Short machine-checkable code for the presentation layer
    pub fn code(&self) -> &'static str {
        match self {
            JoinOutcome::Joined(_) => "joined",
            JoinOutcome::AlreadyMember(_) => "already_member",
        }
    }
}
