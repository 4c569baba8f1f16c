//! Group model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub join_code: String,
    pub invite_token: String,
    pub invite_token_expires_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Group {
    /// The token is still usable at the expiry instant itself
    pub fn is_invite_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.invite_token_expires_at
    }

    /// Whether `(join_code, invite_token)` is this group's current pair
    pub fn has_credentials(&self, join_code: &str, invite_token: &str) -> bool {
        self.join_code == join_code && self.invite_token == invite_token
    }
}

/// Row written by the issuer when a group is first created
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub id: Uuid,
    pub name: String,
    pub join_code: String,
    pub invite_token: String,
    pub invite_token_expires_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl NewGroup {
    pub fn into_group(self) -> Group {
        Group {
            id: self.id,
            name: self.name,
            join_code: self.join_code,
            invite_token: self.invite_token,
            invite_token_expires_at: self.invite_token_expires_at,
            created_by: self.created_by,
            created_at: self.created_at,
        }
    }
}

/// Replacement invite pair produced by regeneration
#[derive(Debug, Clone)]
pub struct InviteRotation {
    pub invite_token: String,
    pub invite_token_expires_at: DateTime<Utc>,
}
