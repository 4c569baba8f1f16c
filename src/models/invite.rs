//! Invite credentials, verification results and shareable links

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use crate::models::group::Group;
use crate::utils::errors::{Result, TrackerError};
use crate::utils::helpers::{is_valid_join_code, normalize_join_code};

/// A `(join_code, invite_token)` pair presented by a prospective member.
/// Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteCredentials {
    pub join_code: String,
    pub invite_token: String,
}

impl InviteCredentials {
    /// Normalize raw input. Anything that cannot match a stored pair is rejected
    /// as an invalid credential without touching the store.
    pub fn new(join_code: &str, invite_token: &str) -> Result<Self> {
        let join_code = normalize_join_code(join_code);
        let invite_token = invite_token.trim();

        if !is_valid_join_code(&join_code) || invite_token.is_empty() {
            return Err(TrackerError::InvalidCredential);
        }

        Ok(Self {
            join_code,
            invite_token: invite_token.to_string(),
        })
    }
}

/// Group metadata returned after a successful verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedGroup {
    pub group_id: Uuid,
    pub name: String,
    pub join_code: String,
    pub invite_token_expires_at: DateTime<Utc>,
}

impl From<&Group> for VerifiedGroup {
    fn from(group: &Group) -> Self {
        Self {
            group_id: group.id,
            name: group.name.clone(),
            join_code: group.join_code.clone(),
            invite_token_expires_at: group.invite_token_expires_at,
        }
    }
}

/// Shareable `{base}/join/{JOIN_CODE}?token={token}` link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteLink {
    url: Url,
}

impl InviteLink {
    pub fn build(base_url: &str, join_code: &str, invite_token: &str) -> Result<Self> {
        let mut url = Url::parse(base_url)
            .map_err(|e| TrackerError::InvalidInput(format!("Invalid base URL {}: {}", base_url, e)))?;

        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                TrackerError::InvalidInput(format!("Base URL cannot carry a path: {}", base_url))
            })?;
            segments.pop_if_empty().push("join").push(join_code);
        }

        url.set_query(None);
        url.set_fragment(None);
        url.query_pairs_mut().append_pair("token", invite_token);

        Ok(Self { url })
    }

    pub fn for_group(base_url: &str, group: &Group) -> Result<Self> {
        Self::build(base_url, &group.join_code, &group.invite_token)
    }

    /// Parse a link received from a prospective member
    pub fn parse(link: &str) -> Result<Self> {
        let url = Url::parse(link.trim())
            .map_err(|e| TrackerError::InvalidInput(format!("Invalid invite link: {}", e)))?;
        let invite = Self { url };
        invite.raw_parts()?;
        Ok(invite)
    }

    /// Extract the credentials carried by this link
    pub fn credentials(&self) -> Result<InviteCredentials> {
        let (join_code, invite_token) = self.raw_parts()?;
        InviteCredentials::new(&join_code, &invite_token)
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    fn raw_parts(&self) -> Result<(String, String)> {
        let segments: Vec<&str> = self
            .url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        let encoded_code = segments
            .windows(2)
            .rev()
            .find(|pair| pair[0] == "join")
            .map(|pair| pair[1])
            .ok_or_else(|| TrackerError::InvalidInput("Invite link has no join code".to_string()))?;

        let join_code = urlencoding::decode(encoded_code)
            .map_err(|e| TrackerError::InvalidInput(format!("Invalid join code encoding: {}", e)))?
            .into_owned();

        let invite_token = self
            .url
            .query_pairs()
            .find(|(key, _)| key == "token")
            .map(|(_, value)| value.into_owned())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| TrackerError::InvalidInput("Invite link has no token".to_string()))?;

        Ok((join_code, invite_token))
    }
}

impl fmt::Display for InviteLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}
