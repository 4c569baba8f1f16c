//! Helper functions and utilities
//!
//! Credential generation and normalization shared by the invite services.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

/// Length of a group join code
pub const JOIN_CODE_LENGTH: usize = 6;

/// Longest accepted group display name, in characters
pub const MAX_GROUP_NAME_LENGTH: usize = 100;

const JOIN_CODE_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a human-typeable join code
pub fn generate_join_code() -> String {
    let mut rng = rand::thread_rng();

    (0..JOIN_CODE_LENGTH)
        .map(|_| {
            let idx = rng.gen_range(0..JOIN_CODE_CHARSET.len());
            JOIN_CODE_CHARSET[idx] as char
        })
        .collect()
}

/// Generate a new opaque invite token
pub fn generate_invite_token() -> String {
    Uuid::new_v4().to_string()
}

/// Join codes are compared case-insensitively and stored upper-cased
pub fn normalize_join_code(join_code: &str) -> String {
    join_code.trim().to_uppercase()
}

/// Check that a normalized join code has the shape produced by [`generate_join_code`]
pub fn is_valid_join_code(join_code: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[0-9A-Z]{6}$").expect("join code pattern is valid"))
        .is_match(join_code)
}

/// Compute the expiry instant for a token issued at `issued_at`
pub fn invite_expiry(issued_at: DateTime<Utc>, ttl_seconds: u64) -> DateTime<Utc> {
    i64::try_from(ttl_seconds)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|ttl| issued_at.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}
