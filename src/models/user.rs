//! Registered user model
//!
//! Users own transactions, savings goals and predictions through their
//! numeric [`UserId`]. Usernames are unique ignoring case.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;

/// Longest accepted username, in characters
pub const MAX_USERNAME_LEN: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: UserId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            created_at: Utc::now(),
        }
    }

    /// Lookup key for a username
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    /// Check a proposed username, returning it trimmed
    pub fn validate_name(name: &str) -> Result<String, String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err("Username cannot be empty".into());
        }
        if trimmed.chars().count() > MAX_USERNAME_LEN {
            return Err(format!(
                "Username cannot exceed {} characters",
                MAX_USERNAME_LEN
            ));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err("Username cannot contain spaces".into());
        }
        Ok(trimmed.to_string())
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (id {})", self.username, self.id)
    }
}
