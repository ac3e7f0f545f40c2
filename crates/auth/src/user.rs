//! User identity for startup login gating.
//!
//! There is no session or permission model here: the role is carried for
//! display, not enforcement.

use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dishstock_core::{DomainError, DomainResult, UserId};

/// Username seeded into an empty user table.
pub const DEFAULT_ADMIN_USERNAME: &str = "admin";

/// Password of the seeded administrator. Stored hashed, never plaintext.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

// ─────────────────────────────────────────────────────────────────────────────
// Role
// ─────────────────────────────────────────────────────────────────────────────

/// Role of a user account.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administrator account.
    Admin,
    /// Regular operator account.
    #[default]
    Standard,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Standard => "standard",
        }
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "admin" => Ok(Role::Admin),
            "standard" => Ok(Role::Standard),
            other => Err(DomainError::validation(format!("unknown role: {other}"))),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// User
// ─────────────────────────────────────────────────────────────────────────────

/// A stored login identity. The credential hash stays inside the store; this
/// type is what authentication hands back to the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

// ─────────────────────────────────────────────────────────────────────────────
// NewUser
// ─────────────────────────────────────────────────────────────────────────────

/// Input for provisioning a user account. The password is plaintext here and
/// hashed by the store before it is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl NewUser {
    /// Validate the input and return it with the username trimmed.
    ///
    /// Passwords are taken verbatim (inner whitespace is significant); only
    /// emptiness is rejected.
    pub fn normalized(self) -> DomainResult<Self> {
        let username = self.username.trim().to_string();
        if username.is_empty() {
            return Err(DomainError::validation("username cannot be empty"));
        }
        if self.password.is_empty() {
            return Err(DomainError::validation("password cannot be empty"));
        }

        Ok(Self { username, ..self })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
