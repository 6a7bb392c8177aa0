//! Credential records.

use chrono::{DateTime, Utc};

use crate::domain::PasswordHash;

/// A user able to sign in.
///
/// Users are created out of band by the `seed-user` binary and are never
/// serialised to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    name: String,
    password_hash: PasswordHash,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Assemble a user record.
    pub fn new(
        name: impl Into<String>,
        password_hash: PasswordHash,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            password_hash,
            created_at,
            updated_at,
        }
    }

    /// Unique user name.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Stored bcrypt hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// When the record was first written.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the record was last replaced.
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
