//! Account entity representing a registered identity.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account entity keyed by its unique, case-sensitive username
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier, generated at creation and never reused
    pub id: Uuid,

    /// Natural key, immutable after creation
    pub username: String,

    /// One-way hash of the password
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    /// Role names as stored; may be empty
    pub roles: BTreeSet<String>,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Creates a new account with a fresh id and an empty role set
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password_hash: password_hash.into(),
            roles: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds roles to the account (administrative path, used by tests and seeding)
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"<redacted>")
            .field("roles", &self.roles)
            .field("created_at", &self.created_at)
            .finish()
    }
}
