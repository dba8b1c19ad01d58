//! Authenticated view of an account, derived per request and never persisted.

use std::collections::BTreeSet;

use uuid::Uuid;

use super::account::Account;

/// Normalize a stored role name into an authority label
pub fn normalize_role(role: &str) -> String {
    role.trim().to_uppercase()
}

/// Snapshot of the caller's identity and authorities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
    pub username: String,
    /// Upper-cased role names; each appears once
    pub authorities: BTreeSet<String>,
}

impl Principal {
    /// Derive a principal from the backing account
    pub fn from_account(account: &Account) -> Self {
        Self {
            user_id: account.id,
            username: account.username.clone(),
            authorities: account
                .roles
                .iter()
                .map(|r| normalize_role(r))
                .filter(|r| !r.is_empty())
                .collect(),
        }
    }

    /// Whether the principal carries the given authority (case-insensitive input)
    pub fn has_authority(&self, authority: &str) -> bool {
        self.authorities.contains(&normalize_role(authority))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorities_are_uppercased_once() {
        let account = Account::new("alice", "hash").with_roles(["admin", "Admin", "ADMIN", "user"]);
        let principal = Principal::from_account(&account);

        assert_eq!(principal.authorities.len(), 2);
        assert!(principal.authorities.contains("ADMIN"));
        assert!(principal.authorities.contains("USER"));
        assert_eq!(principal.user_id, account.id);
    }

    #[test]
    fn test_empty_roles_give_empty_authorities() {
        let principal = Principal::from_account(&Account::new("bob", "hash"));
        assert!(principal.authorities.is_empty());
    }

    #[test]
    fn test_has_authority() {
        let account = Account::new("alice", "hash").with_roles(["editor"]);
        let principal = Principal::from_account(&account);
        assert!(principal.has_authority("editor"));
        assert!(principal.has_authority("EDITOR"));
        assert!(!principal.has_authority("admin"));
    }
}
