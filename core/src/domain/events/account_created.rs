//! Event published once an account has been persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Optional profile data accepted at signup.
///
/// Not stored on the account; only forwarded to downstream consumers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

/// Notification that a new account exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountCreatedEvent {
    pub user_id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl AccountCreatedEvent {
    /// Build the event; `first_name` falls back to the username when not supplied
    pub fn new(user_id: Uuid, username: &str, profile: ProfileFields) -> Self {
        let first_name = profile
            .first_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| username.to_string());

        Self {
            user_id,
            username: username.to_string(),
            first_name,
            last_name: profile.last_name,
            email: profile.email,
            phone_number: profile.phone_number,
            occurred_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_name_falls_back_to_username() {
        let event = AccountCreatedEvent::new(Uuid::new_v4(), "alice", ProfileFields::default());
        assert_eq!(event.first_name, "alice");
        assert!(event.email.is_none());
    }

    #[test]
    fn test_profile_fields_are_forwarded() {
        let profile = ProfileFields {
            first_name: Some("Alice".to_string()),
            last_name: Some("Liddell".to_string()),
            email: Some("alice@example.com".to_string()),
            phone_number: Some("+61400000000".to_string()),
        };
        let event = AccountCreatedEvent::new(Uuid::new_v4(), "alice", profile);

        assert_eq!(event.first_name, "Alice");
        assert_eq!(event.last_name.as_deref(), Some("Liddell"));

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["phoneNumber"], "+61400000000");
        assert!(json.get("userId").is_some());
    }
}
