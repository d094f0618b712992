//! User model and related functionality

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Credential record as kept in the users document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Stored credential, encoded by the configured credential scheme
    pub password: String,
}

/// Contents of the users document, keyed by username
pub type UserDirectory = BTreeMap<String, UserRecord>;

/// Body of the register and login requests
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl Credentials {
    /// Both fields, if present
    pub fn into_parts(self) -> Option<(String, String)> {
        Some((self.username?, self.password?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_users_document_shape() {
        let mut users = UserDirectory::new();
        users.insert(
            "alice".to_string(),
            UserRecord {
                password: "secret1".to_string(),
            },
        );

        assert_eq!(
            serde_json::to_value(&users).unwrap(),
            serde_json::json!({ "alice": { "password": "secret1" } })
        );
    }

    #[test]
    fn test_credentials_missing_fields() {
        let credentials: Credentials = serde_json::from_str(r#"{"username": "alice"}"#).unwrap();
        assert_eq!(credentials.into_parts(), None);

        let credentials: Credentials =
            serde_json::from_str(r#"{"username": "alice", "password": "secret1"}"#).unwrap();
        assert_eq!(
            credentials.into_parts(),
            Some(("alice".to_string(), "secret1".to_string()))
        );
    }

    #[test]
    fn test_credentials_reject_wrong_types() {
        assert!(serde_json::from_str::<Credentials>(r#"{"username": 42}"#).is_err());
    }
}
