//! Session model and related functionality

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Session entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Owner of the session
    pub username: String,
    /// Creation time in milliseconds since the Unix epoch
    pub created_at: i64,
}

/// Contents of the sessions document, keyed by token
pub type SessionTable = BTreeMap<String, Session>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_document_shape() {
        let session = Session {
            username: "alice".to_string(),
            created_at: 1_724_500_000_000,
        };

        assert_eq!(
            serde_json::to_value(&session).unwrap(),
            serde_json::json!({ "username": "alice", "createdAt": 1_724_500_000_000_i64 })
        );
    }
}
