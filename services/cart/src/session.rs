//! Session management over the sessions document

use chrono::Utc;
use common::{DocumentKey, Documents, StoreError, StoreResult};
use rand::{RngCore, rngs::OsRng};
use regex::Regex;
use std::sync::OnceLock;
use tracing::info;

use crate::models::{Session, SessionTable};

/// Key of the sessions document
const SESSIONS_DOCUMENT: &str = "sessions";

/// Random bytes per token; tokens are their lowercase hex encoding
const TOKEN_BYTES: usize = 24;

/// Session manager for handling user sessions
#[derive(Clone)]
pub struct SessionManager {
    documents: Documents,
}

impl SessionManager {
    /// Create a new session manager
    pub fn new(documents: Documents) -> Self {
        Self { documents }
    }

    fn key() -> DocumentKey {
        DocumentKey::new(SESSIONS_DOCUMENT)
    }

    /// Create a new session for a user and return its token
    pub async fn create_session(&self, username: &str) -> StoreResult<String> {
        let token = self
            .documents
            .update(&Self::key(), |sessions: &mut SessionTable| {
                let token = loop {
                    let candidate = generate_token();
                    if !sessions.contains_key(&candidate) {
                        break candidate;
                    }
                };

                sessions.insert(
                    token.clone(),
                    Session {
                        username: username.to_string(),
                        created_at: Utc::now().timestamp_millis(),
                    },
                );
                Ok::<_, StoreError>(token)
            })
            .await?;

        info!("Created session for user: {}", username);
        Ok(token)
    }

    /// Owner of a session, if the token is known
    pub async fn resolve(&self, token: &str) -> StoreResult<Option<String>> {
        if !is_well_formed(token) {
            return Ok(None);
        }

        let sessions: SessionTable = self.documents.get(&Self::key()).await?;
        Ok(sessions.get(token).map(|session| session.username.clone()))
    }

    /// Delete a session; unknown tokens are ignored
    pub async fn destroy(&self, token: &str) -> StoreResult<()> {
        if !is_well_formed(token) {
            return Ok(());
        }

        let removed = self
            .documents
            .update(&Self::key(), |sessions: &mut SessionTable| {
                Ok::<_, StoreError>(sessions.remove(token))
            })
            .await?;

        if let Some(session) = removed {
            info!("Deleted session for user: {}", session.username);
        }

        Ok(())
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}

fn is_well_formed(token: &str) -> bool {
    static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = TOKEN_REGEX.get_or_init(|| {
        Regex::new(&format!("^[0-9a-f]{{{}}}$", TOKEN_BYTES * 2))
            .expect("Failed to compile token regex")
    });

    regex.is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::MemoryStore;
    use std::{collections::HashSet, sync::Arc};

    fn manager() -> (Documents, SessionManager) {
        let documents = Documents::new(Arc::new(MemoryStore::new()));
        (documents.clone(), SessionManager::new(documents))
    }

    #[test]
    fn test_generated_tokens_are_hex() {
        let token = generate_token();
        assert_eq!(token.len(), 48);
        assert!(is_well_formed(&token));
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(!is_well_formed(""));
        assert!(!is_well_formed("not-a-token"));
        assert!(!is_well_formed(&"A".repeat(48)));
        assert!(!is_well_formed(&"a".repeat(47)));
    }

    #[tokio::test]
    async fn test_create_then_resolve() -> StoreResult<()> {
        let (_, sessions) = manager();

        let token = sessions.create_session("alice").await?;
        assert_eq!(sessions.resolve(&token).await?, Some("alice".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn test_tokens_are_unique() -> StoreResult<()> {
        let (_, sessions) = manager();

        let mut tokens = HashSet::new();
        for _ in 0..20 {
            tokens.insert(sessions.create_session("alice").await?);
        }
        assert_eq!(tokens.len(), 20);
        Ok(())
    }

    #[tokio::test]
    async fn test_destroy_invalidates_token() -> StoreResult<()> {
        let (_, sessions) = manager();

        let first = sessions.create_session("alice").await?;
        let second = sessions.create_session("alice").await?;
        sessions.destroy(&first).await?;

        assert_eq!(sessions.resolve(&first).await?, None);
        assert_eq!(sessions.resolve(&second).await?, Some("alice".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_tokens() -> StoreResult<()> {
        let (_, sessions) = manager();

        assert_eq!(sessions.resolve(&"0".repeat(48)).await?, None);
        assert_eq!(sessions.resolve("garbage").await?, None);
        sessions.destroy("garbage").await?;
        sessions.destroy(&"0".repeat(48)).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_sessions_document_records_creation_time() -> StoreResult<()> {
        let (documents, sessions) = manager();
        let before = Utc::now().timestamp_millis();

        let token = sessions.create_session("alice").await?;

        let table: SessionTable = documents.get(&SessionManager::key()).await?;
        let session = &table[&token];
        assert_eq!(session.username, "alice");
        assert!(session.created_at >= before);
        Ok(())
    }
}
