//! User repository for credential storage

use common::{DocumentKey, Documents, StoreError, StoreResult};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

use crate::{
    credentials::{CredentialError, CredentialScheme},
    models::{UserDirectory, UserRecord},
    validation::{validate_password, validate_username},
};

/// Key of the users document
const USERS_DOCUMENT: &str = "users";

/// Errors raised while registering a user
#[derive(Error, Debug)]
pub enum UserError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Username already exists.")]
    DuplicateUser,

    #[error(transparent)]
    Credential(#[from] CredentialError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// User repository
#[derive(Clone)]
pub struct UserRepository {
    documents: Documents,
    credentials: Arc<dyn CredentialScheme>,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(documents: Documents, credentials: Arc<dyn CredentialScheme>) -> Self {
        Self {
            documents,
            credentials,
        }
    }

    fn key() -> DocumentKey {
        DocumentKey::new(USERS_DOCUMENT)
    }

    /// Create a new user
    pub async fn register(&self, username: &str, password: &str) -> Result<(), UserError> {
        validate_username(username).map_err(UserError::InvalidInput)?;
        validate_password(password).map_err(UserError::InvalidInput)?;

        let credential = self.credentials.seal(password)?;

        self.documents
            .update(&Self::key(), |users: &mut UserDirectory| {
                if users.contains_key(username) {
                    return Err(UserError::DuplicateUser);
                }
                users.insert(
                    username.to_string(),
                    UserRecord {
                        password: credential,
                    },
                );
                Ok(())
            })
            .await?;

        info!("Registered new user: {}", username);
        Ok(())
    }

    /// Verify a user's password; unknown users never verify
    pub async fn verify(&self, username: &str, password: &str) -> StoreResult<bool> {
        let users: UserDirectory = self.documents.get(&Self::key()).await?;

        Ok(users
            .get(username)
            .is_some_and(|record| self.credentials.verify(&record.password, password)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{Argon2Credentials, PlaintextCredentials};
    use common::MemoryStore;

    fn repository(credentials: Arc<dyn CredentialScheme>) -> UserRepository {
        let documents = Documents::new(Arc::new(MemoryStore::new()));
        UserRepository::new(documents, credentials)
    }

    #[tokio::test]
    async fn test_register_then_verify() -> Result<(), UserError> {
        let users = repository(Arc::new(PlaintextCredentials));

        users.register("alice", "secret1").await?;

        assert!(users.verify("alice", "secret1").await?);
        assert!(!users.verify("alice", "secret2").await?);
        assert!(!users.verify("bob", "secret1").await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_register_rejects_short_fields() {
        let users = repository(Arc::new(PlaintextCredentials));

        assert!(matches!(
            users.register("al", "secret1").await,
            Err(UserError::InvalidInput(_))
        ));
        assert!(matches!(
            users.register("alice", "12345").await,
            Err(UserError::InvalidInput(_))
        ));
        assert!(!users.verify("al", "secret1").await.unwrap());
        assert!(!users.verify("alice", "12345").await.unwrap());
    }

    #[tokio::test]
    async fn test_register_rejects_duplicates() -> Result<(), UserError> {
        let users = repository(Arc::new(PlaintextCredentials));

        users.register("alice", "secret1").await?;
        assert!(matches!(
            users.register("alice", "another1").await,
            Err(UserError::DuplicateUser)
        ));

        // Original credential is untouched
        assert!(users.verify("alice", "secret1").await?);
        assert!(!users.verify("alice", "another1").await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_registration_of_same_name() {
        let users = repository(Arc::new(PlaintextCredentials));

        let mut handles = Vec::new();
        for attempt in 0..10 {
            let users = users.clone();
            handles.push(tokio::spawn(async move {
                users.register("alice", &format!("secret{}", attempt)).await
            }));
        }

        let mut created = 0;
        for handle in handles {
            match handle.await.expect("task panicked") {
                Ok(()) => created += 1,
                Err(UserError::DuplicateUser) => {}
                Err(e) => panic!("unexpected error: {}", e),
            }
        }
        assert_eq!(created, 1);
    }

    #[tokio::test]
    async fn test_argon2_credentials_are_not_stored_in_clear() -> Result<(), UserError> {
        let documents = Documents::new(Arc::new(MemoryStore::new()));
        let users = UserRepository::new(documents.clone(), Arc::new(Argon2Credentials));

        users.register("alice", "secret1").await?;

        let directory: UserDirectory = documents.get(&UserRepository::key()).await?;
        let stored = &directory["alice"].password;
        assert_ne!(stored, "secret1");
        assert!(users.verify("alice", "secret1").await?);
        Ok(())
    }
}
