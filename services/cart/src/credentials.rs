//! Credential schemes
//!
//! The users document stores one credential string per user. What that
//! string contains is decided by a [`CredentialScheme`], so the repository
//! never handles the encoding itself.

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use std::sync::Arc;
use thiserror::Error;

use crate::config::PasswordScheme;

/// Error raised while sealing a password
#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Failed to hash password: {0}")]
    Hash(String),
}

/// Turns passwords into stored credentials and checks them later
pub trait CredentialScheme: Send + Sync {
    /// Produce the credential to store for `password`
    fn seal(&self, password: &str) -> Result<String, CredentialError>;

    /// Check `password` against a stored credential
    fn verify(&self, stored: &str, password: &str) -> bool;
}

/// Stores the password as given.
///
/// Kept for compatibility with existing users documents; prefer
/// [`Argon2Credentials`] for new deployments.
#[derive(Debug, Clone, Default)]
pub struct PlaintextCredentials;

impl CredentialScheme for PlaintextCredentials {
    fn seal(&self, password: &str) -> Result<String, CredentialError> {
        Ok(password.to_string())
    }

    fn verify(&self, stored: &str, password: &str) -> bool {
        stored == password
    }
}

/// Salted Argon2 hashes in PHC string format
#[derive(Debug, Clone, Default)]
pub struct Argon2Credentials;

impl CredentialScheme for Argon2Credentials {
    fn seal(&self, password: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        let argon2 = Argon2::default();
        let password_hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CredentialError::Hash(e.to_string()))?
            .to_string();

        Ok(password_hash)
    }

    fn verify(&self, stored: &str, password: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(stored) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

/// Credential scheme for a configured [`PasswordScheme`]
pub fn for_scheme(scheme: PasswordScheme) -> Arc<dyn CredentialScheme> {
    match scheme {
        PasswordScheme::Plaintext => Arc::new(PlaintextCredentials),
        PasswordScheme::Argon2 => Arc::new(Argon2Credentials),
    }
}
