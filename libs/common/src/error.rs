//! Custom error types for the common library
//!
//! This module defines the error types raised by the document store and
//! shared by every service that persists state through it.

use thiserror::Error;

/// Custom error type for document store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Error occurred while reading or writing a document
    #[error("Document store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error occurred while encoding a document
    #[error("Document serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The key cannot be mapped to a document location
    #[error("Invalid document key: {0}")]
    InvalidKey(String),
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
