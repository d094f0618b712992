//! Raw document storage
//!
//! A document is one JSON value addressed by a [`DocumentKey`]. Stores deal
//! in bytes only; typed access and write serialization live in
//! [`crate::documents`].

use async_trait::async_trait;

use crate::error::StoreResult;

mod file;
mod key;
mod memory;

pub use file::JsonFileStore;
pub use key::DocumentKey;
pub use memory::MemoryStore;

/// Backend holding the raw bytes of every document
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a document, `None` if it was never written
    async fn read(&self, key: &DocumentKey) -> StoreResult<Option<Vec<u8>>>;

    /// Replace a document with `contents` in a single step
    async fn write(&self, key: &DocumentKey, contents: &[u8]) -> StoreResult<()>;

    /// Move an unreadable document out of the way so the next write does not
    /// destroy it. Missing documents are ignored.
    async fn quarantine(&self, key: &DocumentKey) -> StoreResult<()>;
}
