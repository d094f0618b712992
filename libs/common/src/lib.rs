//! Common library for the cart site
//!
//! This crate provides the persistence layer shared by the services: a
//! key-addressed JSON document store with file-backed and in-memory
//! implementations, typed access with per-document write locks, and the
//! associated error types.

pub mod documents;
pub mod error;
pub mod store;

pub use documents::Documents;
pub use error::{StoreError, StoreResult};
pub use store::{DocumentKey, DocumentStore, JsonFileStore, MemoryStore};

/// Example usage of the document layer
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use common::{DocumentKey, Documents, JsonFileStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = JsonFileStore::open("data").await?;
///     let documents = Documents::new(Arc::new(store));
///     let key = DocumentKey::new("visits");
///     let visits = documents
///         .update(&key, |count: &mut u64| {
///             *count += 1;
///             Ok::<_, common::StoreError>(*count)
///         })
///         .await?;
///     println!("Visits so far: {}", visits);
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
