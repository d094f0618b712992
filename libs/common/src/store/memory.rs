//! In-memory document store, used by tests

use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use super::{DocumentStore, DocumentKey};
use crate::error::StoreResult;

#[derive(Debug, Default)]
struct Inner {
    documents: HashMap<DocumentKey, Vec<u8>>,
    quarantined: HashMap<DocumentKey, Vec<u8>>,
}

/// Document store keeping everything in process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last document moved aside for `key`, if any
    pub async fn quarantined(&self, key: &DocumentKey) -> Option<Vec<u8>> {
        self.inner.read().await.quarantined.get(key).cloned()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn read(&self, key: &DocumentKey) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.inner.read().await.documents.get(key).cloned())
    }

    async fn write(&self, key: &DocumentKey, contents: &[u8]) -> StoreResult<()> {
        self.inner
            .write()
            .await
            .documents
            .insert(key.clone(), contents.to_vec());
        Ok(())
    }

    async fn quarantine(&self, key: &DocumentKey) -> StoreResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(contents) = inner.documents.remove(key) {
            inner.quarantined.insert(key.clone(), contents);
        }
        Ok(())
    }
}
