//! Typed document access
//!
//! [`Documents`] wraps a [`DocumentStore`] with serde encoding and a write lock
//! per document. Every read-modify-write goes through [`Documents::update`],
//! which holds the document's lock from the read until the write completes,
//! so concurrent updates of one document are applied one after another.
//!
//! Documents that fail to parse are quarantined and read as their default
//! value, keeping the service available without discarding the bad bytes.

use serde::{Serialize, de::DeserializeOwned};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;
use tracing::warn;

use crate::{
    error::{StoreError, StoreResult},
    store::{DocumentKey, DocumentStore},
};

/// Outcome of decoding a stored document
enum Decoded<T> {
    Value(T),
    Corrupt(serde_json::Error),
}

/// Typed, write-serialized view over a document store
#[derive(Clone)]
pub struct Documents {
    store: Arc<dyn DocumentStore>,
    locks: Arc<Mutex<HashMap<DocumentKey, Arc<Mutex<()>>>>>,
}

impl Documents {
    /// Create a new document layer over `store`
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Read a document, or its default value when missing or unreadable
    pub async fn get<T>(&self, key: &DocumentKey) -> StoreResult<T>
    where
        T: DeserializeOwned + Default,
    {
        if let Decoded::Value(value) = self.decode(key).await? {
            return Ok(value);
        }

        // A writer may have replaced the bad bytes since they were read
        let lock = self.lock_for(key).await;
        let _guard = lock.lock().await;
        self.load_locked(key).await
    }

    /// Replace a document wholesale
    pub async fn put<T>(&self, key: &DocumentKey, value: &T) -> StoreResult<()>
    where
        T: Serialize,
    {
        let lock = self.lock_for(key).await;
        let _guard = lock.lock().await;
        self.store_value(key, value).await
    }

    /// Read a document, apply `apply` to it and write it back.
    ///
    /// Nothing is written when `apply` fails; its error is returned as is.
    pub async fn update<T, R, E, F>(&self, key: &DocumentKey, apply: F) -> Result<R, E>
    where
        T: DeserializeOwned + Serialize + Default,
        F: FnOnce(&mut T) -> Result<R, E>,
        E: From<StoreError>,
    {
        let lock = self.lock_for(key).await;
        let _guard = lock.lock().await;

        let mut value: T = self.load_locked(key).await?;
        let result = apply(&mut value)?;
        self.store_value(key, &value).await?;

        Ok(result)
    }

    async fn decode<T>(&self, key: &DocumentKey) -> StoreResult<Decoded<T>>
    where
        T: DeserializeOwned + Default,
    {
        let contents = match self.store.read(key).await? {
            Some(contents) => contents,
            None => return Ok(Decoded::Value(T::default())),
        };

        Ok(match serde_json::from_slice(&contents) {
            Ok(value) => Decoded::Value(value),
            Err(e) => Decoded::Corrupt(e),
        })
    }

    /// Read a document while holding its lock, quarantining it if unreadable.
    ///
    /// Writers take the same lock, so the quarantined bytes are the ones just
    /// decoded and never a newer document.
    async fn load_locked<T>(&self, key: &DocumentKey) -> StoreResult<T>
    where
        T: DeserializeOwned + Default,
    {
        match self.decode(key).await? {
            Decoded::Value(value) => Ok(value),
            Decoded::Corrupt(e) => {
                warn!("Document {} is unreadable, using default: {}", key, e);
                self.store.quarantine(key).await?;
                Ok(T::default())
            }
        }
    }

    async fn store_value<T>(&self, key: &DocumentKey, value: &T) -> StoreResult<()>
    where
        T: Serialize,
    {
        let contents = serde_json::to_vec_pretty(value)?;
        self.store.write(key, &contents).await
    }

    async fn lock_for(&self, key: &DocumentKey) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}
