//! File-backed document store
//!
//! Each document is a pretty-printed JSON file under the store root. Top-level
//! documents live at `<root>/<name>.json`, documents in a collection at
//! `<root>/<collection>/<name>.json`, with both segments encoded so that no key
//! can point outside the root.

use async_trait::async_trait;
use chrono::Utc;
use std::{io::ErrorKind, path::PathBuf};
use tokio::fs;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    DocumentStore,
    key::{DocumentKey, encode_segment},
};
use crate::error::{StoreError, StoreResult};

/// Document store persisting every document as its own JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

/// Directory and encoded file stem of one document
struct Location {
    dir: PathBuf,
    stem: String,
}

impl Location {
    fn file(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.stem))
    }
}

impl JsonFileStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        info!("Document store opened at {}", root.display());
        Ok(Self { root })
    }

    /// Root directory of the store
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Create the directory backing a collection ahead of its first write
    pub async fn ensure_collection(&self, collection: &str) -> StoreResult<()> {
        if collection.is_empty() {
            return Err(StoreError::InvalidKey("empty collection".to_string()));
        }
        fs::create_dir_all(self.root.join(encode_segment(collection))).await?;
        Ok(())
    }

    /// File path backing a document
    pub fn path_for(&self, key: &DocumentKey) -> StoreResult<PathBuf> {
        Ok(self.locate(key)?.file())
    }

    fn locate(&self, key: &DocumentKey) -> StoreResult<Location> {
        if key.name().is_empty() || key.collection() == Some("") {
            return Err(StoreError::InvalidKey(key.to_string()));
        }

        let dir = match key.collection() {
            Some(collection) => self.root.join(encode_segment(collection)),
            None => self.root.clone(),
        };

        Ok(Location {
            dir,
            stem: encode_segment(key.name()),
        })
    }
}

#[async_trait]
impl DocumentStore for JsonFileStore {
    async fn read(&self, key: &DocumentKey) -> StoreResult<Option<Vec<u8>>> {
        let path = self.locate(key)?.file();
        match fs::read(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &DocumentKey, contents: &[u8]) -> StoreResult<()> {
        let location = self.locate(key)?;
        fs::create_dir_all(&location.dir).await?;

        // Readers see either the old file or the new one, never a partial write
        let staging = location
            .dir
            .join(format!("{}.json.{}.tmp", location.stem, Uuid::new_v4().simple()));
        if let Err(e) = fs::write(&staging, contents).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }
        fs::rename(&staging, location.file()).await?;

        Ok(())
    }

    async fn quarantine(&self, key: &DocumentKey) -> StoreResult<()> {
        let location = self.locate(key)?;
        let target = location.dir.join(format!(
            "{}.json.corrupt-{}-{}",
            location.stem,
            Utc::now().format("%Y%m%dT%H%M%S%.3f"),
            Uuid::new_v4().simple()
        ));

        match fs::rename(location.file(), &target).await {
            Ok(()) => {
                warn!(
                    "Moved unreadable document {} to {}",
                    key,
                    target.display()
                );
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
