//! Cart repository, one document per user

use common::{DocumentKey, Documents, StoreResult};
use tracing::info;

use crate::models::Cart;

/// Collection holding the per-user cart documents
pub const CARTS_COLLECTION: &str = "carts";

/// Cart repository
#[derive(Clone)]
pub struct CartRepository {
    documents: Documents,
}

impl CartRepository {
    /// Create a new cart repository
    pub fn new(documents: Documents) -> Self {
        Self { documents }
    }

    fn key(username: &str) -> DocumentKey {
        DocumentKey::in_collection(CARTS_COLLECTION, username)
    }

    /// Load a user's cart; users who never saved get an empty one
    pub async fn load(&self, username: &str) -> StoreResult<Cart> {
        self.documents.get(&Self::key(username)).await
    }

    /// Replace a user's cart and return the number of stored items
    pub async fn save(&self, username: &str, cart: &Cart) -> StoreResult<usize> {
        self.documents.put(&Self::key(username), cart).await?;
        info!("Saved {} cart items for user: {}", cart.item_count(), username);
        Ok(cart.item_count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::MemoryStore;
    use serde_json::json;
    use std::sync::Arc;

    fn repository() -> CartRepository {
        CartRepository::new(Documents::new(Arc::new(MemoryStore::new())))
    }

    fn milk() -> Cart {
        serde_json::from_value(json!([{ "name": "Milk", "qty": 2 }])).unwrap()
    }

    #[tokio::test]
    async fn test_load_without_saved_cart() -> StoreResult<()> {
        let carts = repository();
        assert_eq!(carts.load("alice").await?, Cart::default());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_then_load() -> StoreResult<()> {
        let carts = repository();

        assert_eq!(carts.save("alice", &milk()).await?, 1);
        assert_eq!(carts.load("alice").await?, milk());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_is_idempotent() -> StoreResult<()> {
        let carts = repository();

        carts.save("alice", &milk()).await?;
        carts.save("alice", &milk()).await?;
        assert_eq!(carts.load("alice").await?, milk());
        Ok(())
    }

    #[tokio::test]
    async fn test_carts_are_per_user() -> StoreResult<()> {
        let carts = repository();

        carts.save("alice", &milk()).await?;
        assert_eq!(carts.load("bob").await?, Cart::default());
        Ok(())
    }

    #[tokio::test]
    async fn test_save_replaces_whole_cart() -> StoreResult<()> {
        let carts = repository();

        carts.save("alice", &milk()).await?;
        carts.save("alice", &Cart::default()).await?;
        assert_eq!(carts.load("alice").await?, Cart::default());
        Ok(())
    }
}
