//! Cart model and the validation of submitted carts
//!
//! A saved cart replaces the stored one wholesale. Each item is checked on
//! the way in: names are trimmed and 1-40 chars, quantities 1-99. Merging
//! duplicate names is left to the browser controller.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::{validate_item_name, validate_quantity};

/// Reasons a submitted cart is refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    #[error("Cart must be an array.")]
    NotAList,

    #[error("Invalid item at position {position}: {reason}. Check name (1-40 chars) and qty (1-99).")]
    InvalidEntry { position: usize, reason: String },
}

/// One line of a cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub name: String,
    #[serde(rename = "qty")]
    pub quantity: u32,
}

impl CartItem {
    /// Build an item from untrusted input; the name is trimmed
    pub fn new(name: &str, quantity: i64) -> Result<Self, String> {
        let name = name.trim();
        validate_item_name(name)?;
        validate_quantity(quantity)?;

        Ok(Self {
            name: name.to_string(),
            quantity: quantity as u32,
        })
    }
}

/// Ordered list of items owned by one user.
///
/// Built from a validated [`SaveCartRequest`] or from a stored document;
/// stored documents are trusted as written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Number of distinct items
    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

/// Item as sent by the browser, before range checks
#[derive(Debug, Deserialize)]
struct RawItem {
    name: String,
    qty: i64,
}

/// Body of `POST /api/cart`
#[derive(Debug, Default, Deserialize)]
pub struct SaveCartRequest {
    #[serde(default)]
    pub cart: serde_json::Value,
}

impl SaveCartRequest {
    /// Parse and validate the submitted list, stopping at the first bad entry
    pub fn into_cart(self) -> Result<Cart, CartError> {
        let serde_json::Value::Array(entries) = self.cart else {
            return Err(CartError::NotAList);
        };

        let items = entries
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let invalid = |reason: String| CartError::InvalidEntry {
                    position: index + 1,
                    reason,
                };
                let raw: RawItem = serde_json::from_value(entry)
                    .map_err(|_| invalid("expected a name string and an integer qty".to_string()))?;
                CartItem::new(&raw.name, raw.qty).map_err(invalid)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Cart { items })
    }
}
