use serde::{Deserialize, Serialize};

use marketplace_core::ProductId;

/// Saved products, in the order they were added.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Wishlist {
    items: Vec<ProductId>,
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[ProductId] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.contains(product_id)
    }

    /// Add if absent, remove if present. Returns whether the product is now saved.
    pub fn toggle(&mut self, product_id: &ProductId) -> bool {
        if self.remove(product_id) {
            false
        } else {
            self.items.push(product_id.clone());
            true
        }
    }

    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|id| id != product_id);
        self.items.len() != before
    }
}
