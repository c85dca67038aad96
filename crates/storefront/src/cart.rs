use serde::{Deserialize, Serialize};

use marketplace_catalog::Product;
use marketplace_core::{DomainError, DomainResult, Entity, ProductId, ValueObject};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl ValueObject for CartLine {}

/// Shopping cart: ordered lines, one per product, quantity >= 1.
///
/// Deserialization enforces the same line rules as [`Cart::add`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "CartRecord")]
pub struct Cart {
    lines: Vec<CartLine>,
}

/// Stored shape of a [`Cart`], checked before it becomes one.
#[derive(Deserialize)]
struct CartRecord {
    lines: Vec<CartLine>,
}

impl TryFrom<CartRecord> for Cart {
    type Error = DomainError;

    fn try_from(record: CartRecord) -> Result<Self, Self::Error> {
        for (i, line) in record.lines.iter().enumerate() {
            if line.quantity == 0 {
                return Err(DomainError::validation(format!(
                    "cart line for product {} has zero quantity",
                    line.product_id
                )));
            }
            if record.lines[..i].iter().any(|l| l.product_id == line.product_id) {
                return Err(DomainError::validation(format!(
                    "cart has more than one line for product {}",
                    line.product_id
                )));
            }
        }
        Ok(Self { lines: record.lines })
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total quantity across all lines.
    pub fn item_count(&self) -> DomainResult<u32> {
        self.lines.iter().try_fold(0u32, |total, l| {
            total
                .checked_add(l.quantity)
                .ok_or_else(|| DomainError::invariant("cart total overflow"))
        })
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.lines
            .iter()
            .find(|l| &l.product_id == product_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// Add `quantity` of a product, merging into an existing line.
    pub fn add(&mut self, product: &Product, quantity: u32) -> DomainResult<()> {
        if quantity == 0 {
            return Err(DomainError::validation("quantity must be at least 1"));
        }

        match self.lines.iter_mut().find(|l| product.has_id(&l.product_id)) {
            Some(line) => {
                line.quantity = line
                    .quantity
                    .checked_add(quantity)
                    .ok_or_else(|| DomainError::invariant("cart quantity overflow"))?;
            }
            None => self.lines.push(CartLine {
                product_id: product.id().clone(),
                quantity,
            }),
        }
        Ok(())
    }

    /// Set a line's quantity; 0 removes the line.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) -> DomainResult<()> {
        let position = self
            .lines
            .iter()
            .position(|l| &l.product_id == product_id)
            .ok_or_else(DomainError::not_found)?;

        if quantity == 0 {
            self.lines.remove(position);
        } else {
            self.lines[position].quantity = quantity;
        }
        Ok(())
    }

    /// Returns whether a line was removed.
    pub fn remove(&mut self, product_id: &ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| &l.product_id != product_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
