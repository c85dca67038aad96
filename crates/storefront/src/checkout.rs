//! Cart pricing for the checkout page. Payment is not processed.

use serde::Serialize;

use marketplace_catalog::{Catalog, ExchangeRate};
use marketplace_core::{DomainError, DomainResult, ProductId};

use crate::cart::Cart;

/// Cart totals priced against the catalog.
///
/// Amounts are base currency units; `display_total` applies the exchange rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutSummary {
    pub item_count: u32,
    pub subtotal: u64,
    pub savings: u64,
    pub total: u64,
    pub display_total: f64,
    /// Cart lines whose product is no longer in the catalog (not priced).
    pub missing: Vec<ProductId>,
}

impl CheckoutSummary {
    pub fn price(cart: &Cart, catalog: &Catalog, rate: ExchangeRate) -> DomainResult<Self> {
        if cart.is_empty() {
            return Err(DomainError::validation("cannot check out an empty cart"));
        }

        let mut summary = Self {
            item_count: 0,
            subtotal: 0,
            savings: 0,
            total: 0,
            display_total: 0.0,
            missing: Vec::new(),
        };

        for line in cart.lines() {
            let Some(product) = catalog.get(&line.product_id) else {
                tracing::warn!(product_id = %line.product_id, "cart line references unknown product");
                summary.missing.push(line.product_id.clone());
                continue;
            };

            let qty = u64::from(line.quantity);
            summary.item_count = summary
                .item_count
                .checked_add(line.quantity)
                .ok_or_else(overflow)?;
            summary.subtotal = product
                .price()
                .checked_mul(qty)
                .and_then(|amount| summary.subtotal.checked_add(amount))
                .ok_or_else(overflow)?;
            summary.savings = product
                .savings()
                .checked_mul(qty)
                .and_then(|amount| summary.savings.checked_add(amount))
                .ok_or_else(overflow)?;
        }

        summary.total = summary.subtotal;
        summary.display_total = rate.convert(summary.total);
        Ok(summary)
    }
}

fn overflow() -> DomainError {
    DomainError::invariant("cart total overflow")
}
