//! Seeded, validated product catalog.

use std::collections::HashMap;

use marketplace_core::{DomainError, DomainResult, Entity, ProductId};

use crate::criteria::Criteria;
use crate::engine::FilterEngine;
use crate::product::Product;

const SEED_JSON: &str = include_str!("../data/products.json");

/// Immutable product list plus an id index.
///
/// Construction validates every record; afterwards the list never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Catalog built from the records embedded at build time.
    pub fn seeded() -> DomainResult<Self> {
        Self::from_json(SEED_JSON)
    }

    pub fn from_json(json: &str) -> DomainResult<Self> {
        let products: Vec<Product> = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("malformed catalog seed: {e}")))?;
        Self::from_products(products)
    }

    pub fn from_products(products: Vec<Product>) -> DomainResult<Self> {
        let mut index = HashMap::with_capacity(products.len());

        for (position, product) in products.iter().enumerate() {
            product.validate()?;
            if index.insert(product.id().clone(), position).is_some() {
                return Err(DomainError::validation(format!(
                    "duplicate product id {}",
                    product.id()
                )));
            }
        }

        tracing::debug!(products = products.len(), "catalog loaded");
        Ok(Self { products, index })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).map(|&i| &self.products[i])
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Distinct categories in first-seen order (feeds the category control).
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for product in &self.products {
            if !categories.contains(&product.category()) {
                categories.push(product.category());
            }
        }
        categories
    }

    pub fn view(&self, engine: &FilterEngine, criteria: &Criteria) -> Vec<&Product> {
        engine.view(&self.products, criteria)
    }
}
