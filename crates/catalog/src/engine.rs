//! Catalog filter/sort engine.
//!
//! `view(products, criteria)` is a pure function: it keeps the products that
//! pass every active filter (logical AND), then orders them with a stable sort.
//! Source records are only borrowed.

use crate::criteria::{Criteria, SortKey};
use crate::currency::ExchangeRate;
use crate::product::Product;

/// Derives the rendered view of a product list.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterEngine {
    rate: ExchangeRate,
}

impl FilterEngine {
    pub fn new(rate: ExchangeRate) -> Self {
        Self { rate }
    }

    pub fn rate(&self) -> ExchangeRate {
        self.rate
    }

    /// Filtered and ordered subset of `products`.
    pub fn view<'a>(&self, products: &'a [Product], criteria: &Criteria) -> Vec<&'a Product> {
        let needle = criteria.search.to_lowercase();

        let mut view: Vec<&Product> = products
            .iter()
            .filter(|p| self.passes(p, criteria, &needle))
            .collect();

        sort_view(&mut view, criteria.sort);

        tracing::debug!(
            total = products.len(),
            matched = view.len(),
            sort = %criteria.sort,
            "computed catalog view"
        );

        view
    }

    /// Whether a single product passes every active filter in `criteria`.
    pub fn matches(&self, product: &Product, criteria: &Criteria) -> bool {
        self.passes(product, criteria, &criteria.search.to_lowercase())
    }

    /// Price in display units.
    pub fn display_price(&self, product: &Product) -> f64 {
        self.rate.convert(product.price())
    }

    fn passes(&self, product: &Product, criteria: &Criteria, needle: &str) -> bool {
        matches_search(product, needle)
            && criteria.category.matches(product.category())
            && (criteria.conditions.is_empty() || criteria.conditions.contains(&product.condition()))
            && criteria
                .price
                .is_none_or(|bracket| bracket.contains(self.display_price(product)))
    }
}

/// `needle` must already be lowercased.
fn matches_search(product: &Product, needle: &str) -> bool {
    needle.is_empty()
        || product.title().to_lowercase().contains(needle)
        || product.category().to_lowercase().contains(needle)
}

// `sort_by` is stable, so equal keys keep their input order.
fn sort_view(view: &mut [&Product], key: SortKey) {
    match key {
        SortKey::Relevance => {}
        SortKey::PriceAscending => view.sort_by_key(|p| p.price()),
        SortKey::PriceDescending => view.sort_by(|a, b| b.price().cmp(&a.price())),
        SortKey::RatingDescending => view.sort_by(|a, b| b.rating().total_cmp(&a.rating())),
        SortKey::Newest => view.sort_by(|a, b| b.recency_key().cmp(&a.recency_key())),
        SortKey::DiscountDescending => {
            view.sort_by(|a, b| b.discount_percent().cmp(&a.discount_percent()))
        }
    }
}
