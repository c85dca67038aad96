//! Catalog browsing state: current criteria and current result.
//!
//! Every mutation computes the new result from the new criteria and replaces
//! both together, so a browser never exposes a result for stale criteria.

use std::sync::Arc;

use marketplace_catalog::{
    Catalog, CategoryFilter, Condition, Criteria, FilterEngine, PriceBracket, Product, RawCriteria,
    SortKey,
};
use marketplace_core::{Entity, ProductId};

#[derive(Debug, Clone)]
pub struct CatalogBrowser {
    catalog: Arc<Catalog>,
    engine: FilterEngine,
    criteria: Criteria,
    results: Vec<ProductId>,
}

impl CatalogBrowser {
    pub fn new(catalog: Arc<Catalog>, engine: FilterEngine) -> Self {
        let mut browser = Self {
            catalog,
            engine,
            criteria: Criteria::default(),
            results: Vec::new(),
        };
        browser.apply(Criteria::default());
        browser
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn result_ids(&self) -> &[ProductId] {
        &self.results
    }

    /// Current result in display order.
    pub fn results(&self) -> Vec<&Product> {
        self.results
            .iter()
            .filter_map(|id| self.catalog.get(id))
            .collect()
    }

    /// Replace the whole criteria snapshot.
    pub fn apply(&mut self, criteria: Criteria) {
        let results: Vec<ProductId> = self
            .catalog
            .view(&self.engine, &criteria)
            .into_iter()
            .map(|p| p.id().clone())
            .collect();

        self.criteria = criteria;
        self.results = results;
    }

    pub fn apply_raw(&mut self, raw: &RawCriteria) {
        self.apply(Criteria::from_raw(raw));
    }

    pub fn reset(&mut self) {
        self.apply(Criteria::default());
    }

    pub fn set_search(&mut self, search: &str) {
        self.update(|c| c.search = search.to_string());
    }

    pub fn set_category(&mut self, category: &str) {
        self.update(|c| c.category = CategoryFilter::parse(category));
    }

    /// Returns whether the condition is selected afterwards.
    pub fn toggle_condition(&mut self, condition: Condition) -> bool {
        let mut selected = false;
        self.update(|c| {
            selected = c.conditions.insert(condition);
            if !selected {
                c.conditions.remove(&condition);
            }
        });
        selected
    }

    pub fn clear_conditions(&mut self) {
        self.update(|c| c.conditions.clear());
    }

    /// Accepts a bracket id (`under-500`, `500-1000`, `over-2000`) or `all`.
    pub fn set_price_range(&mut self, range: &str) {
        self.set_price(PriceBracket::parse_range_lenient(range));
    }

    pub fn set_price(&mut self, bracket: Option<PriceBracket>) {
        self.update(|c| c.price = bracket);
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.update(|c| c.sort = sort);
    }

    fn update(&mut self, f: impl FnOnce(&mut Criteria)) {
        let mut criteria = self.criteria.clone();
        f(&mut criteria);
        self.apply(criteria);
    }
}
