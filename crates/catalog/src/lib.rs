//! Catalog domain module.
//!
//! Holds the statically seeded product records and the filter/sort engine that
//! derives the ordered view the storefront renders. Everything here is
//! deterministic domain logic (no IO beyond parsing the embedded seed).

pub mod criteria;
pub mod currency;
pub mod engine;
pub mod product;
pub mod seed;

pub use criteria::{CategoryFilter, Criteria, PriceBracket, RawCriteria, SortKey};
pub use currency::ExchangeRate;
pub use engine::FilterEngine;
pub use product::{Condition, Product, RecencyKey};
pub use seed::Catalog;
