//! Filter criteria and sort keys.
//!
//! Every value here has a strict `FromStr` (errors on unknown input) and a
//! lenient counterpart used when criteria arrive from UI controls. Lenient
//! parsing never fails: unknown values fall back to the permissive default so
//! the full catalog stays visible.

use core::str::FromStr;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use marketplace_core::{DomainError, ValueObject};

use crate::product::Condition;

/// Sentinel used by the category and price controls to disable the filter.
pub const ALL: &str = "all";

/// Category filter: the `all` sentinel or an exact category key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Exact(String),
}

impl CategoryFilter {
    /// Category keys are taken verbatim; surrounding whitespace is not stripped.
    pub fn parse(s: &str) -> Self {
        if s.is_empty() || s.eq_ignore_ascii_case(ALL) {
            CategoryFilter::All
        } else {
            CategoryFilter::Exact(s.to_string())
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Exact(wanted) => wanted == category,
        }
    }
}

/// Named price interval over display-currency amounts.
///
/// The lower bound is inclusive, the upper bound exclusive:
/// - `under-X` is `p < X`
/// - `X-Y` is `X <= p < Y`
/// - `over-Z` is `p >= Z`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBracket {
    min: Option<u64>,
    max: Option<u64>,
}

impl ValueObject for PriceBracket {}

impl PriceBracket {
    pub fn under(max: u64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn over(min: u64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn between(min: u64, max: u64) -> Result<Self, DomainError> {
        if min >= max {
            return Err(DomainError::validation(format!(
                "price bracket lower bound {min} must be below upper bound {max}"
            )));
        }
        Ok(Self {
            min: Some(min),
            max: Some(max),
        })
    }

    pub fn min(&self) -> Option<u64> {
        self.min
    }

    pub fn max(&self) -> Option<u64> {
        self.max
    }

    pub fn contains(&self, amount: f64) -> bool {
        let above_min = self.min.is_none_or(|min| amount >= min as f64);
        let below_max = self.max.is_none_or(|max| amount < max as f64);
        above_min && below_max
    }

    /// Parse a price-range control value; `all` (or empty) disables the filter.
    pub fn parse_range(s: &str) -> Result<Option<Self>, DomainError> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(ALL) {
            return Ok(None);
        }
        s.parse().map(Some)
    }

    /// Lenient variant of [`PriceBracket::parse_range`]: unknown ids disable the filter.
    pub fn parse_range_lenient(s: &str) -> Option<Self> {
        match Self::parse_range(s) {
            Ok(bracket) => bracket,
            Err(err) => {
                tracing::debug!(value = s, error = %err, "ignoring unrecognized price range");
                None
            }
        }
    }
}

impl core::fmt::Display for PriceBracket {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match (self.min, self.max) {
            (None, Some(max)) => write!(f, "under-{max}"),
            (Some(min), None) => write!(f, "over-{min}"),
            (Some(min), Some(max)) => write!(f, "{min}-{max}"),
            (None, None) => f.write_str(ALL),
        }
    }
}

impl FromStr for PriceBracket {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        let bound = |v: &str| {
            v.parse::<u64>()
                .map_err(|_| DomainError::unrecognized("price range", s))
        };

        if let Some(max) = normalized.strip_prefix("under-") {
            return Ok(Self::under(bound(max)?));
        }
        if let Some(min) = normalized.strip_prefix("over-") {
            return Ok(Self::over(bound(min)?));
        }
        match normalized.split_once('-') {
            Some((min, max)) => Self::between(bound(min)?, bound(max)?)
                .map_err(|_| DomainError::unrecognized("price range", s)),
            None => Err(DomainError::unrecognized("price range", s)),
        }
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Input (seed) order.
    #[default]
    Relevance,
    PriceAscending,
    PriceDescending,
    RatingDescending,
    Newest,
    DiscountDescending,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::PriceAscending => "price-ascending",
            SortKey::PriceDescending => "price-descending",
            SortKey::RatingDescending => "rating-descending",
            SortKey::Newest => "newest",
            SortKey::DiscountDescending => "discount-descending",
        }
    }

    /// Parse a sort control value, falling back to relevance for unknown keys.
    pub fn parse_lenient(s: &str) -> Self {
        match s.parse() {
            Ok(key) => key,
            Err(err) => {
                tracing::debug!(value = s, error = %err, "unrecognized sort key; using relevance");
                SortKey::Relevance
            }
        }
    }
}

impl core::fmt::Display for SortKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "relevance" | "featured" => Ok(SortKey::Relevance),
            "price-ascending" | "price-asc" | "price-low" => Ok(SortKey::PriceAscending),
            "price-descending" | "price-desc" | "price-high" => Ok(SortKey::PriceDescending),
            "rating-descending" | "rating" => Ok(SortKey::RatingDescending),
            "newest" => Ok(SortKey::Newest),
            "discount-descending" | "discount" => Ok(SortKey::DiscountDescending),
            _ => Err(DomainError::unrecognized("sort key", s)),
        }
    }
}

/// Active filter selections plus the chosen sort key.
///
/// The default value filters nothing and keeps input order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Criteria {
    pub search: String,
    pub category: CategoryFilter,
    /// Empty means every condition passes.
    pub conditions: BTreeSet<Condition>,
    /// `None` means every price passes.
    pub price: Option<PriceBracket>,
    pub sort: SortKey,
}

impl ValueObject for Criteria {}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = CategoryFilter::parse(category);
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.insert(condition);
        self
    }

    pub fn with_price(mut self, bracket: PriceBracket) -> Self {
        self.price = Some(bracket);
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Build criteria from raw control values, defaulting anything unknown.
    pub fn from_raw(raw: &RawCriteria) -> Self {
        let conditions = raw
            .conditions
            .iter()
            .filter_map(|c| match c.parse::<Condition>() {
                Ok(condition) => Some(condition),
                Err(err) => {
                    tracing::debug!(value = %c, error = %err, "dropping unrecognized condition");
                    None
                }
            })
            .collect();

        Self {
            search: raw.search.clone(),
            category: CategoryFilter::parse(&raw.category),
            conditions,
            price: PriceBracket::parse_range_lenient(&raw.price_range),
            sort: SortKey::parse_lenient(&raw.sort_key),
        }
    }
}

impl From<&RawCriteria> for Criteria {
    fn from(raw: &RawCriteria) -> Self {
        Self::from_raw(raw)
    }
}

/// Criteria as plain strings, the shape UI controls (or the CLI) hand over.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawCriteria {
    #[serde(alias = "searchText")]
    pub search: String,
    pub category: String,
    pub conditions: Vec<String>,
    pub price_range: String,
    pub sort_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_sentinel_disables_filter() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(""), CategoryFilter::All);
        assert!(CategoryFilter::All.matches("anything"));
    }

    #[test]
    fn category_match_is_exact() {
        let filter = CategoryFilter::parse("laptops");
        assert!(filter.matches("laptops"));
        assert!(!filter.matches("Laptops"));
        assert!(!filter.matches("laptops-gaming"));
    }

    #[test]
    fn category_whitespace_is_not_stripped() {
        let padded = CategoryFilter::parse(" laptops ");
        assert_eq!(padded, CategoryFilter::Exact(" laptops ".to_string()));
        assert!(!padded.matches("laptops"));
    }

    #[test]
    fn bracket_bounds_are_half_open() {
        let mid: PriceBracket = "500-1000".parse().unwrap();
        assert!(!mid.contains(499.99));
        assert!(mid.contains(500.0));
        assert!(mid.contains(999.99));
        assert!(!mid.contains(1000.0));

        let under: PriceBracket = "under-500".parse().unwrap();
        assert!(under.contains(0.0));
        assert!(!under.contains(500.0));

        let over: PriceBracket = "over-2000".parse().unwrap();
        assert!(over.contains(2000.0));
        assert!(!over.contains(1999.0));
    }

    #[test]
    fn bracket_display_round_trips_name() {
        for name in ["under-500", "500-1000", "over-2000"] {
            let bracket: PriceBracket = name.parse().unwrap();
            assert_eq!(bracket.to_string(), name);
        }
    }

    #[test]
    fn bracket_rejects_malformed_names() {
        for name in ["cheap", "under-", "over-abc", "1000-500", "500-500", "1-2-3"] {
            assert!(name.parse::<PriceBracket>().is_err(), "{name} should not parse");
        }
    }

    #[test]
    fn price_range_all_disables_filter() {
        assert_eq!(PriceBracket::parse_range("all").unwrap(), None);
        assert_eq!(PriceBracket::parse_range_lenient("bogus"), None);
        assert_eq!(
            PriceBracket::parse_range_lenient("under-500"),
            Some(PriceBracket::under(500))
        );
    }

    #[test]
    fn sort_key_accepts_canonical_names_and_aliases() {
        assert_eq!("price-ascending".parse::<SortKey>().unwrap(), SortKey::PriceAscending);
        assert_eq!("price-low".parse::<SortKey>().unwrap(), SortKey::PriceAscending);
        assert_eq!("Rating".parse::<SortKey>().unwrap(), SortKey::RatingDescending);
        assert_eq!("discount".parse::<SortKey>().unwrap(), SortKey::DiscountDescending);
        assert!("bogus".parse::<SortKey>().is_err());
    }

    #[test]
    fn unknown_sort_key_falls_back_to_relevance() {
        assert_eq!(SortKey::parse_lenient("bogus"), SortKey::Relevance);
    }

    #[test]
    fn from_raw_defaults_unknown_values() {
        let raw = RawCriteria {
            search: "iphone".to_string(),
            category: "all".to_string(),
            conditions: vec!["like-new".to_string(), "mint".to_string()],
            price_range: "cheap".to_string(),
            sort_key: "bogus".to_string(),
        };

        let criteria = Criteria::from_raw(&raw);
        assert_eq!(criteria.search, "iphone");
        assert_eq!(criteria.category, CategoryFilter::All);
        assert_eq!(criteria.conditions, BTreeSet::from([Condition::LikeNew]));
        assert_eq!(criteria.price, None);
        assert_eq!(criteria.sort, SortKey::Relevance);
    }

    #[test]
    fn raw_criteria_deserializes_with_missing_fields() {
        let raw: RawCriteria =
            serde_json::from_str(r#"{"searchText":"mac","sortKey":"newest"}"#).unwrap();
        assert_eq!(raw.search, "mac");
        assert_eq!(raw.sort_key, "newest");
        assert!(raw.conditions.is_empty());

        let criteria = Criteria::from(&raw);
        assert_eq!(criteria.sort, SortKey::Newest);
        assert_eq!(criteria.category, CategoryFilter::All);
    }
}
