use core::str::FromStr;

use serde::{Deserialize, Serialize};

use marketplace_core::{DomainError, Entity, ProductId};

/// Item condition (closed set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Condition {
    New,
    LikeNew,
    Good,
    Fair,
}

impl Condition {
    pub const ALL: [Condition; 4] = [
        Condition::New,
        Condition::LikeNew,
        Condition::Good,
        Condition::Fair,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::LikeNew => "like-new",
            Condition::Good => "good",
            Condition::Fair => "fair",
        }
    }
}

impl core::fmt::Display for Condition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "new" => Ok(Condition::New),
            "like-new" | "like_new" | "like new" => Ok(Condition::LikeNew),
            "good" => Ok(Condition::Good),
            "fair" => Ok(Condition::Fair),
            _ => Err(DomainError::unrecognized("condition", s)),
        }
    }
}

/// Ordering key for the "newest" sort.
///
/// Numeric ids compare numerically and rank below textual ids, which compare
/// lexicographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RecencyKey<'a> {
    Numeric(u64),
    Text(&'a str),
}

/// Catalog record (read-only once seeded).
///
/// Prices are whole units of the catalog's base currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    title: String,
    price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    original_price: Option<u64>,
    condition: Condition,
    rating: f64,
    category: String,
    #[serde(default)]
    is_verified: bool,
    #[serde(default)]
    description: String,
}

impl Product {
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        price: u64,
        condition: Condition,
        rating: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            original_price: None,
            condition,
            rating,
            category: category.into(),
            is_verified: false,
            description: String::new(),
        }
    }

    pub fn with_original_price(mut self, original_price: u64) -> Self {
        self.original_price = Some(original_price);
        self
    }

    pub fn verified(mut self) -> Self {
        self.is_verified = true;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn original_price(&self) -> Option<u64> {
        self.original_price
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn is_verified(&self) -> bool {
        self.is_verified
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whole-percent discount off the original price.
    ///
    /// `round((original - price) / original * 100)`, or 0 when there is no
    /// original price or it does not exceed the current price.
    pub fn discount_percent(&self) -> u32 {
        match self.original_price {
            Some(original) if original > self.price => {
                let saved = (original - self.price) as f64;
                (saved / original as f64 * 100.0).round() as u32
            }
            _ => 0,
        }
    }

    /// Amount saved against the original price (0 when not discounted).
    pub fn savings(&self) -> u64 {
        self.original_price
            .map(|original| original.saturating_sub(self.price))
            .unwrap_or(0)
    }

    pub fn recency_key(&self) -> RecencyKey<'_> {
        match self.id.as_number() {
            Some(n) => RecencyKey::Numeric(n),
            None => RecencyKey::Text(self.id.as_str()),
        }
    }

    /// Check the record-level invariants enforced when the catalog is seeded.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.as_str().trim().is_empty() {
            return Err(DomainError::validation("product id cannot be empty"));
        }

        if self.title.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "product {}: title cannot be empty",
                self.id
            )));
        }

        if let Some(original) = self.original_price {
            if original < self.price {
                return Err(DomainError::validation(format!(
                    "product {}: original price {original} is below price {}",
                    self.id, self.price
                )));
            }
        }

        if !(self.rating.is_finite() && (0.0..=5.0).contains(&self.rating)) {
            return Err(DomainError::validation(format!(
                "product {}: rating {} outside [0, 5]",
                self.id, self.rating
            )));
        }

        Ok(())
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ProductId {
        ProductId::new(s).unwrap()
    }

    fn phone() -> Product {
        Product::new(id("1"), "iPhone 13 Pro", 699, Condition::LikeNew, 4.8, "smartphones")
            .with_original_price(999)
    }

    #[test]
    fn discount_is_rounded_percentage_of_original() {
        assert_eq!(phone().discount_percent(), 30);

        let laptop = Product::new(id("2"), "MacBook Air", 849, Condition::Good, 4.6, "laptops")
            .with_original_price(999);
        assert_eq!(laptop.discount_percent(), 15);
    }

    #[test]
    fn discount_is_zero_without_markdown() {
        let plain = Product::new(id("3"), "Pixel 7", 450, Condition::Good, 4.2, "smartphones");
        assert_eq!(plain.discount_percent(), 0);

        let same = plain.clone().with_original_price(450);
        assert_eq!(same.discount_percent(), 0);
        assert_eq!(same.savings(), 0);
    }

    #[test]
    fn savings_is_difference_to_original() {
        assert_eq!(phone().savings(), 300);
    }

    #[test]
    fn condition_parses_kebab_case_and_aliases() {
        assert_eq!("like-new".parse::<Condition>().unwrap(), Condition::LikeNew);
        assert_eq!("Like_New".parse::<Condition>().unwrap(), Condition::LikeNew);
        assert_eq!(" FAIR ".parse::<Condition>().unwrap(), Condition::Fair);
        assert!(matches!(
            "mint".parse::<Condition>(),
            Err(DomainError::Unrecognized { kind: "condition", .. })
        ));
    }

    #[test]
    fn recency_key_orders_numbers_numerically() {
        let nine = Product::new(id("9"), "a", 1, Condition::New, 1.0, "x");
        let ten = Product::new(id("10"), "b", 1, Condition::New, 1.0, "x");
        let text = Product::new(id("abc"), "c", 1, Condition::New, 1.0, "x");

        assert!(nine.recency_key() < ten.recency_key());
        assert!(ten.recency_key() < text.recency_key());
    }

    #[test]
    fn validate_rejects_original_below_price() {
        let bad = Product::new(id("4"), "Galaxy S22", 500, Condition::Good, 4.0, "smartphones")
            .with_original_price(400);
        assert!(matches!(bad.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn validate_rejects_rating_out_of_range() {
        let bad = Product::new(id("5"), "iPad", 300, Condition::New, 5.5, "tablets");
        assert!(matches!(bad.validate(), Err(DomainError::Validation(_))));

        let nan = Product::new(id("6"), "iPad", 300, Condition::New, f64::NAN, "tablets");
        assert!(nan.validate().is_err());
    }

    #[test]
    fn validate_rejects_blank_title() {
        let bad = Product::new(id("7"), "   ", 300, Condition::New, 4.0, "tablets");
        assert!(matches!(bad.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn deserializes_camel_case_record() {
        let json = r#"{
            "id": "1",
            "title": "iPhone 13 Pro",
            "price": 699,
            "originalPrice": 999,
            "condition": "like-new",
            "rating": 4.8,
            "category": "smartphones",
            "isVerified": true
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id().as_str(), "1");
        assert_eq!(product.original_price(), Some(999));
        assert_eq!(product.condition(), Condition::LikeNew);
        assert!(product.is_verified());
        assert_eq!(product.description(), "");

        let built = Product::new(id("1"), "iPhone 13 Pro", 699, Condition::LikeNew, 4.8, "smartphones")
            .with_original_price(999)
            .verified();
        assert_eq!(product, built);
    }
}
