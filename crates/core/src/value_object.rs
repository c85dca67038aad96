//! Value object trait: equality by value, not identity.
//!
//! Value objects have **no identity**. Two value objects with the same
//! attribute values are equal (`Criteria`, `PriceBracket`, `CartLine`).

/// Marker trait for value objects.
///
/// Value objects are immutable and compared by value. To "modify" one, build a
/// new one.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq)]
/// struct PriceBracket { min: Option<f64>, max: Option<f64> }
///
/// impl ValueObject for PriceBracket {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
