//! `marketplace-storefront`
//!
//! **Responsibility:** application state around the catalog view.
//!
//! - `browser`: current criteria + current result, recomputed on every change
//! - `session`: persisted cart/wishlist/profile over a key-value store
//! - `checkout`: cart pricing (no payment processing)
//! - `config`: environment-driven settings

pub mod browser;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod profile;
pub mod session;
pub mod store;
pub mod wishlist;

pub use browser::CatalogBrowser;
pub use cart::{Cart, CartLine};
pub use checkout::CheckoutSummary;
pub use config::StorefrontConfig;
pub use profile::Profile;
pub use session::SessionStore;
pub use store::{InMemoryStore, KeyValueStore, StoreError};
pub use wishlist::Wishlist;
