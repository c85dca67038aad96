//! Persisted session state with an explicit key schema.
//!
//! Only the values under [`keys`] are persisted. Everything derived from them
//! (catalog view, checkout totals) is recomputed and never stored.

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;

use marketplace_core::DomainResult;

use crate::cart::Cart;
use crate::profile::Profile;
use crate::store::{KeyValueStore, StoreError};
use crate::wishlist::Wishlist;

pub mod keys {
    pub const CART: &str = "marketplace.cart";
    pub const WISHLIST: &str = "marketplace.wishlist";
    pub const PROFILE: &str = "marketplace.profile";

    pub const ALL: [&str; 3] = [CART, WISHLIST, PROFILE];
}

/// Typed access to the session keys of a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn cart(&self) -> Cart {
        self.load(keys::CART)
    }

    pub fn save_cart(&self, cart: &Cart) -> Result<(), StoreError> {
        self.save(keys::CART, cart)
    }

    /// Load, modify and save the cart. Nothing is saved if `f` fails.
    pub fn update_cart<R>(
        &self,
        f: impl FnOnce(&mut Cart) -> DomainResult<R>,
    ) -> Result<R, StoreError> {
        let mut cart = self.cart();
        let out = f(&mut cart)?;
        self.save_cart(&cart)?;
        Ok(out)
    }

    pub fn wishlist(&self) -> Wishlist {
        self.load(keys::WISHLIST)
    }

    pub fn save_wishlist(&self, wishlist: &Wishlist) -> Result<(), StoreError> {
        self.save(keys::WISHLIST, wishlist)
    }

    /// Load, modify and save the wishlist. Nothing is saved if `f` fails.
    pub fn update_wishlist<R>(
        &self,
        f: impl FnOnce(&mut Wishlist) -> DomainResult<R>,
    ) -> Result<R, StoreError> {
        let mut wishlist = self.wishlist();
        let out = f(&mut wishlist)?;
        self.save_wishlist(&wishlist)?;
        Ok(out)
    }

    /// `None` when signed out.
    pub fn profile(&self) -> Option<Profile> {
        self.load(keys::PROFILE)
    }

    pub fn sign_in(&self, display_name: &str, email: &str) -> Result<Profile, StoreError> {
        let profile = Profile::sign_in(display_name, email, Utc::now())?;
        self.save(keys::PROFILE, &profile)?;
        tracing::info!(session_id = %profile.session_id, "signed in");
        Ok(profile)
    }

    pub fn sign_out(&self) -> Result<(), StoreError> {
        self.store.remove(keys::PROFILE)
    }

    /// Remove every session key.
    pub fn clear(&self) -> Result<(), StoreError> {
        for key in keys::ALL {
            self.store.remove(key)?;
        }
        Ok(())
    }

    /// Missing keys load as the default; corrupt values are logged and also
    /// load as the default.
    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let Some(raw) = self.store.get(key) else {
            return T::default();
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, error = %err, "discarding unreadable session value");
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::Serialize {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        self.store.set(key, raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::store::InMemoryStore;
    use marketplace_catalog::{Condition, Product};
    use marketplace_core::{DomainError, ProductId};

    fn session() -> (Arc<InMemoryStore>, SessionStore<Arc<InMemoryStore>>) {
        let store = Arc::new(InMemoryStore::new());
        (Arc::clone(&store), SessionStore::new(store))
    }

    fn phone() -> Product {
        Product::new(ProductId::new("1").unwrap(), "iPhone", 699, Condition::LikeNew, 4.8, "smartphones")
    }

    #[test]
    fn missing_keys_load_as_defaults() {
        let (_, session) = session();
        assert!(session.cart().is_empty());
        assert!(session.wishlist().is_empty());
        assert!(session.profile().is_none());
    }

    #[test]
    fn cart_persists_across_store_handles() {
        let (store, session) = session();
        session.update_cart(|cart| cart.add(&phone(), 2)).unwrap();

        let reopened = SessionStore::new(store);
        assert_eq!(reopened.cart().item_count().unwrap(), 2);
    }

    #[test]
    fn failed_update_saves_nothing() {
        let (store, session) = session();
        let err = session.update_cart(|cart| cart.add(&phone(), 0)).unwrap_err();

        assert!(matches!(err, StoreError::Domain(DomainError::Validation(_))));
        assert!(store.get(keys::CART).is_none());
    }

    #[test]
    fn corrupt_value_loads_as_default() {
        let (store, session) = session();
        store.set(keys::CART, "{not json".to_string()).unwrap();
        store.set(keys::WISHLIST, "42".to_string()).unwrap();

        assert!(session.cart().is_empty());
        assert!(session.wishlist().is_empty());
    }

    #[test]
    fn cart_breaking_line_rules_loads_as_default() {
        let (store, session) = session();

        store
            .set(keys::CART, r#"{"lines":[{"product_id":"1","quantity":0}]}"#.to_string())
            .unwrap();
        assert!(session.cart().is_empty());

        store
            .set(
                keys::CART,
                r#"{"lines":[{"product_id":"1","quantity":2},{"product_id":"1","quantity":3}]}"#.to_string(),
            )
            .unwrap();
        assert!(session.cart().is_empty());

        store
            .set(
                keys::CART,
                r#"{"lines":[{"product_id":"1","quantity":0},{"product_id":"1","quantity":3}]}"#.to_string(),
            )
            .unwrap();
        assert!(session.cart().is_empty());
    }

    #[test]
    fn wishlist_toggle_persists() {
        let (_, session) = session();
        let id = ProductId::new("4").unwrap();

        let saved = session.update_wishlist(|w| Ok(w.toggle(&id))).unwrap();
        assert!(saved);
        assert!(session.wishlist().contains(&id));
    }

    #[test]
    fn sign_in_and_out() {
        let (_, session) = session();
        let profile = session.sign_in("Asha", "asha@example.com").unwrap();

        assert_eq!(session.profile(), Some(profile));

        session.sign_out().unwrap();
        assert!(session.profile().is_none());
    }

    #[test]
    fn sign_in_validation_error_is_surfaced() {
        let (_, session) = session();
        let err = session.sign_in("", "asha@example.com").unwrap_err();
        assert!(matches!(err, StoreError::Domain(DomainError::Validation(_))));
        assert!(session.profile().is_none());
    }

    #[test]
    fn clear_removes_every_key() {
        let (store, session) = session();
        session.update_cart(|cart| cart.add(&phone(), 1)).unwrap();
        session.update_wishlist(|w| Ok(w.toggle(&ProductId::new("1").unwrap()))).unwrap();
        session.sign_in("Asha", "asha@example.com").unwrap();

        session.clear().unwrap();

        for key in keys::ALL {
            assert!(store.get(key).is_none(), "{key} should be cleared");
        }
    }
}
