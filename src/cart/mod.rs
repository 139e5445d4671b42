// src/cart/mod.rs
pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore};

use tracing::{debug, warn};

use crate::error::CartError;
use crate::schema::CanonicalRecord;

/// A record copied into the cart. Never mutated after it is added.
pub type CartItem = CanonicalRecord;

/// True if some item in `items` has exactly this `(course, section)` pair.
pub fn contains(items: &[CartItem], course: &str, section: &str) -> bool {
    items.iter().any(|i| i.is_offering(course, section))
}

/// The user's selection, persisted as a JSON array under one storage key.
///
/// Nothing is cached: every call reads the backing store, so carts opened by
/// different pages on the same store see each other's writes.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current items in insertion order. Unreadable or undecodable storage
    /// reads as an empty cart.
    pub fn list(&self) -> Vec<CartItem> {
        self.load().unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "cart storage unreadable, treating as empty");
            Vec::new()
        })
    }

    /// Stored items for a read-modify-write. A failed read is an error, but a
    /// value that does not decode reads as empty.
    fn load(&self) -> Result<Vec<CartItem>, CartError> {
        let Some(raw) = self.store.get(&self.key).map_err(CartError::StorageRead)? else {
            return Ok(Vec::new());
        };

        // `null` is what an earlier page may have stored for "no cart".
        match serde_json::from_str::<Option<Vec<CartItem>>>(&raw) {
            Ok(items) => Ok(items.unwrap_or_default()),
            Err(e) => {
                warn!(key = %self.key, error = %e, "cart storage corrupt, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    pub fn contains(&self, course: &str, section: &str) -> bool {
        contains(&self.list(), course, section)
    }

    /// Append a snapshot of `record`.
    ///
    /// Returns `Ok(false)` without writing when the `(course, section)` pair
    /// is already present. On error nothing was committed, including when the
    /// stored cart could not be read.
    pub fn add(&self, record: &CanonicalRecord) -> Result<bool, CartError> {
        let mut items = self.load()?;
        if contains(&items, &record.course, &record.section) {
            debug!(course = %record.course, section = %record.section, "already in cart");
            return Ok(false);
        }
        items.push(record.clone());
        self.save(&items)?;
        Ok(true)
    }

    /// Empty the cart.
    pub fn clear(&self) -> Result<(), CartError> {
        self.save(&[])
    }

    fn save(&self, items: &[CartItem]) -> Result<(), CartError> {
        let json = serde_json::to_string(items)?;
        self.store.set(&self.key, &json)?;
        debug!(key = %self.key, items = items.len(), "cart saved");
        Ok(())
    }
}
