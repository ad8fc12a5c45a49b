//! # Cart
//!
//! Ordered line items, insertion order is display order. Every mutation writes
//! the whole cart back to storage under [`CART_KEY`]; there is no versioning
//! or merging.
use menu::{LineItem, Price, ValidationError};
use tracing::{debug, warn};

use crate::storage::Storage;

pub const CART_KEY: &str = "cart";

#[derive(Debug)]
pub struct Cart<S> {
    items: Vec<LineItem>,
    storage: S,
}

impl<S: Storage> Cart<S> {
    /// Restores the persisted cart. Absent, unreadable or malformed data all
    /// start an empty cart.
    pub fn load_persisted(storage: S) -> Self {
        let items = match storage.get(CART_KEY) {
            Ok(Some(data)) => serde_json::from_str(&data).unwrap_or_else(|e| {
                warn!("Stored cart is malformed, starting empty: {e}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to read stored cart, starting empty: {e}");
                Vec::new()
            }
        };

        debug!("Restored {} cart items", items.len());
        Self { items, storage }
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total(&self) -> Price {
        menu::order_total(&self.items)
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    pub fn add(&mut self, item: LineItem) {
        self.items.push(item);
        self.persist();
    }

    /// Out-of-range indexes leave the cart untouched.
    pub fn remove_at(&mut self, index: usize) -> Result<LineItem, ValidationError> {
        if index >= self.items.len() {
            return Err(ValidationError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }

        let removed = self.items.remove(index);
        self.persist();

        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Drops one matching entry per submitted item, keeping anything added
    /// while the order was in flight.
    pub fn discard(&mut self, submitted: &[LineItem]) {
        for item in submitted {
            if let Some(position) = self.items.iter().position(|kept| kept == item) {
                self.items.remove(position);
            }
        }

        self.persist();
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.items)
            .map_err(|e| e.to_string())
            .and_then(|data| {
                self.storage
                    .set(CART_KEY, &data)
                    .map_err(|e| e.to_string())
            });

        if let Err(e) = result {
            warn!("Failed to persist cart: {e}");
        }
    }
}
