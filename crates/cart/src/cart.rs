//! The cart manager.
//!
//! All operations are synchronous and best-effort against the injected
//! store: absence of usable storage degrades to an always-empty cart, never
//! an error. Derived values (count, total) are recomputed from the persisted
//! sequence on every read.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ampunv_catalog::Furniture;
use ampunv_core::{FurnitureId, KeyValueStore, Price};

use crate::notify::{CartSubscription, ChangeChannel};

/// Storage key holding the serialized cart.
pub const CART_KEY: &str = "cart";

/// One listing the visitor intends to buy, snapshotted at add time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub furniture: Furniture,
    pub added_at: DateTime<Utc>,
}

/// Ordered set of cart items over an injected persisted store.
///
/// Insertion order is preserved; at most one item per furniture id. Writes
/// from other holders of the same store are last-write-wins.
pub struct CartManager {
    store: Arc<dyn KeyValueStore>,
    channel: ChangeChannel,
}

impl CartManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            channel: ChangeChannel::default(),
        }
    }

    /// The current cart. Empty if nothing is persisted or the persisted
    /// value is unreadable. Never fails.
    pub fn items(&self) -> Vec<CartItem> {
        let Some(raw) = self.store.get(CART_KEY) else {
            return Vec::new();
        };
        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(err) => {
                tracing::warn!(%err, "persisted cart unreadable; reading as empty");
                Vec::new()
            }
        }
    }

    /// Add a listing. Returns `false` without mutating state when an item
    /// with the same furniture id already exists: each listing is a unique
    /// physical object, so a second add is a duplicate purchase attempt.
    pub fn add(&self, furniture: Furniture) -> bool {
        let mut items = self.items();
        if items.iter().any(|item| item.furniture.id == furniture.id) {
            return false;
        }

        items.push(CartItem {
            furniture,
            added_at: Utc::now(),
        });
        self.persist(&items);
        self.channel.publish();
        true
    }

    /// Remove by id. An absent id leaves the sequence unchanged (no error);
    /// the write and the notification still happen.
    pub fn remove(&self, furniture_id: FurnitureId) {
        let mut items = self.items();
        items.retain(|item| item.furniture.id != furniture_id);
        self.persist(&items);
        self.channel.publish();
    }

    /// Empty the cart unconditionally.
    pub fn clear(&self) {
        self.store.remove(CART_KEY);
        self.channel.publish();
    }

    pub fn count(&self) -> usize {
        self.items().len()
    }

    /// Plain linear sum of item prices. Recomputed on every call.
    pub fn total(&self) -> Price {
        self.items().iter().map(|item| item.furniture.price).sum()
    }

    pub fn contains(&self, furniture_id: FurnitureId) -> bool {
        self.items()
            .iter()
            .any(|item| item.furniture.id == furniture_id)
    }

    /// Register a view for change notifications. Signals carry no payload;
    /// re-read through `items()`/`total()`/`count()` on receipt.
    pub fn subscribe(&self) -> CartSubscription {
        self.channel.subscribe()
    }

    fn persist(&self, items: &[CartItem]) {
        match serde_json::to_string(items) {
            Ok(json) => self.store.set(CART_KEY, &json),
            Err(err) => tracing::error!(%err, "failed to serialize cart; write skipped"),
        }
    }
}

impl core::fmt::Debug for CartManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CartManager").field("count", &self.count()).finish()
    }
}
