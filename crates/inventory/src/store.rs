//! Item persistence seam: the `ItemStore` trait plus the in-memory
//! implementation used by the server and tests.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use stockbook_core::{DomainError, DomainResult, ItemId};

use crate::item::{InventoryItem, ItemPatch};

/// Single-collection store for inventory items.
///
/// `apply_stock_deltas` is the engine's transactional boundary: deltas are
/// aggregated per item and applied all-or-nothing, with every resulting
/// quantity checked against zero under the same lock that commits the write.
pub trait ItemStore: Send + Sync {
    fn get(&self, id: &ItemId) -> Option<InventoryItem>;
    fn list(&self) -> Vec<InventoryItem>;
    fn insert(&self, item: InventoryItem);
    fn update(&self, id: &ItemId, patch: &ItemPatch, now: DateTime<Utc>)
    -> DomainResult<InventoryItem>;
    fn remove(&self, id: &ItemId) -> DomainResult<()>;
    /// Case-insensitive substring search over name and description.
    fn search(&self, query: &str) -> Vec<InventoryItem>;
    /// Conditionally adjust stock for several items at once.
    ///
    /// Fails with `NotFound` if any referenced item is absent and with
    /// `InsufficientStock` if any resulting quantity would go negative; on
    /// failure no quantity is changed.
    fn apply_stock_deltas(&self, deltas: &[(ItemId, i64)], now: DateTime<Utc>) -> DomainResult<()>;
}

impl<S> ItemStore for Arc<S>
where
    S: ItemStore + ?Sized,
{
    fn get(&self, id: &ItemId) -> Option<InventoryItem> {
        (**self).get(id)
    }

    fn list(&self) -> Vec<InventoryItem> {
        (**self).list()
    }

    fn insert(&self, item: InventoryItem) {
        (**self).insert(item)
    }

    fn update(
        &self,
        id: &ItemId,
        patch: &ItemPatch,
        now: DateTime<Utc>,
    ) -> DomainResult<InventoryItem> {
        (**self).update(id, patch, now)
    }

    fn remove(&self, id: &ItemId) -> DomainResult<()> {
        (**self).remove(id)
    }

    fn search(&self, query: &str) -> Vec<InventoryItem> {
        (**self).search(query)
    }

    fn apply_stock_deltas(&self, deltas: &[(ItemId, i64)], now: DateTime<Utc>) -> DomainResult<()> {
        (**self).apply_stock_deltas(deltas, now)
    }
}

/// In-memory item store (RwLock'd map).
#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    inner: RwLock<HashMap<ItemId, InventoryItem>>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ItemStore for InMemoryItemStore {
    fn get(&self, id: &ItemId) -> Option<InventoryItem> {
        let map = self.inner.read().ok()?;
        map.get(id).cloned()
    }

    fn list(&self) -> Vec<InventoryItem> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        let mut items: Vec<_> = map.values().cloned().collect();
        // Stable listing order: creation order (UUIDv7 is time-ordered).
        items.sort_by_key(|i| *i.id.as_uuid());
        items
    }

    fn insert(&self, item: InventoryItem) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(item.id, item);
        }
    }

    fn update(
        &self,
        id: &ItemId,
        patch: &ItemPatch,
        now: DateTime<Utc>,
    ) -> DomainResult<InventoryItem> {
        patch.validate()?;
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::validation("item store lock poisoned"))?;
        let item = map
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(format!("item {id}")))?;
        patch.apply_to(item, now);
        Ok(item.clone())
    }

    fn remove(&self, id: &ItemId) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::validation("item store lock poisoned"))?;
        map.remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(format!("item {id}")))
    }

    fn search(&self, query: &str) -> Vec<InventoryItem> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        let mut items: Vec<_> = map
            .values()
            .filter(|i| i.matches_query(query))
            .cloned()
            .collect();
        items.sort_by_key(|i| *i.id.as_uuid());
        items
    }

    fn apply_stock_deltas(&self, deltas: &[(ItemId, i64)], now: DateTime<Utc>) -> DomainResult<()> {
        // Aggregate per item: a sale may reference the same item in several lines.
        let mut net: HashMap<ItemId, i64> = HashMap::new();
        for (id, delta) in deltas {
            *net.entry(*id).or_insert(0) += delta;
        }

        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::validation("item store lock poisoned"))?;

        // Validate every line before touching any quantity.
        for (id, delta) in &net {
            let item = map
                .get(id)
                .ok_or_else(|| DomainError::not_found(format!("item {id}")))?;
            if item.quantity + delta < 0 {
                return Err(DomainError::insufficient_stock(item.name.clone()));
            }
        }

        for (id, delta) in &net {
            if let Some(item) = map.get_mut(id) {
                item.quantity += delta;
                item.updated_at = now;
            }
        }

        Ok(())
    }
}
