//! Sale persistence seam: trait plus the in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use stockbook_core::{CustomerId, DomainError, DomainResult, SaleId};

use crate::sale::Sale;

/// Single-collection store for sale records.
pub trait SaleStore: Send + Sync {
    fn get(&self, id: &SaleId) -> Option<Sale>;
    fn list(&self) -> Vec<Sale>;
    fn insert(&self, sale: Sale);
    /// Whole-record replacement keyed by `sale.id`.
    fn replace(&self, sale: Sale) -> DomainResult<()>;
    fn remove(&self, id: &SaleId) -> DomainResult<()>;
    fn list_for_customer(&self, customer_id: &CustomerId) -> Vec<Sale>;
    /// Sales with `start <= date <= end`.
    fn list_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Sale>;
}

impl<S> SaleStore for Arc<S>
where
    S: SaleStore + ?Sized,
{
    fn get(&self, id: &SaleId) -> Option<Sale> {
        (**self).get(id)
    }

    fn list(&self) -> Vec<Sale> {
        (**self).list()
    }

    fn insert(&self, sale: Sale) {
        (**self).insert(sale)
    }

    fn replace(&self, sale: Sale) -> DomainResult<()> {
        (**self).replace(sale)
    }

    fn remove(&self, id: &SaleId) -> DomainResult<()> {
        (**self).remove(id)
    }

    fn list_for_customer(&self, customer_id: &CustomerId) -> Vec<Sale> {
        (**self).list_for_customer(customer_id)
    }

    fn list_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Sale> {
        (**self).list_in_range(start, end)
    }
}

/// In-memory sale store (RwLock'd map).
#[derive(Debug, Default)]
pub struct InMemorySaleStore {
    inner: RwLock<HashMap<SaleId, Sale>>,
}

impl InMemorySaleStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted(mut sales: Vec<Sale>) -> Vec<Sale> {
        // Chronological by transaction date; record id as a stable tiebreaker.
        sales.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.as_uuid().cmp(b.id.as_uuid())));
        sales
    }
}

impl SaleStore for InMemorySaleStore {
    fn get(&self, id: &SaleId) -> Option<Sale> {
        let map = self.inner.read().ok()?;
        map.get(id).cloned()
    }

    fn list(&self) -> Vec<Sale> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        Self::sorted(map.values().cloned().collect())
    }

    fn insert(&self, sale: Sale) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(sale.id, sale);
        }
    }

    fn replace(&self, sale: Sale) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::validation("sale store lock poisoned"))?;
        if !map.contains_key(&sale.id) {
            return Err(DomainError::not_found(format!("sale {}", sale.id)));
        }
        map.insert(sale.id, sale);
        Ok(())
    }

    fn remove(&self, id: &SaleId) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::validation("sale store lock poisoned"))?;
        map.remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(format!("sale {id}")))
    }

    fn list_for_customer(&self, customer_id: &CustomerId) -> Vec<Sale> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        Self::sorted(
            map.values()
                .filter(|s| s.customer_id.as_ref() == Some(customer_id))
                .cloned()
                .collect(),
        )
    }

    fn list_in_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Sale> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        Self::sorted(
            map.values()
                .filter(|s| s.date >= start && s.date <= end)
                .cloned()
                .collect(),
        )
    }
}
