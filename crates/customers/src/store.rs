//! Customer persistence seam: trait plus the in-memory implementation.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use stockbook_core::{CustomerId, DomainError, DomainResult};

use crate::customer::{Customer, CustomerPatch};

/// Single-collection store for customer records.
pub trait CustomerStore: Send + Sync {
    fn get(&self, id: &CustomerId) -> Option<Customer>;
    fn list(&self) -> Vec<Customer>;
    fn insert(&self, customer: Customer);
    fn update(
        &self,
        id: &CustomerId,
        patch: &CustomerPatch,
        now: DateTime<Utc>,
    ) -> DomainResult<Customer>;
    /// Unconditional removal; historical sales keep their snapshots.
    fn remove(&self, id: &CustomerId) -> DomainResult<()>;
}

impl<S> CustomerStore for Arc<S>
where
    S: CustomerStore + ?Sized,
{
    fn get(&self, id: &CustomerId) -> Option<Customer> {
        (**self).get(id)
    }

    fn list(&self) -> Vec<Customer> {
        (**self).list()
    }

    fn insert(&self, customer: Customer) {
        (**self).insert(customer)
    }

    fn update(
        &self,
        id: &CustomerId,
        patch: &CustomerPatch,
        now: DateTime<Utc>,
    ) -> DomainResult<Customer> {
        (**self).update(id, patch, now)
    }

    fn remove(&self, id: &CustomerId) -> DomainResult<()> {
        (**self).remove(id)
    }
}

/// In-memory customer store (RwLock'd map).
#[derive(Debug, Default)]
pub struct InMemoryCustomerStore {
    inner: RwLock<HashMap<CustomerId, Customer>>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CustomerStore for InMemoryCustomerStore {
    fn get(&self, id: &CustomerId) -> Option<Customer> {
        let map = self.inner.read().ok()?;
        map.get(id).cloned()
    }

    fn list(&self) -> Vec<Customer> {
        let map = match self.inner.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };

        let mut customers: Vec<_> = map.values().cloned().collect();
        customers.sort_by_key(|c| *c.id.as_uuid());
        customers
    }

    fn insert(&self, customer: Customer) {
        if let Ok(mut map) = self.inner.write() {
            map.insert(customer.id, customer);
        }
    }

    fn update(
        &self,
        id: &CustomerId,
        patch: &CustomerPatch,
        now: DateTime<Utc>,
    ) -> DomainResult<Customer> {
        patch.validate()?;
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::validation("customer store lock poisoned"))?;
        let customer = map
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found(format!("customer {id}")))?;
        patch.apply_to(customer, now);
        Ok(customer.clone())
    }

    fn remove(&self, id: &CustomerId) -> DomainResult<()> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| DomainError::validation("customer store lock poisoned"))?;
        map.remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(format!("customer {id}")))
    }
}
