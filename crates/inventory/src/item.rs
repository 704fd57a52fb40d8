use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{DomainError, DomainResult, Entity, ItemId};

/// Inventory item record.
///
/// `quantity` is on-hand stock and is mutated both by direct edits and by the
/// sale ledger engine. Invariant: never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    pub quantity: i64,
    /// Unit price in smallest currency unit (e.g., cents).
    pub price: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    /// Build a validated item from creation input.
    pub fn create(input: NewItem, now: DateTime<Utc>) -> DomainResult<Self> {
        input.validate()?;
        Ok(Self {
            id: ItemId::new(),
            name: input.name,
            description: input.description,
            quantity: input.quantity,
            price: input.price,
            created_at: now,
            updated_at: now,
        })
    }

    /// Case-insensitive substring match over name and description.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        if self.name.to_lowercase().contains(&query) {
            return true;
        }
        self.description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&query))
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Creation input for an inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub description: Option<String>,
    pub quantity: i64,
    pub price: i64,
}

impl NewItem {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name is required"));
        }
        if self.quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        if self.price < 0 {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(())
    }
}

/// Partial-field update for an inventory item. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<i64>,
}

impl ItemPatch {
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if self.quantity.is_some_and(|q| q < 0) {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        if self.price.is_some_and(|p| p < 0) {
            return Err(DomainError::validation("price cannot be negative"));
        }
        Ok(())
    }

    /// Apply the patch, bumping `updated_at`.
    pub fn apply_to(&self, item: &mut InventoryItem, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(description) = &self.description {
            item.description = Some(description.clone());
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(price) = self.price {
            item.price = price;
        }
        item.updated_at = now;
    }
}
