//! The sale ledger engine: the single entry point for creating, updating,
//! and deleting sales while keeping inventory stock consistent.
//!
//! Stock mutation is validate-then-commit: every line is checked before any
//! quantity changes, and the final enforcement happens inside
//! [`ItemStore::apply_stock_deltas`] under the store's write lock, so
//! concurrent sales cannot both commit beyond available stock.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use stockbook_core::{CustomerId, DomainError, DomainResult, ItemId, SaleId};
use stockbook_customers::CustomerStore;
use stockbook_inventory::ItemStore;

use crate::ledger::{LedgerEntry, build_ledger};
use crate::sale::{CASH_SALE_NAME, PaymentType, Sale, SaleItem};
use crate::store::SaleStore;

/// One requested sale line, as supplied by the caller. `price` and `total`
/// are caller-computed and cross-checked against the live item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleLineInput {
    pub item_id: ItemId,
    pub name: String,
    pub quantity: i64,
    pub price: i64,
    pub total: i64,
}

/// A requested sale (create or full-replace update).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleDraft {
    pub lines: Vec<SaleLineInput>,
    pub customer_id: Option<CustomerId>,
    pub payment_type: Option<PaymentType>,
    pub date: DateTime<Utc>,
}

pub struct SaleLedgerEngine<I, C, S> {
    items: I,
    customers: C,
    sales: S,
}

impl<I, C, S> SaleLedgerEngine<I, C, S>
where
    I: ItemStore,
    C: CustomerStore,
    S: SaleStore,
{
    pub fn new(items: I, customers: C, sales: S) -> Self {
        Self {
            items,
            customers,
            sales,
        }
    }

    /// Validate and record a sale, decrementing stock for every line.
    ///
    /// No quantity changes unless every line passes validation and the
    /// combined conditional decrement succeeds.
    pub fn create_sale(&self, draft: SaleDraft) -> DomainResult<Sale> {
        let lines = self.validate_lines(&draft.lines, true)?;
        let customer_name = self.resolve_customer_name(draft.customer_id)?;
        let total = sale_total(&lines)?;

        let now = Utc::now();
        let deltas: Vec<(ItemId, i64)> =
            lines.iter().map(|l| (l.item_id, -l.quantity)).collect();
        self.items.apply_stock_deltas(&deltas, now)?;

        let sale = Sale {
            id: SaleId::new(),
            items: lines,
            customer_id: draft.customer_id,
            customer_name,
            total,
            payment_type: draft.payment_type,
            date: draft.date,
            created_at: now,
            updated_at: now,
        };
        self.sales.insert(sale.clone());

        tracing::info!(sale_id = %sale.id, total = sale.total, "sale recorded");
        Ok(sale)
    }

    /// Replace a sale's lines, reverting the original stock impact and
    /// applying the new one as a single all-or-nothing adjustment.
    ///
    /// For an item in both line sets the observable net change is
    /// `new.quantity − old.quantity`. Stock sufficiency is judged against
    /// the reverted baseline, so a new line may reuse units the old sale
    /// had claimed.
    pub fn update_sale(&self, id: SaleId, draft: SaleDraft) -> DomainResult<Sale> {
        let existing = self
            .sales
            .get(&id)
            .ok_or_else(|| DomainError::not_found(format!("sale {id}")))?;

        // Stock sufficiency is deliberately not pre-checked here: the check
        // belongs after the revert, and the conditional apply below enforces
        // it against the restored baseline.
        let lines = self.validate_lines(&draft.lines, false)?;
        let customer_name = self.resolve_customer_name(draft.customer_id)?;
        let total = sale_total(&lines)?;

        let mut net: HashMap<ItemId, i64> = HashMap::new();
        for old in &existing.items {
            // An item deleted since the original sale has nothing to revert.
            if self.items.get(&old.item_id).is_some() {
                *net.entry(old.item_id).or_insert(0) += old.quantity;
            }
        }
        for new in &lines {
            *net.entry(new.item_id).or_insert(0) -= new.quantity;
        }

        let now = Utc::now();
        let deltas: Vec<(ItemId, i64)> = net.into_iter().collect();
        self.items.apply_stock_deltas(&deltas, now)?;

        let sale = Sale {
            id,
            items: lines,
            customer_id: draft.customer_id,
            customer_name,
            total,
            payment_type: draft.payment_type,
            date: draft.date,
            created_at: existing.created_at,
            updated_at: now,
        };
        self.sales.replace(sale.clone())?;

        tracing::info!(sale_id = %sale.id, total = sale.total, "sale updated");
        Ok(sale)
    }

    /// Delete a sale record.
    ///
    /// Inventory stock is deliberately left untouched: a deleted sale is an
    /// erased record, not a return of goods.
    pub fn delete_sale(&self, id: SaleId) -> DomainResult<()> {
        self.sales.remove(&id)?;
        tracing::info!(sale_id = %id, "sale deleted");
        Ok(())
    }

    pub fn get_sale(&self, id: &SaleId) -> Option<Sale> {
        self.sales.get(id)
    }

    pub fn list_sales(&self) -> Vec<Sale> {
        self.sales.list()
    }

    /// Rebuild the customer's ledger from their sale history.
    ///
    /// A customer without a live record (never created, or since deleted)
    /// yields an empty ledger even when historical sales still reference
    /// the id.
    pub fn customer_ledger(&self, customer_id: &CustomerId) -> Vec<LedgerEntry> {
        if self.customers.get(customer_id).is_none() {
            return Vec::new();
        }
        let sales = self.sales.list_for_customer(customer_id);
        build_ledger(&sales)
    }

    fn resolve_customer_name(&self, customer_id: Option<CustomerId>) -> DomainResult<String> {
        match customer_id {
            Some(id) => self
                .customers
                .get(&id)
                .map(|c| c.name)
                .ok_or_else(|| DomainError::not_found(format!("customer {id}"))),
            None => Ok(CASH_SALE_NAME.to_string()),
        }
    }

    /// Structural + cross-item validation of requested lines. Stock
    /// sufficiency is only pre-checked on create (`check_stock`); updates
    /// defer it to the post-revert conditional apply.
    fn validate_lines(
        &self,
        lines: &[SaleLineInput],
        check_stock: bool,
    ) -> DomainResult<Vec<SaleItem>> {
        if lines.is_empty() {
            return Err(DomainError::validation("at least one item is required"));
        }

        let mut validated = Vec::with_capacity(lines.len());
        for line in lines {
            if line.name.trim().is_empty() {
                return Err(DomainError::validation("each item must have a name"));
            }
            if line.quantity < 1 {
                return Err(DomainError::validation(
                    "each item quantity must be at least 1",
                ));
            }
            if line.price < 0 {
                return Err(DomainError::validation("item price cannot be negative"));
            }

            let item = self
                .items
                .get(&line.item_id)
                .ok_or_else(|| DomainError::not_found(format!("item {}", line.item_id)))?;
            if check_stock && item.quantity < line.quantity {
                return Err(DomainError::insufficient_stock(line.name.clone()));
            }
            if item.price != line.price {
                return Err(DomainError::price_mismatch(line.name.clone()));
            }
            let expected_total = line
                .quantity
                .checked_mul(line.price)
                .ok_or_else(|| DomainError::validation("item line total overflows"))?;
            if line.total != expected_total {
                return Err(DomainError::total_mismatch(line.name.clone()));
            }

            validated.push(SaleItem {
                item_id: line.item_id,
                name: line.name.clone(),
                quantity: line.quantity,
                price: line.price,
                total: line.total,
            });
        }

        Ok(validated)
    }
}

/// Sum of validated line totals, rejecting arithmetic overflow.
fn sale_total(lines: &[SaleItem]) -> DomainResult<i64> {
    lines.iter().try_fold(0i64, |acc, line| {
        acc.checked_add(line.total)
            .ok_or_else(|| DomainError::validation("sale total overflows"))
    })
}
