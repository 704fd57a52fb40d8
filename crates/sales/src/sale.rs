use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{CustomerId, Entity, ItemId, SaleId};

/// Customer-name sentinel for sales with no customer record.
pub const CASH_SALE_NAME: &str = "Cash Sale";

/// How a sale was settled. `None` on the sale means "not recorded as settled",
/// which is what the ledger's synthetic-payment rule keys off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Cash,
    Credit,
}

/// Sale line (value object, embedded in the sale).
///
/// `name` and `price` are snapshots taken at sale time and are never re-synced
/// to later item edits — that is intentional historical-record behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleItem {
    pub item_id: ItemId,
    pub name: String,
    pub quantity: i64,
    /// Unit price snapshot in smallest currency unit (e.g., cents).
    pub price: i64,
    /// Line total = quantity × price.
    pub total: i64,
}

/// Sale transaction record. Owns its line list exclusively; holds a
/// non-owning reference to the customer by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: SaleId,
    pub items: Vec<SaleItem>,
    pub customer_id: Option<CustomerId>,
    /// Customer-name snapshot; [`CASH_SALE_NAME`] when no customer.
    pub customer_name: String,
    /// Σ of line totals, recomputed server-side at write time.
    pub total: i64,
    pub payment_type: Option<PaymentType>,
    /// Transaction date (distinct from the record-creation timestamp).
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Sale {
    type Id = SaleId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
