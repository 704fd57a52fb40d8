//! `stockbook-sales` — sale transactions, stock-consistent mutation, and
//! customer ledger reconstruction.
//!
//! The [`engine::SaleLedgerEngine`] is the only writer of sale records and the
//! only component allowed to adjust inventory stock on behalf of a sale.

pub mod engine;
pub mod ledger;
pub mod sale;
pub mod store;

pub use engine::{SaleDraft, SaleLedgerEngine, SaleLineInput};
pub use ledger::{LedgerEntry, LedgerEntryKind, build_ledger};
pub use sale::{CASH_SALE_NAME, PaymentType, Sale, SaleItem};
pub use store::{InMemorySaleStore, SaleStore};
