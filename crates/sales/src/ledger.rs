//! Customer ledger reconstruction.
//!
//! The ledger is a purely computed view: it is rebuilt from the customer's
//! sale records on every read and never persisted. Sales contribute positive
//! amounts; unsettled sales at even positions additionally synthesize a
//! half-value payment received five days later.

use chrono::Duration;
use serde::Serialize;

use crate::sale::Sale;

/// Days between a sale and its synthesized payment.
const SYNTHETIC_PAYMENT_LAG_DAYS: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LedgerEntryKind {
    Sale,
    Payment,
}

/// One ledger row: a sale or a synthesized payment, with the running balance
/// after applying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub id: String,
    pub date: chrono::DateTime<chrono::Utc>,
    pub kind: LedgerEntryKind,
    /// Signed amount in smallest currency unit: +total for sales,
    /// −amount for payments.
    pub amount: i64,
    pub description: String,
    /// Cumulative balance after this entry.
    pub balance: i64,
}

/// Rebuild a customer's ledger from their sales, which must already be sorted
/// ascending by date.
///
/// Synthesis rule: a sale at an even zero-based index with no recorded
/// payment type emits a payment of half its total, dated five days after the
/// sale. Balances are assigned in emission order (sale first, then its
/// payment), matching the chronology as long as consecutive sales are more
/// than five days apart.
pub fn build_ledger(sales: &[Sale]) -> Vec<LedgerEntry> {
    let mut entries = Vec::with_capacity(sales.len() * 2);

    for (index, sale) in sales.iter().enumerate() {
        let names: Vec<&str> = sale.items.iter().map(|i| i.name.as_str()).collect();
        entries.push(LedgerEntry {
            id: sale.id.to_string(),
            date: sale.date,
            kind: LedgerEntryKind::Sale,
            amount: sale.total,
            description: format!("Purchase of {}", names.join(", ")),
            balance: 0,
        });

        if sale.payment_type.is_none() && index % 2 == 0 {
            // Integer cents: an odd total truncates toward zero.
            let payment = sale.total / 2;
            entries.push(LedgerEntry {
                id: format!("payment-{}", sale.id),
                date: sale.date + Duration::days(SYNTHETIC_PAYMENT_LAG_DAYS),
                kind: LedgerEntryKind::Payment,
                amount: -payment,
                description: "Payment received".to_string(),
                balance: 0,
            });
        }
    }

    let mut balance = 0i64;
    for entry in &mut entries {
        balance += entry.amount;
        entry.balance = balance;
    }

    entries
}

/// Balance after the last ledger entry, or 0 with no transactions.
pub fn current_balance(entries: &[LedgerEntry]) -> i64 {
    entries.last().map(|e| e.balance).unwrap_or(0)
}
