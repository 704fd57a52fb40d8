use std::collections::HashMap;

use chrono::{DateTime, Datelike, Months, Utc};
use serde::Serialize;

use stockbook_core::ItemId;
use stockbook_inventory::ItemStore;
use stockbook_sales::{Sale, SaleStore};

/// Items with fewer units than this count as low stock.
const LOW_STOCK_THRESHOLD: i64 = 10;

/// Number of trailing calendar months in the monthly sales report.
const MONTHLY_WINDOW: u32 = 6;

/// One calendar-month bucket of sale totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySalesBucket {
    /// Short month name, e.g. "Jan".
    pub month: String,
    pub total: i64,
}

/// Aggregate sale revenue for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopSellingItem {
    pub item_id: ItemId,
    pub name: String,
    pub total: i64,
}

/// Per-item valuation row: value = quantity × price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemValuation {
    pub item_id: ItemId,
    pub name: String,
    pub quantity: i64,
    pub value: i64,
}

/// Inventory valuation summary for the whole store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryValuation {
    pub items: Vec<ItemValuation>,
    pub total_value: i64,
    pub item_count: usize,
    pub low_stock_count: usize,
}

/// Pure read-side projector over the item and sale stores.
pub struct ReportProjector<I, S> {
    items: I,
    sales: S,
}

impl<I, S> ReportProjector<I, S>
where
    I: ItemStore,
    S: SaleStore,
{
    pub fn new(items: I, sales: S) -> Self {
        Self { items, sales }
    }

    /// Sale totals bucketed by calendar month over the trailing six months
    /// (oldest first, current month included). Months without sales appear
    /// with a zero total.
    pub fn monthly_sales(&self, now: DateTime<Utc>) -> Vec<MonthlySalesBucket> {
        let sales = self.sales.list();
        let today = now.date_naive();

        (0..MONTHLY_WINDOW)
            .rev()
            .map(|back| {
                let month_start = today
                    .checked_sub_months(Months::new(back))
                    .unwrap_or(today);
                let total = sales
                    .iter()
                    .filter(|s| {
                        s.date.year() == month_start.year() && s.date.month() == month_start.month()
                    })
                    .map(|s| s.total)
                    .sum();
                MonthlySalesBucket {
                    month: month_start.format("%b").to_string(),
                    total,
                }
            })
            .collect()
    }

    /// Top five items by aggregate line revenue across all sales.
    /// Ties keep first-encounter order (stable sort).
    pub fn top_selling_items(&self) -> Vec<TopSellingItem> {
        let mut by_item: Vec<TopSellingItem> = Vec::new();
        let mut index: HashMap<ItemId, usize> = HashMap::new();

        for sale in self.sales.list() {
            for line in &sale.items {
                match index.get(&line.item_id) {
                    Some(&i) => by_item[i].total += line.total,
                    None => {
                        index.insert(line.item_id, by_item.len());
                        by_item.push(TopSellingItem {
                            item_id: line.item_id,
                            name: line.name.clone(),
                            total: line.total,
                        });
                    }
                }
            }
        }

        by_item.sort_by(|a, b| b.total.cmp(&a.total));
        by_item.truncate(5);
        by_item
    }

    /// Current inventory valuation with a low-stock count
    /// (quantity < 10, fixed threshold).
    pub fn inventory_valuation(&self) -> InventoryValuation {
        let items = self.items.list();
        let rows: Vec<ItemValuation> = items
            .iter()
            .map(|i| ItemValuation {
                item_id: i.id,
                name: i.name.clone(),
                quantity: i.quantity,
                value: i.quantity * i.price,
            })
            .collect();

        InventoryValuation {
            total_value: rows.iter().map(|r| r.value).sum(),
            item_count: rows.len(),
            low_stock_count: items
                .iter()
                .filter(|i| i.quantity < LOW_STOCK_THRESHOLD)
                .count(),
            items: rows,
        }
    }

    /// Sales with `start <= date <= end`, date-ordered.
    pub fn sales_report(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Sale> {
        self.sales.list_in_range(start, end)
    }
}
