use std::sync::Arc;

use axum::{
    Router,
    extract::{Extension, Path, Query},
    routing::get,
};
use chrono::Utc;
use serde_json::json;

use stockbook_core::CustomerId;
use stockbook_inventory::ItemStore;
use stockbook_sales::ledger::current_balance;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/salesReport", get(sales_report))
        .route("/items", get(items_report))
        .route("/ledger/:customerId", get(customer_ledger))
        .route("/monthlySales", get(monthly_sales))
        .route("/topItems", get(top_items))
        .route("/valuation", get(valuation))
}

pub async fn sales_report(
    Extension(services): Extension<Arc<AppServices>>,
    Query(range): Query<dto::SalesReportQuery>,
) -> axum::response::Response {
    let sales = services
        .reports
        .sales_report(range.start_date, range.end_date)
        .iter()
        .map(dto::sale_to_json)
        .collect::<Vec<_>>();
    errors::json_ok(json!(sales))
}

/// Full item list, as consumed by the stock report screen.
pub async fn items_report(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services
        .items
        .list()
        .iter()
        .map(dto::item_to_json)
        .collect::<Vec<_>>();
    errors::json_ok(json!(items))
}

pub async fn customer_ledger(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let entries = services.engine.customer_ledger(&id);
    errors::json_ok(json!({
        "entries": entries.iter().map(dto::ledger_entry_to_json).collect::<Vec<_>>(),
        "balance": current_balance(&entries),
    }))
}

pub async fn monthly_sales(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let buckets = services
        .reports
        .monthly_sales(Utc::now())
        .iter()
        .map(dto::monthly_bucket_to_json)
        .collect::<Vec<_>>();
    errors::json_ok(json!(buckets))
}

pub async fn top_items(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services
        .reports
        .top_selling_items()
        .iter()
        .map(dto::top_item_to_json)
        .collect::<Vec<_>>();
    errors::json_ok(json!(items))
}

pub async fn valuation(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    errors::json_ok(dto::valuation_to_json(&services.reports.inventory_valuation()))
}
