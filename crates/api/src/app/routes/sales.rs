use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use chrono::Utc;
use serde_json::json;

use stockbook_core::{CustomerId, DomainResult, SaleId};
use stockbook_sales::{SaleDraft, SaleLineInput};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/create", post(create_sale))
        .route("/update/:id", put(update_sale))
        .route("/getSales", get(get_sales))
        .route("/delete/:id", delete(delete_sale))
}

fn draft_from_request(body: dto::SaleRequest) -> DomainResult<SaleDraft> {
    let mut lines = Vec::with_capacity(body.items.len());
    for line in body.items {
        lines.push(SaleLineInput {
            item_id: line.item_id.parse()?,
            name: line.name,
            quantity: line.quantity,
            price: line.price,
            total: line.total,
        });
    }

    let customer_id: Option<CustomerId> = match body.customer_id {
        Some(raw) => Some(raw.parse()?),
        None => None,
    };

    Ok(SaleDraft {
        lines,
        customer_id,
        payment_type: body.payment_type,
        date: body.date.unwrap_or_else(Utc::now),
    })
}

pub async fn create_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::SaleRequest>,
) -> axum::response::Response {
    let draft = match draft_from_request(body) {
        Ok(d) => d,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.engine.create_sale(draft) {
        Ok(sale) => errors::json_data(StatusCode::CREATED, dto::sale_to_json(&sale)),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn update_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::SaleRequest>,
) -> axum::response::Response {
    let id: SaleId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let draft = match draft_from_request(body) {
        Ok(d) => d,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.engine.update_sale(id, draft) {
        Ok(sale) => errors::json_ok(dto::sale_to_json(&sale)),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_sales(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let sales = services
        .engine
        .list_sales()
        .iter()
        .map(dto::sale_to_json)
        .collect::<Vec<_>>();
    errors::json_ok(json!(sales))
}

pub async fn delete_sale(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: SaleId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.engine.delete_sale(id) {
        Ok(()) => errors::json_ok(json!({ "id": id.to_string() })),
        Err(e) => errors::domain_error_to_response(e),
    }
}
