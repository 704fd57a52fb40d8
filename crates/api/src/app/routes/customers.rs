use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use chrono::Utc;
use serde_json::json;

use stockbook_core::CustomerId;
use stockbook_customers::{Customer, CustomerStore};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/getCustomers", get(get_customers))
        .route("/create", post(create_customer))
        .route("/update/:customerId", put(update_customer))
        .route("/delete/:id", delete(delete_customer))
}

pub async fn get_customers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let customers = services
        .customers
        .list()
        .iter()
        .map(dto::customer_to_json)
        .collect::<Vec<_>>();
    errors::json_ok(json!(customers))
}

pub async fn create_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateCustomerRequest>,
) -> axum::response::Response {
    let customer = match Customer::create(body.into_new_customer(), Utc::now()) {
        Ok(customer) => customer,
        Err(e) => return errors::domain_error_to_response(e),
    };

    services.customers.insert(customer.clone());
    errors::json_data(StatusCode::CREATED, dto::customer_to_json(&customer))
}

pub async fn update_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateCustomerRequest>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services
        .customers
        .update(&id, &body.into_patch(), Utc::now())
    {
        Ok(customer) => errors::json_ok(dto::customer_to_json(&customer)),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    // Historical sales keep their customer-name snapshot; they are not
    // cascaded or rewritten.
    match services.customers.remove(&id) {
        Ok(()) => errors::json_ok(json!({ "id": id.to_string() })),
        Err(e) => errors::domain_error_to_response(e),
    }
}
