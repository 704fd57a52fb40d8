use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use chrono::Utc;
use serde_json::json;

use stockbook_core::ItemId;
use stockbook_inventory::{InventoryItem, ItemStore};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/getItems", get(get_items))
        .route("/addItem", post(add_item))
        .route("/update/:id", put(update_item))
        .route("/delete/:id", delete(delete_item))
        .route("/search", get(search_items))
}

pub async fn get_items(
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

pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::AddItemRequest>,
) -> axum::response::Response {
    let item = match InventoryItem::create(body.into_new_item(), Utc::now()) {
        Ok(item) => item,
        Err(e) => return errors::domain_error_to_response(e),
    };

    services.items.insert(item.clone());
    errors::json_data(StatusCode::CREATED, dto::item_to_json(&item))
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::UpdateItemRequest>,
) -> axum::response::Response {
    let id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.items.update(&id, &body.into_patch(), Utc::now()) {
        Ok(item) => errors::json_ok(dto::item_to_json(&item)),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.items.remove(&id) {
        Ok(()) => errors::json_ok(json!({ "id": id.to_string() })),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn search_items(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::SearchQuery>,
) -> axum::response::Response {
    let items = services
        .items
        .search(&query.query)
        .iter()
        .map(dto::item_to_json)
        .collect::<Vec<_>>();
    errors::json_ok(json!(items))
}
