use axum::{Router, routing::get};

pub mod auth;
pub mod customers;
pub mod items;
pub mod reports;
pub mod sales;
pub mod system;

/// Router for all authenticated endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/fetchUser", get(auth::fetch_user))
        .nest("/item", items::router())
        .nest("/customer", customers::router())
        .nest("/sales", sales::router())
        .nest("/report", reports::router())
}
