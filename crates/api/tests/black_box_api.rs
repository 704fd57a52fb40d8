use reqwest::StatusCode;
use serde_json::json;

use stockbook_api::config::AppConfig;

const ADMIN_EMAIL: &str = "owner@shop.test";
const ADMIN_PASSWORD: &str = "correct horse battery staple";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let config = AppConfig {
            jwt_secret: "test-secret".to_string(),
            admin_email: ADMIN_EMAIL.to_string(),
            admin_password: ADMIN_PASSWORD.to_string(),
            bind_addr: "127.0.0.1:0".to_string(),
        };
        let app = stockbook_api::app::build_app(config);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("failed to build client")
}

async fn login(client: &reqwest::Client, base_url: &str) {
    let res = client
        .post(format!("{}/login", base_url))
        .json(&json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

async fn add_item(
    client: &reqwest::Client,
    base_url: &str,
    name: &str,
    quantity: i64,
    price: i64,
) -> String {
    let res = client
        .post(format!("{}/item/addItem", base_url))
        .json(&json!({ "name": name, "quantity": quantity, "price": price }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn item_quantity(client: &reqwest::Client, base_url: &str, id: &str) -> i64 {
    let res = client
        .get(format!("{}/item/getItems", base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .find(|i| i["id"] == id)
        .expect("item not in list")["quantity"]
        .as_i64()
        .unwrap()
}

fn sale_line(item_id: &str, name: &str, quantity: i64, price: i64) -> serde_json::Value {
    json!({
        "itemId": item_id,
        "name": name,
        "quantity": quantity,
        "price": price,
        "total": quantity * price,
    })
}

#[tokio::test]
async fn protected_endpoints_require_session() {
    let srv = TestServer::spawn().await;
    let client = client();

    let res = client
        .get(format!("{}/item/getItems", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = client()
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn expired_session_token_is_rejected() {
    use chrono::{Duration, Utc};
    use stockbook_auth::{Hs256TokenCodec, SessionClaims};

    let srv = TestServer::spawn().await;

    // Well-signed but already past its expiry.
    let codec = Hs256TokenCodec::new(b"test-secret");
    let claims = SessionClaims::issue(
        ADMIN_EMAIL,
        Utc::now() - Duration::hours(48),
        Duration::hours(24),
    );
    let token = codec.encode(&claims).unwrap();

    let res = client()
        .get(format!("{}/fetchUser", srv.base_url))
        .header("Cookie", format!("jwt={token}"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_rejects_bad_credentials() {
    let srv = TestServer::spawn().await;
    let res = client()
        .post(format!("{}/login", srv.base_url))
        .json(&json!({ "email": ADMIN_EMAIL, "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_opens_a_session_and_logout_closes_it() {
    let srv = TestServer::spawn().await;
    let client = client();
    login(&client, &srv.base_url).await;

    let res = client
        .get(format!("{}/fetchUser", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"]["email"], ADMIN_EMAIL);

    let res = client
        .post(format!("{}/logout", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/fetchUser", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn item_lifecycle_add_update_search_delete() {
    let srv = TestServer::spawn().await;
    let client = client();
    login(&client, &srv.base_url).await;

    let id = add_item(&client, &srv.base_url, "Blue Widget", 5, 250).await;

    // Update price and description.
    let res = client
        .put(format!("{}/item/update/{}", srv.base_url, id))
        .json(&json!({ "price": 300, "description": "bulk widget" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"]["price"], 300);
    assert_eq!(body["data"]["quantity"], 5);

    // Search matches on description, case-insensitively.
    let res = client
        .get(format!("{}/item/search?query=BULK", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let res = client
        .delete(format!("{}/item/delete/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/item/getItems", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn invalid_item_id_is_a_bad_request() {
    let srv = TestServer::spawn().await;
    let client = client();
    login(&client, &srv.base_url).await;

    let res = client
        .delete(format!("{}/item/delete/not-a-uuid", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn customer_lifecycle() {
    let srv = TestServer::spawn().await;
    let client = client();
    login(&client, &srv.base_url).await;

    let res = client
        .post(format!("{}/customer/create", srv.base_url))
        .json(&json!({
            "name": "Asha Traders",
            "address": { "street": "1 Market Rd", "city": "Pune", "state": "MH", "pinCode": "411001" },
            "mobileNumber": "9876543210",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["address"]["pinCode"], "411001");

    // Mobile numbers must be exactly ten digits.
    let res = client
        .put(format!("{}/customer/update/{}", srv.base_url, id))
        .json(&json!({ "mobileNumber": "12345" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .delete(format!("{}/customer/delete/{}", srv.base_url, id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn creating_a_sale_decrements_stock() {
    let srv = TestServer::spawn().await;
    let client = client();
    login(&client, &srv.base_url).await;

    let id = add_item(&client, &srv.base_url, "Widget", 10, 100).await;

    let res = client
        .post(format!("{}/sales/create", srv.base_url))
        .json(&json!({ "items": [sale_line(&id, "Widget", 3, 100)] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"]["total"], 300);
    assert_eq!(body["data"]["customerName"], "Cash Sale");

    assert_eq!(item_quantity(&client, &srv.base_url, &id).await, 7);

    let res = client
        .get(format!("{}/sales/getSales", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn oversized_sale_is_rejected_without_touching_stock() {
    let srv = TestServer::spawn().await;
    let client = client();
    login(&client, &srv.base_url).await;

    let a = add_item(&client, &srv.base_url, "A", 10, 100).await;
    let b = add_item(&client, &srv.base_url, "B", 1, 100).await;

    // First line is satisfiable; second is not. Nothing may change.
    let res = client
        .post(format!("{}/sales/create", srv.base_url))
        .json(&json!({ "items": [
            sale_line(&a, "A", 5, 100),
            sale_line(&b, "B", 2, 100),
        ]}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    assert_eq!(item_quantity(&client, &srv.base_url, &a).await, 10);
    assert_eq!(item_quantity(&client, &srv.base_url, &b).await, 1);
}

#[tokio::test]
async fn price_mismatch_is_rejected() {
    let srv = TestServer::spawn().await;
    let client = client();
    login(&client, &srv.base_url).await;

    let id = add_item(&client, &srv.base_url, "Widget", 10, 100).await;

    let res = client
        .post(format!("{}/sales/create", srv.base_url))
        .json(&json!({ "items": [{
            "itemId": id,
            "name": "Widget",
            "quantity": 1,
            "price": 90,
            "total": 90,
        }]}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(item_quantity(&client, &srv.base_url, &id).await, 10);
}

#[tokio::test]
async fn updating_a_sale_reverts_then_reapplies_stock() {
    let srv = TestServer::spawn().await;
    let client = client();
    login(&client, &srv.base_url).await;

    let id = add_item(&client, &srv.base_url, "Widget", 10, 100).await;

    let res = client
        .post(format!("{}/sales/create", srv.base_url))
        .json(&json!({ "items": [sale_line(&id, "Widget", 4, 100)] }))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let sale_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(item_quantity(&client, &srv.base_url, &id).await, 6);

    // 8 units fit only because the original 4 are reverted first.
    let res = client
        .put(format!("{}/sales/update/{}", srv.base_url, sale_id))
        .json(&json!({ "items": [sale_line(&id, "Widget", 8, 100)] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(item_quantity(&client, &srv.base_url, &id).await, 2);
}

#[tokio::test]
async fn deleting_a_sale_keeps_stock_decremented() {
    let srv = TestServer::spawn().await;
    let client = client();
    login(&client, &srv.base_url).await;

    let id = add_item(&client, &srv.base_url, "Widget", 10, 100).await;

    let res = client
        .post(format!("{}/sales/create", srv.base_url))
        .json(&json!({ "items": [sale_line(&id, "Widget", 3, 100)] }))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let sale_id = body["data"]["id"].as_str().unwrap().to_string();

    let res = client
        .delete(format!("{}/sales/delete/{}", srv.base_url, sale_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Deletion removes the record only; the goods already left the shelf.
    assert_eq!(item_quantity(&client, &srv.base_url, &id).await, 7);

    let res = client
        .get(format!("{}/sales/getSales", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn customer_ledger_carries_a_running_balance() {
    let srv = TestServer::spawn().await;
    let client = client();
    login(&client, &srv.base_url).await;

    let item = add_item(&client, &srv.base_url, "Widget", 100, 100).await;

    let res = client
        .post(format!("{}/customer/create", srv.base_url))
        .json(&json!({
            "name": "Asha Traders",
            "address": { "street": "1 Market Rd", "city": "Pune", "state": "MH", "pinCode": "411001" },
            "mobileNumber": "9876543210",
        }))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let customer_id = body["data"]["id"].as_str().unwrap().to_string();

    // One unsettled sale of 100: ledger gets the sale plus a synthesized
    // half-value payment five days later.
    let res = client
        .post(format!("{}/sales/create", srv.base_url))
        .json(&json!({
            "items": [sale_line(&item, "Widget", 1, 100)],
            "customerId": customer_id,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .get(format!("{}/report/ledger/{}", srv.base_url, customer_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let entries = body["data"]["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["type"], "sale");
    assert_eq!(entries[0]["amount"], 100);
    assert_eq!(entries[0]["balance"], 100);
    assert_eq!(entries[1]["type"], "payment");
    assert_eq!(entries[1]["amount"], -50);
    assert_eq!(entries[1]["balance"], 50);
    assert_eq!(body["data"]["balance"], 50);
}

#[tokio::test]
async fn report_endpoints_reflect_recorded_sales() {
    let srv = TestServer::spawn().await;
    let client = client();
    login(&client, &srv.base_url).await;

    let a = add_item(&client, &srv.base_url, "A", 20, 100).await;
    let b = add_item(&client, &srv.base_url, "B", 5, 300).await;

    let res = client
        .post(format!("{}/sales/create", srv.base_url))
        .json(&json!({ "items": [
            sale_line(&a, "A", 2, 100),
            sale_line(&b, "B", 1, 300),
        ]}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    // Valuation reflects post-sale quantities: 18*100 + 4*300.
    let res = client
        .get(format!("{}/report/valuation", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"]["totalValue"], 3000);
    assert_eq!(body["data"]["itemCount"], 2);
    assert_eq!(body["data"]["lowStockCount"], 1);

    // B out-earned A on this sale.
    let res = client
        .get(format!("{}/report/topItems", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let top = body["data"].as_array().unwrap();
    assert_eq!(top[0]["name"], "B");
    assert_eq!(top[0]["total"], 300);
    assert_eq!(top[1]["name"], "A");

    // The current month carries today's revenue.
    let res = client
        .get(format!("{}/report/monthlySales", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let buckets = body["data"].as_array().unwrap();
    assert_eq!(buckets.len(), 6);
    assert_eq!(buckets[5]["total"], 500);

    // Date-range report with inclusive bounds.
    let res = client
        .get(format!(
            "{}/report/salesReport?startDate={}&endDate={}",
            srv.base_url,
            "2000-01-01T00:00:00Z",
            "2100-01-01T00:00:00Z",
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn sale_against_unknown_customer_is_not_found() {
    let srv = TestServer::spawn().await;
    let client = client();
    login(&client, &srv.base_url).await;

    let item = add_item(&client, &srv.base_url, "Widget", 10, 100).await;

    let res = client
        .post(format!("{}/sales/create", srv.base_url))
        .json(&json!({
            "items": [sale_line(&item, "Widget", 1, 100)],
            "customerId": "00000000-0000-7000-8000-000000000000",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(item_quantity(&client, &srv.base_url, &item).await, 10);
}
