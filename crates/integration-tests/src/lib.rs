//! End-to-end tests for the Shopledger API.
//!
//! # Running Tests
//!
//! The tests in `tests/` exercise a running server over HTTP:
//!
//! ```bash
//! # Start a PostgreSQL database and the server
//! SHOPLEDGER_DATABASE_URL=postgres://localhost/shopledger_test \
//!     cargo run -p shopledger-api
//!
//! # Run the end-to-end suite
//! cargo test -p shopledger-integration-tests -- --ignored
//! ```
//!
//! The target server is configurable via `SHOPLEDGER_BASE_URL`
//! (default: `http://localhost:8000`).

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL for the API under test.
#[must_use]
pub fn base_url() -> String {
    std::env::var("SHOPLEDGER_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".to_owned())
}

/// Create an HTTP client for the suite.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A suffix unique enough to keep test records from colliding across runs.
#[must_use]
pub fn unique_suffix() -> u128 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_nanos()
}

/// Test helper: create a customer and return its id.
///
/// # Panics
///
/// Panics if the request fails or the response is not a customer.
pub async fn create_customer(client: &Client) -> i64 {
    let resp = client
        .post(format!("{}/customers", base_url()))
        .json(&json!({
            "name": "Test Customer",
            "email": format!("customer+{}@example.com", unique_suffix()),
            "phone": "5550100",
        }))
        .send()
        .await
        .expect("Failed to create test customer");
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.expect("Failed to parse customer");
    body["customer_id"].as_i64().expect("missing customer_id")
}

/// Test helper: create a product and return its id.
///
/// # Panics
///
/// Panics if the request fails or the response is not a product.
pub async fn create_product(client: &Client, name: &str, price: f64) -> i64 {
    let resp = client
        .post(format!("{}/products", base_url()))
        .json(&json!({"name": name, "price": price}))
        .send()
        .await
        .expect("Failed to create test product");
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.expect("Failed to parse product");
    body["product_id"].as_i64().expect("missing product_id")
}

/// Test helper: create an order and return its id.
///
/// # Panics
///
/// Panics if the request fails or the response is not an order.
pub async fn create_order(client: &Client, customer_id: i64, products: &[i64]) -> i64 {
    let resp = client
        .post(format!("{}/orders", base_url()))
        .json(&json!({
            "customer_id": customer_id,
            "date": "2024-07-05",
            "products": products,
        }))
        .send()
        .await
        .expect("Failed to create test order");
    assert_eq!(resp.status(), 201);

    let body: Value = resp.json().await.expect("Failed to parse order");
    body["order_id"].as_i64().expect("missing order_id")
}
