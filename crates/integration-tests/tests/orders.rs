//! End-to-end tests for order routes and their product associations.

use serde_json::{Value, json};

use shopledger_integration_tests::{
    base_url, client, create_customer, create_order, create_product,
};

async fn fetch_order(client: &reqwest::Client, id: i64) -> Value {
    let resp = client
        .get(format!("{}/orders/{id}", base_url()))
        .send()
        .await
        .expect("Failed to fetch order");
    assert_eq!(resp.status(), 200);
    resp.json().await.expect("Failed to parse order")
}

async fn order_count(client: &reqwest::Client) -> usize {
    let resp = client
        .get(format!("{}/orders", base_url()))
        .send()
        .await
        .expect("Failed to list orders");
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.expect("Failed to parse orders");
    body.as_array().expect("expected an array").len()
}

#[tokio::test]
#[ignore = "Requires a running shopledger-api server"]
async fn created_order_round_trips_with_its_products() {
    let client = client();
    let customer_id = create_customer(&client).await;
    let product_id = create_product(&client, "Order Item", 2.50).await;
    let order_id = create_order(&client, customer_id, &[product_id]).await;

    let body = fetch_order(&client, order_id).await;
    assert_eq!(body["order_id"].as_i64(), Some(order_id));
    assert_eq!(body["customer_id"].as_i64(), Some(customer_id));
    assert_eq!(body["date"], "2024-07-05");
    assert_eq!(body["products"], json!([product_id]));
}

#[tokio::test]
#[ignore = "Requires a running shopledger-api server"]
async fn create_rejects_an_empty_product_list() {
    let client = client();
    let customer_id = create_customer(&client).await;

    let resp = client
        .post(format!("{}/orders", base_url()))
        .json(&json!({
            "customer_id": customer_id,
            "date": "2024-07-05",
            "products": [],
        }))
        .send()
        .await
        .expect("Failed to post order");
    assert_eq!(resp.status(), 400);

    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert!(body["errors"]["products"].is_array());
}

#[tokio::test]
#[ignore = "Requires a running shopledger-api server"]
async fn unknown_product_id_fails_without_creating_the_order() {
    let client = client();
    let customer_id = create_customer(&client).await;
    let before = order_count(&client).await;

    let resp = client
        .post(format!("{}/orders", base_url()))
        .json(&json!({
            "customer_id": customer_id,
            "date": "2024-07-05",
            "products": [999999999],
        }))
        .send()
        .await
        .expect("Failed to post order");
    assert_eq!(resp.status(), 400);

    assert_eq!(order_count(&client).await, before);
}

#[tokio::test]
#[ignore = "Requires a running shopledger-api server"]
async fn unknown_customer_id_is_rejected() {
    let client = client();
    let product_id = create_product(&client, "Orphan Item", 1.00).await;

    let resp = client
        .post(format!("{}/orders", base_url()))
        .json(&json!({
            "customer_id": 999999999,
            "date": "2024-07-05",
            "products": [product_id],
        }))
        .send()
        .await
        .expect("Failed to post order");
    assert_eq!(resp.status(), 400);
}

#[tokio::test]
#[ignore = "Requires a running shopledger-api server"]
async fn updating_products_replaces_the_whole_set() {
    let client = client();
    let customer_id = create_customer(&client).await;
    let first = create_product(&client, "First", 1.00).await;
    let second = create_product(&client, "Second", 2.00).await;
    let third = create_product(&client, "Third", 3.00).await;
    let order_id = create_order(&client, customer_id, &[first]).await;

    let resp = client
        .put(format!("{}/orders/{order_id}", base_url()))
        .json(&json!({"products": [second, third]}))
        .send()
        .await
        .expect("Failed to update order");
    assert_eq!(resp.status(), 200);

    let body = fetch_order(&client, order_id).await;
    let mut expected = vec![second, third];
    expected.sort_unstable();
    assert_eq!(body["products"], json!(expected));
}

#[tokio::test]
#[ignore = "Requires a running shopledger-api server"]
async fn update_without_products_keeps_the_existing_set() {
    let client = client();
    let customer_id = create_customer(&client).await;
    let product_id = create_product(&client, "Kept", 4.00).await;
    let order_id = create_order(&client, customer_id, &[product_id]).await;

    let resp = client
        .put(format!("{}/orders/{order_id}", base_url()))
        .json(&json!({"date": "2024-08-01"}))
        .send()
        .await
        .expect("Failed to update order");
    assert_eq!(resp.status(), 200);

    let body = fetch_order(&client, order_id).await;
    assert_eq!(body["date"], "2024-08-01");
    assert_eq!(body["products"], json!([product_id]));
}

#[tokio::test]
#[ignore = "Requires a running shopledger-api server"]
async fn deleting_a_referenced_product_leaves_the_order_readable() {
    let client = client();
    let customer_id = create_customer(&client).await;
    let kept = create_product(&client, "Kept", 1.00).await;
    let removed = create_product(&client, "Removed", 2.00).await;
    let order_id = create_order(&client, customer_id, &[kept, removed]).await;

    let resp = client
        .delete(format!("{}/products/{removed}", base_url()))
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), 200);

    let body = fetch_order(&client, order_id).await;
    assert_eq!(body["products"], json!([kept]));
}

#[tokio::test]
#[ignore = "Requires a running shopledger-api server"]
async fn deleted_order_takes_its_associations_with_it() {
    let client = client();
    let customer_id = create_customer(&client).await;
    let product_id = create_product(&client, "Transient", 1.00).await;
    let order_id = create_order(&client, customer_id, &[product_id]).await;

    let resp = client
        .delete(format!("{}/orders/{order_id}", base_url()))
        .send()
        .await
        .expect("Failed to delete order");
    assert_eq!(resp.status(), 200);

    let resp = client
        .get(format!("{}/orders/{order_id}", base_url()))
        .send()
        .await
        .expect("Failed to fetch order");
    assert_eq!(resp.status(), 404);

    // The product survives its order.
    let resp = client
        .get(format!("{}/products/{product_id}", base_url()))
        .send()
        .await
        .expect("Failed to fetch product");
    assert_eq!(resp.status(), 200);
}
