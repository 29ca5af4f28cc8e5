//! Order route handlers.
//!
//! Creation and update delegate to the order repository, which resolves
//! every referenced id before writing and applies field edits and the
//! association rewrite in one transaction.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde_json::{Value, json};
use shopledger_core::OrderId;

use crate::db::{OrderRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::models::{NewOrder, Order, OrderPatch};
use crate::state::AppState;

/// Build the order router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list).post(create))
        .route("/orders/{id}", get(show).put(update).delete(remove))
}

/// List all orders with their nested product ids.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.pool()).list().await?;
    Ok(Json(orders))
}

/// Fetch one order by id.
pub async fn show(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Order>> {
    OrderRepository::new(state.pool())
        .get_by_id(OrderId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Create an order. Rejected outright if the product list is empty or any
/// referenced id does not resolve; no partial order is persisted.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Order>)> {
    let new = NewOrder::from_json(&body)?;
    let order = OrderRepository::new(state.pool()).create(&new).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// Partially update an order. A present products list replaces the whole
/// association set; field edits and the rewrite succeed or fail together.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> Result<Json<Order>> {
    let patch = OrderPatch::from_json(&body)?;
    OrderRepository::new(state.pool())
        .update(OrderId::new(id), &patch)
        .await
        .map(Json)
        .map_err(|e| match e {
            RepositoryError::NotFound => not_found(id),
            other => other.into(),
        })
}

/// Delete an order together with its association rows.
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Value>> {
    OrderRepository::new(state.pool())
        .delete(OrderId::new(id))
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => not_found(id),
            other => other.into(),
        })?;
    Ok(Json(
        json!({"message": "Order has been deleted successfully"}),
    ))
}

fn not_found(id: i32) -> AppError {
    AppError::not_found(format!("Order with id {id} doesn't exist"))
}
