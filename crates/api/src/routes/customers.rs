//! Customer route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde_json::{Value, json};
use shopledger_core::CustomerId;

use crate::db::{CustomerRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::models::{Customer, CustomerPatch, NewCustomer};
use crate::state::AppState;

/// Build the customer router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customers", get(list).post(create))
        .route("/customers/{id}", get(show).put(update).delete(remove))
}

/// List all customers.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Customer>>> {
    let customers = CustomerRepository::new(state.pool()).list().await?;
    Ok(Json(customers))
}

/// Fetch one customer by id.
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Customer>> {
    CustomerRepository::new(state.pool())
        .get_by_id(CustomerId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Create a customer.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Customer>)> {
    let new = NewCustomer::from_json(&body)?;
    let customer = CustomerRepository::new(state.pool()).create(&new).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

/// Partially update a customer. Only fields present in the body change.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> Result<Json<Customer>> {
    let patch = CustomerPatch::from_json(&body)?;
    CustomerRepository::new(state.pool())
        .update(CustomerId::new(id), &patch)
        .await
        .map(Json)
        .map_err(|e| match e {
            RepositoryError::NotFound => not_found(id),
            other => other.into(),
        })
}

/// Delete a customer.
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>> {
    CustomerRepository::new(state.pool())
        .delete(CustomerId::new(id))
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => not_found(id),
            other => other.into(),
        })?;
    Ok(Json(json!({"message": "Customer removed successfully"})))
}

fn not_found(id: i32) -> AppError {
    AppError::not_found(format!("Customer with id {id} doesn't exist"))
}
