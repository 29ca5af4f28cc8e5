//! Product route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use shopledger_core::ProductId;

use crate::db::{ProductRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::models::{NewProduct, Product, ProductPatch};
use crate::state::AppState;

/// Build the product router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list).post(create))
        .route("/products/by-name", get(search))
        .route("/products/{id}", get(show).put(update).delete(remove))
}

/// Query parameters for product name search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: String,
}

/// List all products.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// Case-insensitive substring search by name, cheapest first.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool())
        .search_by_name(&query.name)
        .await?;
    Ok(Json(products))
}

/// Fetch one product by id.
pub async fn show(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Product>> {
    ProductRepository::new(state.pool())
        .get_by_id(ProductId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Create a product.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Product>)> {
    let new = NewProduct::from_json(&body)?;
    let product = ProductRepository::new(state.pool()).create(&new).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Partially update a product. Only fields present in the body change.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> Result<Json<Product>> {
    let patch = ProductPatch::from_json(&body)?;
    ProductRepository::new(state.pool())
        .update(ProductId::new(id), &patch)
        .await
        .map(Json)
        .map_err(|e| match e {
            RepositoryError::NotFound => not_found(id),
            other => other.into(),
        })
}

/// Delete a product. Any association rows referencing it are
/// cascade-removed so order reads keep working.
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Value>> {
    ProductRepository::new(state.pool())
        .delete(ProductId::new(id))
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => not_found(id),
            other => other.into(),
        })?;
    Ok(Json(
        json!({"message": "Product has been deleted successfully"}),
    ))
}

fn not_found(id: i32) -> AppError {
    AppError::not_found(format!("Product with id {id} doesn't exist"))
}
