//! Customer account route handlers.
//!
//! Passwords are hashed at this boundary before anything reaches the
//! repository; responses never carry the password or its hash.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde_json::{Value, json};
use shopledger_core::AccountId;

use crate::db::{AccountRepository, RepositoryError};
use crate::error::{AppError, Result};
use crate::models::{Account, AccountPatch, NewAccount};
use crate::services::password;
use crate::state::AppState;

/// Build the account router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/customeraccounts", get(list).post(create))
        .route(
            "/customeraccounts/{id}",
            get(show).put(update).delete(remove),
        )
}

/// List all accounts.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Account>>> {
    let accounts = AccountRepository::new(state.pool()).list().await?;
    Ok(Json(accounts))
}

/// Fetch one account by id.
pub async fn show(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Account>> {
    AccountRepository::new(state.pool())
        .get_by_id(AccountId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| not_found(id))
}

/// Create an account for a customer.
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Account>)> {
    let new = NewAccount::from_json(&body)?;
    let password_hash = password::hash(&new.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let account = AccountRepository::new(state.pool())
        .create(&new.username, &password_hash, new.customer_id)
        .await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// Partially update an account. A supplied password is re-hashed.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<Value>,
) -> Result<Json<Account>> {
    let patch = AccountPatch::from_json(&body)?;
    let password_hash = patch
        .password
        .as_deref()
        .map(password::hash)
        .transpose()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    AccountRepository::new(state.pool())
        .update(
            AccountId::new(id),
            patch.username.as_deref(),
            password_hash.as_deref(),
            patch.customer_id,
        )
        .await
        .map(Json)
        .map_err(|e| match e {
            RepositoryError::NotFound => not_found(id),
            other => other.into(),
        })
}

/// Delete an account.
pub async fn remove(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<Value>> {
    AccountRepository::new(state.pool())
        .delete(AccountId::new(id))
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => not_found(id),
            other => other.into(),
        })?;
    Ok(Json(json!({"message": "Account has been deleted"})))
}

fn not_found(id: i32) -> AppError {
    AppError::not_found(format!("Account with id {id} doesn't exist"))
}
