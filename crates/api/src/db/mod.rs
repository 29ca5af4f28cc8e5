//! Database operations for the record-keeping store.
//!
//! # Tables
//!
//! - `customers` - Customer contact records
//! - `customer_accounts` - Login accounts, one per customer at most
//! - `products` - Product catalog
//! - `orders` - Orders, each owned by one customer
//! - `order_products` - Order/product association rows
//!
//! Each entity has a repository exposing `list`, `get_by_id`, `create`,
//! `update`, and `delete`. Every write runs inside a single transaction:
//! on any failure the transaction rolls back and no partial state is
//! visible. Deletes report absence through the affected-row count.

pub mod accounts;
pub mod customers;
pub mod orders;
pub mod products;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use accounts::AccountRepository;
pub use customers::CustomerRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// A referenced entity id does not resolve to an existing row.
    #[error("unknown reference: {0}")]
    UnknownReference(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
