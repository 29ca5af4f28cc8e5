//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! # Customers
//! GET    /customers            - List customers
//! POST   /customers            - Create a customer
//! GET    /customers/{id}       - Fetch one customer
//! PUT    /customers/{id}       - Partially update a customer
//! DELETE /customers/{id}       - Delete a customer
//!
//! # Customer accounts
//! GET    /customeraccounts      - List accounts
//! POST   /customeraccounts      - Create an account
//! GET    /customeraccounts/{id} - Fetch one account
//! PUT    /customeraccounts/{id} - Partially update an account
//! DELETE /customeraccounts/{id} - Delete an account
//!
//! # Products
//! GET    /products             - List products
//! GET    /products/by-name     - Substring search, cheapest first
//! POST   /products             - Create a product
//! GET    /products/{id}        - Fetch one product
//! PUT    /products/{id}        - Partially update a product
//! DELETE /products/{id}        - Delete a product
//!
//! # Orders
//! GET    /orders               - List orders with nested product ids
//! POST   /orders               - Create an order with its product set
//! GET    /orders/{id}          - Fetch one order
//! PUT    /orders/{id}          - Partial update; a products list replaces
//!                                the whole association set
//! DELETE /orders/{id}          - Delete an order and its associations
//! ```
//!
//! Every handler follows the same shape: parse body, validate, run one
//! persistence operation, serialize. Validation failures return 400 with
//! per-field messages, unresolved ids return 400, absent rows return 404,
//! uniqueness violations return 409.

pub mod accounts;
pub mod customers;
pub mod orders;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Create the combined application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(customers::router())
        .merge(accounts::router())
        .merge(products::router())
        .merge(orders::router())
}
