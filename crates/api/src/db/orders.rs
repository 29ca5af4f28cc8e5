//! Order repository and order/product association management.
//!
//! An order's association set is maintained atomically: create resolves
//! the customer and every product id before any row is written, update
//! resolves all new ids before applying field edits or rewriting the
//! association set, and delete removes join rows in the same transaction
//! as the order row. On any unresolved id the whole transaction rolls
//! back and no partial state is visible.

use std::collections::BTreeMap;

use sqlx::{PgConnection, PgPool};

use shopledger_core::{CustomerId, OrderId, ProductId};

use super::RepositoryError;
use crate::models::{NewOrder, Order, OrderPatch};

/// Internal row type for `PostgreSQL` order queries, without the
/// association set.
#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    customer_id: CustomerId,
    date: chrono::NaiveDate,
}

impl OrderRow {
    fn into_order(self, products: Vec<ProductId>) -> Order {
        Order {
            id: self.id,
            customer_id: self.customer_id,
            date: self.date,
            products,
        }
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all orders with their nested product-id lists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn list(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            "SELECT id, customer_id, date FROM orders ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        let links: Vec<(OrderId, ProductId)> = sqlx::query_as(
            "SELECT order_id, product_id FROM order_products ORDER BY order_id, product_id",
        )
        .fetch_all(self.pool)
        .await?;

        let mut by_order: BTreeMap<OrderId, Vec<ProductId>> = BTreeMap::new();
        for (order_id, product_id) in links {
            by_order.entry(order_id).or_default().push(product_id);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let products = by_order.remove(&row.id).unwrap_or_default();
                row.into_order(products)
            })
            .collect())
    }

    /// Get an order by its ID, with its nested product-id list.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, customer_id, date FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let products = sqlx::query_scalar::<_, ProductId>(
            "SELECT product_id FROM order_products WHERE order_id = $1 ORDER BY product_id",
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(Some(row.into_order(products)))
    }

    /// Create an order and its association rows in one transaction.
    ///
    /// The customer id and every product id are resolved before any row is
    /// written; an unresolved id aborts the whole creation.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::UnknownReference` naming the id that
    /// failed to resolve.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewOrder) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        ensure_customer_exists(&mut *tx, new.customer_id).await?;
        resolve_product_ids(&mut *tx, &new.products).await?;

        let row = sqlx::query_as::<_, OrderRow>(
            "INSERT INTO orders (customer_id, date)
             VALUES ($1, $2)
             RETURNING id, customer_id, date",
        )
        .bind(new.customer_id)
        .bind(new.date)
        .fetch_one(&mut *tx)
        .await?;

        insert_association_rows(&mut *tx, row.id, &new.products).await?;

        tx.commit().await?;

        let products = new.products.iter().copied().map(ProductId::new).collect();
        Ok(row.into_order(products))
    }

    /// Apply a partial update to an order. When the patch carries a
    /// product list, the entire existing association set is replaced with
    /// it; field edits and the association rewrite commit or roll back
    /// together.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::UnknownReference` if a new customer or
    /// product id does not resolve; no field edit is applied in that case.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: OrderId, patch: &OrderPatch) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM orders WHERE id = $1)",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        if !exists {
            return Err(RepositoryError::NotFound);
        }

        // Resolve every referenced id before touching any row.
        if let Some(customer_id) = patch.customer_id {
            ensure_customer_exists(&mut *tx, customer_id).await?;
        }
        if let Some(products) = &patch.products {
            resolve_product_ids(&mut *tx, products).await?;
        }

        let row = sqlx::query_as::<_, OrderRow>(
            "UPDATE orders
             SET customer_id = COALESCE($2, customer_id),
                 date = COALESCE($3, date)
             WHERE id = $1
             RETURNING id, customer_id, date",
        )
        .bind(id)
        .bind(patch.customer_id)
        .bind(patch.date)
        .fetch_one(&mut *tx)
        .await?;

        let products = if let Some(products) = &patch.products {
            sqlx::query("DELETE FROM order_products WHERE order_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            insert_association_rows(&mut *tx, id, products).await?;
            products.iter().copied().map(ProductId::new).collect()
        } else {
            sqlx::query_scalar::<_, ProductId>(
                "SELECT product_id FROM order_products WHERE order_id = $1 ORDER BY product_id",
            )
            .bind(id)
            .fetch_all(&mut *tx)
            .await?
        };

        tx.commit().await?;

        Ok(row.into_order(products))
    }

    /// Delete an order and its association rows in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the order doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM order_products WHERE order_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

/// Verify that a customer id resolves to an existing row.
async fn ensure_customer_exists(
    conn: &mut PgConnection,
    customer_id: i32,
) -> Result<(), RepositoryError> {
    let exists = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM customers WHERE id = $1)",
    )
    .bind(customer_id)
    .fetch_one(conn)
    .await?;

    if exists {
        Ok(())
    } else {
        Err(RepositoryError::UnknownReference(format!(
            "customer id {customer_id} doesn't exist"
        )))
    }
}

/// Resolve a set of product ids, reporting every id that does not exist.
async fn resolve_product_ids(
    conn: &mut PgConnection,
    ids: &[i32],
) -> Result<(), RepositoryError> {
    let found: Vec<i32> = sqlx::query_scalar("SELECT id FROM products WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(conn)
        .await?;

    let missing: Vec<String> = ids
        .iter()
        .filter(|id| !found.contains(id))
        .map(ToString::to_string)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else if let [id] = missing.as_slice() {
        Err(RepositoryError::UnknownReference(format!(
            "product id {id} doesn't exist"
        )))
    } else {
        Err(RepositoryError::UnknownReference(format!(
            "product ids {} don't exist",
            missing.join(", ")
        )))
    }
}

/// Insert the association rows for an order.
async fn insert_association_rows(
    conn: &mut PgConnection,
    order_id: OrderId,
    product_ids: &[i32],
) -> Result<(), RepositoryError> {
    sqlx::query(
        "INSERT INTO order_products (order_id, product_id)
         SELECT $1, unnest($2::int4[])",
    )
    .bind(order_id)
    .bind(product_ids)
    .execute(conn)
    .await?;

    Ok(())
}
