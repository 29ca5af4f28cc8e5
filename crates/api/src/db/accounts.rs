//! Customer account repository for database operations.
//!
//! Accounts store an argon2id password hash, never the plain-text
//! password. The hash column is read only for credential checks and is
//! never surfaced through [`Account`].

use sqlx::PgPool;

use shopledger_core::{AccountId, CustomerId};

use super::RepositoryError;
use crate::models::Account;

/// Internal row type for `PostgreSQL` account queries. The password hash
/// is deliberately not selected.
#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: AccountId,
    username: String,
    customer_id: CustomerId,
}

impl From<AccountRow> for Account {
    fn from(row: AccountRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            customer_id: row.customer_id,
        }
    }
}

/// Map store-level constraint violations on account writes to their
/// repository error classes.
fn map_write_error(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            return RepositoryError::Conflict("username already taken".to_owned());
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::UnknownReference(
                "referenced customer doesn't exist".to_owned(),
            );
        }
    }
    RepositoryError::Database(e)
}

/// Repository for customer account database operations.
pub struct AccountRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AccountRepository<'a> {
    /// Create a new account repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all accounts.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Account>, RepositoryError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            "SELECT id, username, customer_id FROM customer_accounts ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get an account by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: AccountId) -> Result<Option<Account>, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            "SELECT id, username, customer_id FROM customer_accounts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a new account with an already-hashed password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the username is taken.
    /// Returns `RepositoryError::UnknownReference` if the customer id does
    /// not resolve.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        username: &str,
        password_hash: &str,
        customer_id: i32,
    ) -> Result<Account, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            "INSERT INTO customer_accounts (username, password_hash, customer_id)
             VALUES ($1, $2, $3)
             RETURNING id, username, customer_id",
        )
        .bind(username)
        .bind(password_hash)
        .bind(customer_id)
        .fetch_one(self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    /// Apply a partial update to an account. Only the supplied columns are
    /// changed; the password, when supplied, must already be hashed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Conflict` if the new username is taken.
    /// Returns `RepositoryError::UnknownReference` if a new customer id
    /// does not resolve.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: AccountId,
        username: Option<&str>,
        password_hash: Option<&str>,
        customer_id: Option<i32>,
    ) -> Result<Account, RepositoryError> {
        let row = sqlx::query_as::<_, AccountRow>(
            "UPDATE customer_accounts
             SET username = COALESCE($2, username),
                 password_hash = COALESCE($3, password_hash),
                 customer_id = COALESCE($4, customer_id)
             WHERE id = $1
             RETURNING id, username, customer_id",
        )
        .bind(id)
        .bind(username)
        .bind(password_hash)
        .bind(customer_id)
        .fetch_optional(self.pool)
        .await
        .map_err(map_write_error)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(row.into())
    }

    /// Delete an account by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the account doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: AccountId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM customer_accounts WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
